//! Namespace serialization of a finished model.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gft_model::{
    CodeSystemModel, Namespace, NamespaceSelector, ResourceKind, artifact_file_name,
    canonical_url,
};
use tempfile::NamedTempFile;
use tracing::{info, info_span, warn};

use crate::error::{OutputError, Result, SerializationFailure};

/// An artifact written for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub namespace: Namespace,
    pub url: &'static str,
    pub path: PathBuf,
}

/// Outcome of emitting one model to every selected namespace.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<WrittenArtifact>,
    pub failures: Vec<SerializationFailure>,
}

impl EmitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Written artifacts, or every namespace failure at once.
    pub fn into_result(self) -> Result<Vec<WrittenArtifact>> {
        let mut failures = self.failures;
        match failures.len() {
            0 => Ok(self.written),
            1 => Err(OutputError::Serialization(failures.remove(0))),
            _ => Err(OutputError::NamespaceFailures(failures)),
        }
    }
}

/// Write `model` once per namespace in `selector` into `output_dir`.
///
/// Every copy carries the namespace's canonical URL and is written
/// atomically. A failing namespace does not stop the others; failures are
/// collected in the report.
///
/// # Errors
///
/// Returns [`OutputError::UnsupportedKind`] before writing anything when
/// `kind` has no canonical URL for a selected namespace.
pub fn emit(
    model: &CodeSystemModel,
    kind: ResourceKind,
    version: &str,
    selector: NamespaceSelector,
    output_dir: &Path,
) -> Result<EmitReport> {
    let targets = selector
        .namespaces()
        .iter()
        .map(|&namespace| canonical_url(kind, namespace).map(|url| (namespace, url)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut report = EmitReport::default();
    for (namespace, url) in targets {
        let span = info_span!(
            "emit",
            resource_kind = %kind,
            version = %version,
            namespace = %namespace
        );
        let _guard = span.enter();
        let start = Instant::now();

        let path = output_dir.join(artifact_file_name(kind, namespace, version));
        match write_artifact(&model.with_url(url), &path) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    concept_count = model.count,
                    duration_ms = start.elapsed().as_millis(),
                    "artifact written"
                );
                report.written.push(WrittenArtifact {
                    namespace,
                    url,
                    path,
                });
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "artifact not written");
                report.failures.push(SerializationFailure {
                    namespace,
                    path,
                    source,
                });
            }
        }
    }
    Ok(report)
}

/// Pretty-print `model` to a temporary file beside `path`, then rename it
/// into place.
fn write_artifact(model: &CodeSystemModel, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, model)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Read a previously written artifact.
pub fn read_artifact(path: &Path) -> Result<CodeSystemModel> {
    let read_error = |source: io::Error| OutputError::Read {
        path: path.to_path_buf(),
        source,
    };
    let contents = fs::read_to_string(path).map_err(read_error)?;
    serde_json::from_str(&contents).map_err(|err| read_error(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gft_model::{ConceptDefinition, ModelError};

    fn model() -> CodeSystemModel {
        CodeSystemModel::new("OPS", "OPS 2021", "2021", vec![])
            .with_concepts(vec![ConceptDefinition::new("1-10", "Klinische Untersuchung")])
    }

    #[test]
    fn unsupported_kind_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let err = emit(
            &model(),
            ResourceKind::AlphaId,
            "2021",
            NamespaceSelector::Both,
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OutputError::UnsupportedKind(ModelError::UnsupportedKind { .. })
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_fails_every_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let report = emit(
            &model(),
            ResourceKind::Ops,
            "2021",
            NamespaceSelector::Both,
            &missing,
        )
        .unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.failures.len(), 2);
        let failure = &report.failures[0];
        assert_eq!(failure.source.kind(), io::ErrorKind::NotFound);
        assert!(std::error::Error::source(failure).is_some());
        assert!(matches!(
            report.into_result(),
            Err(OutputError::NamespaceFailures(failures)) if failures.len() == 2
        ));
    }

    #[test]
    fn read_artifact_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let Err(OutputError::Read { source, .. }) = read_artifact(&path) else {
            panic!("expected a read error");
        };
        assert_eq!(source.kind(), io::ErrorKind::InvalidData);

        let Err(OutputError::Read { source, .. }) = read_artifact(&dir.path().join("absent.json"))
        else {
            panic!("expected a read error");
        };
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }
}

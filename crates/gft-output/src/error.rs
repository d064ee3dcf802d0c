//! Error types for artifact emission.

use std::io;
use std::path::PathBuf;

use gft_model::{ModelError, Namespace};
use thiserror::Error;

/// A namespace whose artifact could not be written.
#[derive(Debug, Error)]
#[error("failed to write {namespace} artifact {}: {source}", path.display())]
pub struct SerializationFailure {
    pub namespace: Namespace,
    pub path: PathBuf,
    /// Temp file, serialization, or rename failure.
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum OutputError {
    /// The resource kind has no canonical URL mapping.
    #[error(transparent)]
    UnsupportedKind(#[from] ModelError),

    #[error(transparent)]
    Serialization(#[from] SerializationFailure),

    #[error("{} namespace artifacts failed: {}", .0.len(), join_failures(.0))]
    NamespaceFailures(Vec<SerializationFailure>),

    #[error("failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn join_failures(failures: &[SerializationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, OutputError>;

//! Node sources: produce a classification tree for a kind and version.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use gft_model::ResourceKind;
use tracing::{info, info_span};
use zip::ZipArchive;

use crate::archive::read_chapters;
use crate::error::{Result, SourceError};
use crate::markup::{ChapterParser, MarkupChapterParser};
use crate::naming::catalog_title;
use crate::node::{NodeTree, NodeTreeBuilder};

/// Anything that can build a versioned classification tree.
pub trait NodeSource {
    /// Build the tree of `kind` at `version` from `archive`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnsupportedKind`] when the kind has no
    /// tree-building strategy, and a malformed-source error when the archive
    /// cannot be turned into a tree.
    fn build(&self, archive: &Path, kind: ResourceKind, version: &str) -> Result<NodeTree>;
}

/// Reads chapter documents from a ZIP archive and parses each with `P`.
///
/// The archive is opened per call and closed before `build` returns.
#[derive(Debug, Clone, Default)]
pub struct ArchiveNodeSource<P = MarkupChapterParser> {
    parser: P,
}

impl ArchiveNodeSource {
    pub fn new() -> Self {
        Self {
            parser: MarkupChapterParser,
        }
    }
}

impl<P: ChapterParser> ArchiveNodeSource<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: ChapterParser> NodeSource for ArchiveNodeSource<P> {
    fn build(&self, archive: &Path, kind: ResourceKind, version: &str) -> Result<NodeTree> {
        let classification = kind.classification()?;
        let span = info_span!("build_tree", resource_kind = %kind, version = %version);
        let _guard = span.enter();
        let start = Instant::now();

        let file = File::open(archive).map_err(|source| SourceError::Io {
            path: archive.to_path_buf(),
            source,
        })?;
        let mut zip =
            ZipArchive::new(BufReader::new(file)).map_err(|source| SourceError::Archive {
                path: archive.to_path_buf(),
                source,
            })?;
        let chapters = read_chapters(&mut zip, classification, archive)?;
        drop(zip);

        if chapters.is_empty() {
            return Err(SourceError::MissingChapters {
                kind,
                version: version.to_string(),
            });
        }

        let title = catalog_title(classification, version);
        let mut builder = NodeTreeBuilder::new(classification, version, &title);
        for chapter in &chapters {
            let added = self.parser.parse(chapter, &mut builder)?;
            info!(chapter = %chapter.path, node_count = added, "chapter read");
        }
        let tree = builder.finish();
        info!(
            chapter_count = chapters.len(),
            node_count = tree.len() - 1,
            duration_ms = start.elapsed().as_millis(),
            "classification tree built"
        );
        Ok(tree)
    }
}

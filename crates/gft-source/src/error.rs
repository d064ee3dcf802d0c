//! Error types for building classification trees.

use std::path::PathBuf;

use gft_model::{ModelError, ResourceKind};
use thiserror::Error;

/// Errors that can occur while producing a node tree.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The resource kind has no tree-building strategy.
    #[error(transparent)]
    UnsupportedKind(#[from] ModelError),

    // === File System Errors ===
    /// Failed to open or read the archive file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive container could not be read.
    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    // === Content Errors ===
    /// No chapter documents for the kind were found in the archive.
    #[error("archive contains no {kind} chapter documents for version {version}")]
    MissingChapters { kind: ResourceKind, version: String },

    /// A chapter document could not be parsed.
    #[error("malformed markup in {document}: {message}")]
    Markup { document: String, message: String },

    /// The tree being built is structurally inconsistent.
    #[error("malformed classification tree: {message}")]
    MalformedTree { message: String },
}

impl SourceError {
    /// Whether this error means the input could not be turned into a tree,
    /// as opposed to the kind not being supported at all.
    #[must_use]
    pub fn is_malformed_source(&self) -> bool {
        !matches!(self, Self::UnsupportedKind(_))
    }

    pub(crate) fn markup(document: &str, message: impl std::fmt::Display) -> Self {
        Self::Markup {
            document: document.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

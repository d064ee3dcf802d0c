use std::path::PathBuf;

use gft_model::{DuplicateReport, NamespaceSelector, ResourceKind};
use gft_output::{SerializationFailure, WrittenArtifact};

/// Everything one conversion run needs, collected from the command line.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub kind: ResourceKind,
    pub version: String,
    pub selector: NamespaceSelector,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct ConversionResult {
    pub kind: ResourceKind,
    pub version: String,
    pub title: String,
    pub output_dir: PathBuf,
    pub concept_count: usize,
    pub written: Vec<WrittenArtifact>,
    pub duplicates: Vec<DuplicateReport>,
    pub failures: Vec<SerializationFailure>,
    pub has_errors: bool,
}

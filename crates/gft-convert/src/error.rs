//! Error types for the conversion stage.

use gft_model::{ClassificationKind, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The resource kind has no conversion strategy.
    #[error(transparent)]
    UnsupportedKind(#[from] ModelError),

    /// Criteria texts and their reference codes are not paired one to one.
    #[error("node {code}: {field} has {texts} texts but {codes} reference codes")]
    InvariantViolation {
        code: String,
        field: &'static str,
        texts: usize,
        codes: usize,
    },

    /// A node's details do not belong to the tree's classification kind.
    #[error("node {code} does not carry {expected:?} details")]
    KindMismatch {
        code: String,
        expected: ClassificationKind,
    },
}

impl ConvertError {
    /// Whether the error describes inconsistent input rather than an
    /// unsupported kind.
    #[must_use]
    pub fn is_malformed_source(&self) -> bool {
        !matches!(self, Self::UnsupportedKind(_))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

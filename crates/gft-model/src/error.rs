use thiserror::Error;

use crate::kind::ResourceKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The resource kind is declared but has no strategy for the requested stage.
    #[error("resource kind {kind} has no {stage} strategy")]
    UnsupportedKind {
        kind: ResourceKind,
        stage: &'static str,
    },

    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

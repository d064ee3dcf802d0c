//! Writes a converted CodeSystem once per publisher namespace.

pub mod emit;
pub mod error;

pub use emit::{EmitReport, WrittenArtifact, emit, read_artifact};
pub use error::{OutputError, Result, SerializationFailure};

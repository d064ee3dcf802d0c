//! Library side of the `german-fhir-terminology` command.

pub mod logging;
pub mod pipeline;
pub mod types;

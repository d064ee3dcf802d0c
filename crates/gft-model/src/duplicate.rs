use serde::{Deserialize, Serialize};

/// One collapsed occurrence of a repeated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateOccurrence {
    pub display: String,
    pub property_count: usize,
}

/// Diagnostic for a code that appeared on more than one node.
///
/// The first occurrence is the one kept in the model; the report only
/// describes what was collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub code: String,
    pub occurrence_count: usize,
    pub occurrences: Vec<DuplicateOccurrence>,
}

impl DuplicateReport {
    /// Number of occurrences dropped in favour of the representative.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.occurrence_count.saturating_sub(1)
    }
}

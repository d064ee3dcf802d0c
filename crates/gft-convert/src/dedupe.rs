//! Collapse concepts that share a code.
//!
//! Source catalogs occasionally repeat a code. The first occurrence wins and
//! later ones are dropped; each collapsed group is reported so the caller can
//! surface it.

use std::collections::HashMap;

use gft_model::{ConceptDefinition, DuplicateOccurrence, DuplicateReport};

/// Placeholder code that repeats in some releases and is collapsed without
/// a report.
pub const DUPLICATE_EXEMPT_CODE: &str = "DUMMY";

#[derive(Debug, Clone, Default)]
pub struct DedupeOutcome {
    /// Unique concepts in first-seen order.
    pub concepts: Vec<ConceptDefinition>,
    /// One report per repeated code, in first-seen order.
    pub duplicates: Vec<DuplicateReport>,
}

pub fn dedupe(concepts: Vec<ConceptDefinition>) -> DedupeOutcome {
    let mut groups: Vec<Vec<ConceptDefinition>> = Vec::new();
    let mut index_by_code: HashMap<String, usize> = HashMap::new();
    for concept in concepts {
        match index_by_code.get(&concept.code) {
            Some(&index) => groups[index].push(concept),
            None => {
                index_by_code.insert(concept.code.clone(), groups.len());
                groups.push(vec![concept]);
            }
        }
    }

    let mut outcome = DedupeOutcome::default();
    for group in groups {
        if group.len() > 1 && group[0].code != DUPLICATE_EXEMPT_CODE {
            outcome.duplicates.push(DuplicateReport {
                code: group[0].code.clone(),
                occurrence_count: group.len(),
                occurrences: group
                    .iter()
                    .map(|concept| DuplicateOccurrence {
                        display: concept.display.clone(),
                        property_count: concept.property.len(),
                    })
                    .collect(),
            });
        }
        if let Some(first) = group.into_iter().next() {
            outcome.concepts.push(first);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use gft_model::PropertyValue;
    use proptest::prelude::*;

    fn concept(code: &str, display: &str) -> ConceptDefinition {
        ConceptDefinition::new(code, display)
    }

    #[test]
    fn keeps_first_occurrence_and_reports_group() {
        let mut second = concept("A02", "Sonstige Salmonelleninfektionen (Kopie)");
        second.property.push(PropertyValue::string("hint", "doppelt"));
        let outcome = dedupe(vec![
            concept("A01", "Typhus"),
            concept("A02", "Sonstige Salmonelleninfektionen"),
            second,
        ]);

        let codes: Vec<_> = outcome.concepts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A01", "A02"]);
        assert_eq!(outcome.concepts[1].display, "Sonstige Salmonelleninfektionen");
        assert_eq!(outcome.duplicates.len(), 1);
        let report = &outcome.duplicates[0];
        assert_eq!(report.code, "A02");
        assert_eq!(report.occurrence_count, 2);
        assert_eq!(report.occurrences[1].property_count, 1);
        assert_eq!(report.dropped(), 1);
    }

    #[test]
    fn exempt_code_collapses_silently() {
        let outcome = dedupe(vec![
            concept(DUPLICATE_EXEMPT_CODE, "a"),
            concept("B01", "Varizellen"),
            concept(DUPLICATE_EXEMPT_CODE, "b"),
        ]);
        let codes: Vec<_> = outcome.concepts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec![DUPLICATE_EXEMPT_CODE, "B01"]);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_outcome() {
        let outcome = dedupe(Vec::new());
        assert!(outcome.concepts.is_empty());
        assert!(outcome.duplicates.is_empty());
    }

    proptest! {
        #[test]
        fn unique_count_matches_distinct_codes(
            codes in prop::collection::vec("[A-E][0-2]", 0..40)
        ) {
            let concepts = codes.iter().map(|code| concept(code, code)).collect();
            let outcome = dedupe(concepts);

            let mut distinct = codes.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(outcome.concepts.len(), distinct.len());

            let occurrences: usize = outcome.duplicates.iter().map(|d| d.occurrence_count).sum();
            prop_assert_eq!(
                outcome.concepts.len(),
                codes.len() - (occurrences - outcome.duplicates.len())
            );

            let mut seen = Vec::new();
            for code in &codes {
                if !seen.contains(code) {
                    seen.push(code.clone());
                }
            }
            let kept: Vec<_> = outcome.concepts.iter().map(|c| c.code.clone()).collect();
            prop_assert_eq!(kept, seen);
        }
    }
}

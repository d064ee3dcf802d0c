//! Conversion entry point: tree in, flat code system out.

use std::time::Instant;

use gft_model::{CodeSystemModel, DuplicateReport};
use gft_source::NodeTree;
use tracing::{info, info_span, warn};

use crate::builder::build_concept;
use crate::dedupe::dedupe;
use crate::error::Result;
use crate::strategy::strategy;
use crate::walker::flatten;

/// Result of converting one tree.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub model: CodeSystemModel,
    /// Codes that appeared more than once and were collapsed.
    pub duplicates: Vec<DuplicateReport>,
}

/// Flatten `tree`, build one concept per non-root node, and collapse
/// repeated codes.
///
/// # Errors
///
/// Fails on the first node whose details cannot be turned into a concept.
pub fn convert_tree(tree: &NodeTree) -> Result<ConversionOutcome> {
    let kind = tree.kind();
    let span = info_span!(
        "convert",
        resource_kind = %kind.resource_kind(),
        version = %tree.version()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let strategy = strategy(kind);
    let concepts = flatten(tree)
        .iter()
        .filter(|walked| !walked.node.is_root())
        .map(|walked| build_concept(strategy, walked))
        .collect::<Result<Vec<_>>>()?;
    let built = concepts.len();

    let outcome = {
        let span = info_span!("dedupe", concept_count = built);
        let _guard = span.enter();
        let outcome = dedupe(concepts);
        for report in &outcome.duplicates {
            let displays: Vec<&str> = report
                .occurrences
                .iter()
                .map(|occurrence| occurrence.display.as_str())
                .collect();
            warn!(
                code = %report.code,
                occurrences = report.occurrence_count,
                displays = ?displays,
                "duplicate code collapsed"
            );
        }
        outcome
    };

    let model = CodeSystemModel::new(
        kind.resource_kind().as_str(),
        tree.title(),
        tree.version(),
        strategy.property_definitions(),
    )
    .with_concepts(outcome.concepts);

    info!(
        concept_count = model.count,
        duplicate_count = outcome.duplicates.len(),
        duration_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConversionOutcome {
        model,
        duplicates: outcome.duplicates,
    })
}

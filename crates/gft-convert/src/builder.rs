//! Concept construction for a single walked node.

use gft_model::{ConceptDefinition, PropertyDefinition, PropertyValue};

use crate::error::Result;
use crate::strategy::{ConversionStrategy, PARENT};
use crate::walker::WalkedNode;

/// Build the concept for one non-root node.
///
/// The `parent` property comes first when the node has a non-root parent,
/// followed by the strategy's kind-specific properties.
pub fn build_concept(
    strategy: &ConversionStrategy,
    walked: &WalkedNode<'_>,
) -> Result<ConceptDefinition> {
    let node = walked.node;
    let mut concept = ConceptDefinition::new(node.code(), node.label());
    if let Some(parent) = walked.concept_parent() {
        concept.property.push(PropertyValue::code(PARENT, parent.code()));
    }
    strategy.kind_properties(node, &mut concept.property)?;
    debug_assert!(
        conforms(&concept.property, &strategy.property_definitions()),
        "concept {} carries a property outside the declared table",
        concept.code
    );
    Ok(concept)
}

fn conforms(properties: &[PropertyValue], definitions: &[PropertyDefinition]) -> bool {
    properties.iter().all(|property| {
        definitions.iter().any(|definition| {
            definition.code == property.code
                && definition.property_type == property.value.property_type()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::strategy::{EXCLUSION, HINT, INCLUSION, IS_CURATED, strategy};
    use crate::walker::flatten;
    use gft_model::{ClassificationKind, PropertyValueKind};
    use gft_source::{
        DiseaseDetails, NodeDetails, NodeId, NodeTree, NodeTreeBuilder, ProcedureDetails,
    };

    fn concept_for(tree: &NodeTree, code: &str) -> Result<ConceptDefinition> {
        let walked = flatten(tree);
        let entry = walked.iter().find(|w| w.node.code() == code).unwrap();
        build_concept(strategy(tree.kind()), entry)
    }

    #[test]
    fn disease_criteria_carry_reference_codes() {
        let kind = ClassificationKind::ClassificationOfDiseases;
        let mut builder = NodeTreeBuilder::new(kind, "2023", "ICD-10-GM Version 2023");
        let details = DiseaseDetails::default()
            .with_inclusion("diabetes", None)
            .with_inclusion("hypertension", Some("I10"))
            .with_exclusion("Schwangerschaft", Some("O24.-"))
            .with_hint("Zusatzkode benutzen");
        builder
            .add(NodeId::ROOT, "E11", "Diabetes mellitus, Typ 2", NodeDetails::Disease(details))
            .unwrap();
        let tree = builder.finish();

        let concept = concept_for(&tree, "E11").unwrap();
        assert_eq!(concept.display, "Diabetes mellitus, Typ 2");
        let inclusions: Vec<_> = concept
            .properties_named(INCLUSION)
            .filter_map(PropertyValueKind::as_text)
            .collect();
        assert_eq!(inclusions, vec!["diabetes", "hypertension (I10)"]);
        let exclusions: Vec<_> = concept
            .properties_named(EXCLUSION)
            .filter_map(PropertyValueKind::as_text)
            .collect();
        assert_eq!(exclusions, vec!["Schwangerschaft (O24.-)"]);
        assert_eq!(concept.properties_named(HINT).count(), 1);
        assert_eq!(concept.properties_named(PARENT).count(), 0);
    }

    #[test]
    fn unpaired_criteria_are_rejected() {
        let kind = ClassificationKind::ClassificationOfDiseases;
        let mut builder = NodeTreeBuilder::new(kind, "2023", "ICD-10-GM Version 2023");
        let mut details = DiseaseDetails::default().with_inclusion("diabetes", None);
        details.inclusion_codes.push(Some("E10".to_string()));
        builder
            .add(NodeId::ROOT, "E11", "Diabetes", NodeDetails::Disease(details))
            .unwrap();
        let tree = builder.finish();

        let err = concept_for(&tree, "E11").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvariantViolation { field: "inclusion", texts: 1, codes: 2, .. }
        ));
        assert!(err.is_malformed_source());
    }

    #[test]
    fn procedure_concepts_have_one_curated_flag_and_parent() {
        let kind = ClassificationKind::Procedure;
        let mut builder = NodeTreeBuilder::new(kind, "2021", "OPS 2021");
        let chapter = builder
            .add(NodeId::ROOT, "1", "Diagnostik", NodeDetails::empty_for(kind))
            .unwrap();
        let details = ProcedureDetails::default()
            .with_inclusion("Biopsie")
            .curated(true);
        builder
            .add(chapter, "1-100", "Klinische Untersuchung", NodeDetails::Procedure(details))
            .unwrap();
        let tree = builder.finish();

        let concept = concept_for(&tree, "1-100").unwrap();
        assert_eq!(concept.property[0], PropertyValue::code(PARENT, "1"));
        let curated: Vec<_> = concept.properties_named(IS_CURATED).collect();
        assert_eq!(curated, vec![&PropertyValueKind::Boolean(true)]);

        let top = concept_for(&tree, "1").unwrap();
        assert_eq!(top.properties_named(PARENT).count(), 0);
        let top_curated = top
            .properties_named(IS_CURATED)
            .find_map(PropertyValueKind::as_bool);
        assert_eq!(top_curated, Some(false));
    }

    #[test]
    fn details_of_the_wrong_kind_are_rejected() {
        let kind = ClassificationKind::Procedure;
        let mut builder = NodeTreeBuilder::new(kind, "2021", "OPS 2021");
        builder
            .add(NodeId::ROOT, "A00", "Cholera", NodeDetails::Disease(DiseaseDetails::default()))
            .unwrap();
        let tree = builder.finish();

        let err = concept_for(&tree, "A00").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::KindMismatch { expected: ClassificationKind::Procedure, .. }
        ));
    }
}

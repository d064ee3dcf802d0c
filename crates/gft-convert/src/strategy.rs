//! Per-kind conversion strategies.
//!
//! Each [`ClassificationKind`] owns a fixed property definition table and a
//! function that derives a node's property values. Supporting a new catalog
//! means adding a variant and a row to [`STRATEGIES`].

use gft_model::{
    ClassificationKind, PropertyDefinition, PropertyType, PropertyValue, ResourceKind,
};
use gft_source::{DiseaseDetails, NodeDetails, ProcedureDetails, VersionedNode};

use crate::error::{ConvertError, Result};

pub const PARENT: &str = "parent";
pub const INCLUSION: &str = "inclusion";
pub const EXCLUSION: &str = "exclusion";
pub const HINT: &str = "hint";
pub const IS_CURATED: &str = "is-curated";

/// Property table and builder for one classification kind.
#[derive(Debug)]
pub struct ConversionStrategy {
    pub kind: ClassificationKind,
    definitions: fn() -> Vec<PropertyDefinition>,
    properties: fn(&VersionedNode, &mut Vec<PropertyValue>) -> Result<()>,
}

impl ConversionStrategy {
    /// Property definitions declared on every model of this kind.
    #[must_use]
    pub fn property_definitions(&self) -> Vec<PropertyDefinition> {
        (self.definitions)()
    }

    /// Append the kind-specific properties of `node` to `out`.
    pub fn kind_properties(
        &self,
        node: &VersionedNode,
        out: &mut Vec<PropertyValue>,
    ) -> Result<()> {
        (self.properties)(node, out)
    }
}

static STRATEGIES: [ConversionStrategy; 2] = [
    ConversionStrategy {
        kind: ClassificationKind::ClassificationOfDiseases,
        definitions: disease_definitions,
        properties: disease_properties,
    },
    ConversionStrategy {
        kind: ClassificationKind::Procedure,
        definitions: procedure_definitions,
        properties: procedure_properties,
    },
];

/// Strategy for a classification kind.
#[must_use]
pub fn strategy(kind: ClassificationKind) -> &'static ConversionStrategy {
    match kind {
        ClassificationKind::ClassificationOfDiseases => &STRATEGIES[0],
        ClassificationKind::Procedure => &STRATEGIES[1],
    }
}

/// Strategy for a resource kind, failing for kinds without one.
pub fn strategy_for(kind: ResourceKind) -> Result<&'static ConversionStrategy> {
    Ok(strategy(kind.classification()?))
}

fn common_definitions() -> Vec<PropertyDefinition> {
    vec![
        PropertyDefinition::new(PARENT, PropertyType::Code, "Parent code in the hierarchy"),
        PropertyDefinition::new(INCLUSION, PropertyType::String, "Inclusion criterion"),
        PropertyDefinition::new(EXCLUSION, PropertyType::String, "Exclusion criterion"),
        PropertyDefinition::new(HINT, PropertyType::String, "Coding hint"),
    ]
}

fn disease_definitions() -> Vec<PropertyDefinition> {
    common_definitions()
}

fn procedure_definitions() -> Vec<PropertyDefinition> {
    let mut definitions = common_definitions();
    definitions.push(PropertyDefinition::new(
        IS_CURATED,
        PropertyType::Boolean,
        "Code was added for billing outside the official catalog",
    ));
    definitions
}

/// Pair criteria texts with their optional reference codes.
///
/// `"hypertension"` with code `I10` becomes `"hypertension (I10)"`.
fn paired_criteria(
    node: &VersionedNode,
    field: &'static str,
    texts: &[String],
    codes: &[Option<String>],
) -> Result<Vec<String>> {
    if texts.len() != codes.len() {
        return Err(ConvertError::InvariantViolation {
            code: node.code().to_string(),
            field,
            texts: texts.len(),
            codes: codes.len(),
        });
    }
    Ok(texts
        .iter()
        .zip(codes)
        .map(|(text, code)| match code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => format!("{text} ({code})"),
            _ => text.clone(),
        })
        .collect())
}

fn disease_details(node: &VersionedNode) -> Result<&DiseaseDetails> {
    match node.details() {
        NodeDetails::Disease(details) => Ok(details),
        NodeDetails::Root | NodeDetails::Procedure(_) => Err(ConvertError::KindMismatch {
            code: node.code().to_string(),
            expected: ClassificationKind::ClassificationOfDiseases,
        }),
    }
}

fn procedure_details(node: &VersionedNode) -> Result<&ProcedureDetails> {
    match node.details() {
        NodeDetails::Procedure(details) => Ok(details),
        NodeDetails::Root | NodeDetails::Disease(_) => Err(ConvertError::KindMismatch {
            code: node.code().to_string(),
            expected: ClassificationKind::Procedure,
        }),
    }
}

fn disease_properties(node: &VersionedNode, out: &mut Vec<PropertyValue>) -> Result<()> {
    let details = disease_details(node)?;
    let inclusions =
        paired_criteria(node, INCLUSION, &details.inclusions, &details.inclusion_codes)?;
    let exclusions =
        paired_criteria(node, EXCLUSION, &details.exclusions, &details.exclusion_codes)?;
    out.extend(inclusions.into_iter().map(|text| PropertyValue::string(INCLUSION, text)));
    out.extend(exclusions.into_iter().map(|text| PropertyValue::string(EXCLUSION, text)));
    out.extend(details.hints.iter().map(|hint| PropertyValue::string(HINT, hint.as_str())));
    Ok(())
}

fn procedure_properties(node: &VersionedNode, out: &mut Vec<PropertyValue>) -> Result<()> {
    let details = procedure_details(node)?;
    out.extend(
        details
            .inclusions
            .iter()
            .map(|text| PropertyValue::string(INCLUSION, text.as_str())),
    );
    out.extend(
        details
            .exclusions
            .iter()
            .map(|text| PropertyValue::string(EXCLUSION, text.as_str())),
    );
    out.extend(details.hints.iter().map(|hint| PropertyValue::string(HINT, hint.as_str())));
    out.push(PropertyValue::boolean(IS_CURATED, details.curated));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gft_model::ModelError;

    #[test]
    fn procedure_table_extends_disease_table() {
        let disease = strategy(ClassificationKind::ClassificationOfDiseases).property_definitions();
        let procedure = strategy(ClassificationKind::Procedure).property_definitions();
        assert_eq!(&procedure[..disease.len()], disease.as_slice());
        assert_eq!(procedure.last().map(|d| d.code.as_str()), Some(IS_CURATED));
        assert!(disease.iter().all(|d| d.code != IS_CURATED));
    }

    #[test]
    fn strategies_are_keyed_by_kind() {
        for kind in [
            ClassificationKind::ClassificationOfDiseases,
            ClassificationKind::Procedure,
        ] {
            assert_eq!(strategy(kind).kind, kind);
        }
    }

    #[test]
    fn unsupported_resource_kinds_have_no_strategy() {
        let err = strategy_for(ResourceKind::IcdO).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedKind(ModelError::UnsupportedKind { .. })
        ));
        assert!(strategy_for(ResourceKind::Ops).is_ok());
    }
}

//! Shared types for converting German classifications into FHIR CodeSystems.

pub mod code_system;
pub mod duplicate;
pub mod error;
pub mod kind;

pub use code_system::{
    CodeSystemModel, ConceptDefinition, ContentMode, PropertyDefinition, PropertyType,
    PropertyValue, PropertyValueKind, PublicationStatus,
};
pub use duplicate::{DuplicateOccurrence, DuplicateReport};
pub use error::{ModelError, Result};
pub use kind::{
    ClassificationKind, Namespace, NamespaceSelector, ResourceKind, artifact_file_name,
    canonical_url,
};

/// Code carried by the synthetic node anchoring every classification tree.
pub const ROOT_CODE: &str = "ROOT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_value_uses_fhir_choice_keys() {
        let json = serde_json::to_string(&PropertyValue::code("parent", "A00")).unwrap();
        assert_eq!(json, r#"{"code":"parent","valueCode":"A00"}"#);

        let json = serde_json::to_string(&PropertyValue::boolean("is-curated", true)).unwrap();
        assert_eq!(json, r#"{"code":"is-curated","valueBoolean":true}"#);
    }

    #[test]
    fn model_serializes_with_resource_type() {
        let model = CodeSystemModel::new("OPS", "OPS 2021", "2021", vec![])
            .with_concepts(vec![ConceptDefinition::new("1-10", "Klinische Untersuchung")]);
        let json = serde_json::to_value(&model).expect("serialize model");
        assert_eq!(json["resourceType"], "CodeSystem");
        assert_eq!(json["status"], "active");
        assert_eq!(json["content"], "complete");
        assert_eq!(json["count"], 1);
        assert!(json.get("url").is_none());
        assert!(json["concept"][0].get("property").is_none());
    }
}

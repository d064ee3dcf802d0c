//! Flat FHIR R4 `CodeSystem` produced by the converter.
//!
//! Only the subset of the resource the converter fills in is modeled. Property
//! values use the FHIR choice-type encoding, so a property serializes as
//! `{"code": "hint", "valueString": "..."}`.

use serde::{Deserialize, Serialize};

/// Publication status of the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Draft,
    #[default]
    Active,
    Retired,
}

/// How much of the code system the resource carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentMode {
    NotPresent,
    Fragment,
    #[default]
    Complete,
}

/// Declared type of a concept property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Code,
    String,
    Boolean,
}

/// Entry in the resource's property definition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub code: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
}

impl PropertyDefinition {
    pub fn new(code: &str, property_type: PropertyType, description: &str) -> Self {
        Self {
            code: code.to_string(),
            property_type,
            description: description.to_string(),
        }
    }
}

/// Typed value of a concept property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValueKind {
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueCode")]
    Code(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
}

impl PropertyValueKind {
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        match self {
            Self::String(_) => PropertyType::String,
            Self::Code(_) => PropertyType::Code,
            Self::Boolean(_) => PropertyType::Boolean,
        }
    }

    /// Textual value for string and code properties.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::Code(value) => Some(value),
            Self::Boolean(_) => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            Self::String(_) | Self::Code(_) => None,
        }
    }
}

/// A property attached to one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub code: String,
    #[serde(flatten)]
    pub value: PropertyValueKind,
}

impl PropertyValue {
    pub fn string(code: &str, value: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            value: PropertyValueKind::String(value.into()),
        }
    }

    pub fn code(code: &str, value: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            value: PropertyValueKind::Code(value.into()),
        }
    }

    pub fn boolean(code: &str, value: bool) -> Self {
        Self {
            code: code.to_string(),
            value: PropertyValueKind::Boolean(value),
        }
    }
}

/// One concept of the code system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDefinition {
    pub code: String,
    pub display: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property: Vec<PropertyValue>,
}

impl ConceptDefinition {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
            property: Vec::new(),
        }
    }

    /// All properties with the given code, in insertion order.
    pub fn properties_named<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a PropertyValueKind> + 'a {
        self.property
            .iter()
            .filter(move |property| property.code == code)
            .map(|property| &property.value)
    }
}

/// The terminology resource written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemModel {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub version: String,
    pub name: String,
    pub title: String,
    pub status: PublicationStatus,
    pub content: ContentMode,
    pub count: usize,
    #[serde(default)]
    pub property: Vec<PropertyDefinition>,
    #[serde(default)]
    pub concept: Vec<ConceptDefinition>,
}

impl CodeSystemModel {
    /// Create an empty model whose property table is fixed from the start.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        version: impl Into<String>,
        property: Vec<PropertyDefinition>,
    ) -> Self {
        Self {
            resource_type: "CodeSystem".to_string(),
            url: None,
            version: version.into(),
            name: name.into(),
            title: title.into(),
            status: PublicationStatus::default(),
            content: ContentMode::default(),
            count: 0,
            property,
            concept: Vec::new(),
        }
    }

    /// Replace the concept list, keeping `count` in step.
    #[must_use]
    pub fn with_concepts(mut self, concepts: Vec<ConceptDefinition>) -> Self {
        self.count = concepts.len();
        self.concept = concepts;
        self
    }

    /// Copy of the model identified by `url`.
    #[must_use]
    pub fn with_url(&self, url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..self.clone()
        }
    }

    pub fn property_definition(&self, code: &str) -> Option<&PropertyDefinition> {
        self.property.iter().find(|definition| definition.code == code)
    }

    pub fn concept(&self, code: &str) -> Option<&ConceptDefinition> {
        self.concept.iter().find(|concept| concept.code == code)
    }
}

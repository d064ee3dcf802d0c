//! Resource kinds, publisher namespaces, and the canonical URL table.
//!
//! Each published catalog is distributed under one canonical URL per
//! publisher namespace:
//!
//! | Kind    | DIMDI                                       | BFARM                                       |
//! |---------|---------------------------------------------|---------------------------------------------|
//! | ICD10GM | `http://fhir.de/CodeSystem/dimdi/icd-10-gm` | `http://fhir.de/CodeSystem/bfarm/icd-10-gm` |
//! | OPS     | `http://fhir.de/CodeSystem/dimdi/ops`       | `http://fhir.de/CodeSystem/bfarm/ops`       |
//!
//! `ALPHAID` and `ICDO` are declared so they can be named on the command line,
//! but no stage of the converter supports them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

const URL_ICD_DIMDI: &str = "http://fhir.de/CodeSystem/dimdi/icd-10-gm";
const URL_ICD_BFARM: &str = "http://fhir.de/CodeSystem/bfarm/icd-10-gm";
const URL_OPS_DIMDI: &str = "http://fhir.de/CodeSystem/dimdi/ops";
const URL_OPS_BFARM: &str = "http://fhir.de/CodeSystem/bfarm/ops";

/// A German classification catalog the tool knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "ICD10GM")]
    Icd10Gm,
    #[serde(rename = "OPS")]
    Ops,
    #[serde(rename = "ALPHAID")]
    AlphaId,
    #[serde(rename = "ICDO")]
    IcdO,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [Self::Icd10Gm, Self::Ops, Self::AlphaId, Self::IcdO];

    /// Upper-case identifier used in artifact names and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Icd10Gm => "ICD10GM",
            Self::Ops => "OPS",
            Self::AlphaId => "ALPHAID",
            Self::IcdO => "ICDO",
        }
    }

    /// Resolve the conversion strategy tag for this kind.
    pub fn classification(self) -> Result<ClassificationKind> {
        ClassificationKind::try_from(self)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// Closed set of tree shapes the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
    /// ICD-10-GM: criteria may carry paired reference codes.
    ClassificationOfDiseases,
    /// OPS: plain-text criteria plus a curation flag.
    Procedure,
}

impl ClassificationKind {
    #[must_use]
    pub const fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::ClassificationOfDiseases => ResourceKind::Icd10Gm,
            Self::Procedure => ResourceKind::Ops,
        }
    }
}

impl TryFrom<ResourceKind> for ClassificationKind {
    type Error = ModelError;

    fn try_from(kind: ResourceKind) -> Result<Self> {
        match kind {
            ResourceKind::Icd10Gm => Ok(Self::ClassificationOfDiseases),
            ResourceKind::Ops => Ok(Self::Procedure),
            ResourceKind::AlphaId | ResourceKind::IcdO => Err(ModelError::UnsupportedKind {
                kind,
                stage: "conversion",
            }),
        }
    }
}

/// Publisher namespace an artifact is issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Dimdi,
    Bfarm,
}

impl Namespace {
    /// Lower-case label used in artifact file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dimdi => "dimdi",
            Self::Bfarm => "bfarm",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which namespaces a run should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespaceSelector {
    Dimdi,
    Bfarm,
    #[default]
    Both,
}

impl NamespaceSelector {
    /// Expand the selector into concrete namespaces, DIMDI first.
    #[must_use]
    pub const fn namespaces(&self) -> &'static [Namespace] {
        match self {
            Self::Dimdi => &[Namespace::Dimdi],
            Self::Bfarm => &[Namespace::Bfarm],
            Self::Both => &[Namespace::Dimdi, Namespace::Bfarm],
        }
    }
}

/// Look up the canonical URL of `kind` under `namespace`.
pub fn canonical_url(kind: ResourceKind, namespace: Namespace) -> Result<&'static str> {
    match (kind, namespace) {
        (ResourceKind::Icd10Gm, Namespace::Dimdi) => Ok(URL_ICD_DIMDI),
        (ResourceKind::Icd10Gm, Namespace::Bfarm) => Ok(URL_ICD_BFARM),
        (ResourceKind::Ops, Namespace::Dimdi) => Ok(URL_OPS_DIMDI),
        (ResourceKind::Ops, Namespace::Bfarm) => Ok(URL_OPS_BFARM),
        (ResourceKind::AlphaId | ResourceKind::IcdO, _) => Err(ModelError::UnsupportedKind {
            kind,
            stage: "canonical URL",
        }),
    }
}

/// Deterministic artifact file name: `{kind}-{namespace}-{version}.json`.
#[must_use]
pub fn artifact_file_name(kind: ResourceKind, namespace: Namespace, version: &str) -> String {
    format!("{kind}-{namespace}-{version}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("icd10gm".parse::<ResourceKind>(), Ok(ResourceKind::Icd10Gm));
        assert_eq!(" OPS ".parse::<ResourceKind>(), Ok(ResourceKind::Ops));
        assert!(matches!(
            "loinc".parse::<ResourceKind>(),
            Err(ModelError::UnknownKind(_))
        ));
    }

    #[test]
    fn declared_kinds_without_strategy_are_unsupported() {
        for kind in [ResourceKind::AlphaId, ResourceKind::IcdO] {
            assert!(matches!(
                kind.classification(),
                Err(ModelError::UnsupportedKind { .. })
            ));
            assert!(canonical_url(kind, Namespace::Bfarm).is_err());
        }
    }

    #[test]
    fn both_expands_dimdi_first() {
        assert_eq!(
            NamespaceSelector::Both.namespaces(),
            &[Namespace::Dimdi, Namespace::Bfarm]
        );
        assert_eq!(NamespaceSelector::default(), NamespaceSelector::Both);
    }

    #[test]
    fn artifact_names_use_lowercase_namespace() {
        assert_eq!(
            artifact_file_name(ResourceKind::Icd10Gm, Namespace::Dimdi, "2023"),
            "ICD10GM-dimdi-2023.json"
        );
        assert_eq!(
            artifact_file_name(ResourceKind::Ops, Namespace::Bfarm, "1.3"),
            "OPS-bfarm-1.3.json"
        );
    }
}

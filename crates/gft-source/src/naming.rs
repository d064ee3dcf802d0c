//! Catalog titles.
//!
//! Catalogs published under a four-digit year carry the modern names
//! (`ICD-10-GM`, `OPS`); the early releases numbered `1.1` to `2.0` were
//! published as `ICD-10 SGB V` and `OPS-301`.

use gft_model::ClassificationKind;

fn is_year_version(version: &str) -> bool {
    let version = version.trim();
    version.len() == 4 && version.bytes().all(|b| b.is_ascii_digit())
}

/// Human-readable title for a catalog version.
#[must_use]
pub fn catalog_title(kind: ClassificationKind, version: &str) -> String {
    let modern = is_year_version(version);
    match kind {
        ClassificationKind::ClassificationOfDiseases if modern => {
            format!("ICD-10-GM Version {version}")
        }
        ClassificationKind::ClassificationOfDiseases => format!("ICD-10 SGB V Version {version}"),
        ClassificationKind::Procedure if modern => format!("OPS {version}"),
        ClassificationKind::Procedure => format!("OPS-301 Version {version}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_versions_use_modern_titles() {
        assert_eq!(
            catalog_title(ClassificationKind::ClassificationOfDiseases, "2004"),
            "ICD-10-GM Version 2004"
        );
        assert_eq!(catalog_title(ClassificationKind::Procedure, "2021"), "OPS 2021");
    }

    #[test]
    fn early_versions_use_legacy_titles() {
        assert_eq!(
            catalog_title(ClassificationKind::ClassificationOfDiseases, "1.3"),
            "ICD-10 SGB V Version 1.3"
        );
        assert_eq!(
            catalog_title(ClassificationKind::Procedure, "2.0"),
            "OPS-301 Version 2.0"
        );
    }
}

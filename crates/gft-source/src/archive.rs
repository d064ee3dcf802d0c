//! Chapter discovery inside a catalog archive.
//!
//! ICD-10-GM archives ship one document per chapter (`KAP01.SGM`,
//! `KAP02.SGM`, ...). Some releases also carry a second copy of the chapters
//! under an `x1ses*` directory, which is skipped. OPS archives ship a single
//! `OP301.SGM` document.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::LazyLock;

use gft_model::ClassificationKind;
use regex::Regex;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{Result, SourceError};

static CHAPTER_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|/)kap\d{2}\.sgm$").expect("Invalid chapter regex"));

const SKIPPED_CHAPTER_PREFIX: &str = "x1ses";
const PROCEDURE_FILE_NAME: &str = "op301.sgm";

/// Leading signatures of local file header, empty archive, and spanned archive.
const ZIP_SIGNATURES: [[u8; 4]; 3] = [
    [0x50, 0x4B, 0x03, 0x04],
    [0x50, 0x4B, 0x05, 0x06],
    [0x50, 0x4B, 0x07, 0x08],
];

/// One chapter document read from the archive.
#[derive(Debug, Clone)]
pub struct ChapterDocument {
    /// Path of the entry inside the archive.
    pub path: String,
    pub contents: Vec<u8>,
}

/// Check whether a file starts with a ZIP signature.
///
/// Unreadable or short files are reported as not being archives.
pub fn is_zip_archive(path: &Path) -> bool {
    let mut signature = [0u8; 4];
    let read = File::open(path).and_then(|mut file| file.read_exact(&mut signature));
    read.is_ok() && ZIP_SIGNATURES.contains(&signature)
}

/// Whether an archive entry holds a chapter document for `kind`.
pub fn is_chapter_entry(kind: ClassificationKind, entry_name: &str) -> bool {
    match kind {
        ClassificationKind::ClassificationOfDiseases => {
            CHAPTER_FILE_REGEX.is_match(entry_name)
                && !entry_name
                    .to_ascii_lowercase()
                    .contains(SKIPPED_CHAPTER_PREFIX)
        }
        ClassificationKind::Procedure => entry_name
            .rsplit('/')
            .next()
            .is_some_and(|name| name.eq_ignore_ascii_case(PROCEDURE_FILE_NAME)),
    }
}

/// Read every chapter document for `kind`, sorted by entry path.
pub fn read_chapters<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    kind: ClassificationKind,
    archive_path: &Path,
) -> Result<Vec<ChapterDocument>> {
    let mut chapters = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| SourceError::Archive {
                path: archive_path.to_path_buf(),
                source,
            })?;
        if entry.is_dir() || !is_chapter_entry(kind, entry.name()) {
            continue;
        }
        let path = entry.name().to_string();
        let mut contents = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut contents)
            .map_err(|source| SourceError::Io {
                path: archive_path.join(&path),
                source,
            })?;
        debug!(entry = %path, bytes = contents.len(), "chapter document found");
        chapters.push(ChapterDocument { path, contents });
    }
    chapters.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_disease_chapter_names() {
        let kind = ClassificationKind::ClassificationOfDiseases;
        assert!(is_chapter_entry(kind, "x1gsgml2023/KAP01.SGM"));
        assert!(is_chapter_entry(kind, "kap22.sgm"));
        assert!(!is_chapter_entry(kind, "x1ses2_0/KAP01.SGM"));
        assert!(!is_chapter_entry(kind, "x1gsgml2023/KAP1.SGM"));
        assert!(!is_chapter_entry(kind, "x1gsgml2023/BKAP01.SGM"));
    }

    #[test]
    fn matches_procedure_document_name() {
        let kind = ClassificationKind::Procedure;
        assert!(is_chapter_entry(kind, "p1ssgml/OP301.SGM"));
        assert!(is_chapter_entry(kind, "op301.sgm"));
        assert!(!is_chapter_entry(kind, "p1ssgml/KAP01.SGM"));
    }

    #[test]
    fn detects_zip_signature() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("catalog.zip");
        std::fs::write(&zip_path, [0x50, 0x4B, 0x05, 0x06, 0, 0]).unwrap();
        let text_path = dir.path().join("catalog.txt");
        std::fs::write(&text_path, b"not an archive").unwrap();

        assert!(is_zip_archive(&zip_path));
        assert!(!is_zip_archive(&text_path));
        assert!(!is_zip_archive(&dir.path().join("missing.zip")));
    }
}

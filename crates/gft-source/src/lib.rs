//! Classification tree sources.
//!
//! Turns a catalog archive into a read-only [`NodeTree`]: the archive is
//! scanned for chapter documents, each document is handed to a
//! [`ChapterParser`], and the parsed classes are attached below a synthetic
//! root node.

pub mod archive;
pub mod error;
pub mod markup;
pub mod naming;
pub mod node;
pub mod source;

pub use archive::{ChapterDocument, is_zip_archive};
pub use error::{Result, SourceError};
pub use markup::{ChapterParser, MarkupChapterParser};
pub use naming::catalog_title;
pub use node::{
    DiseaseDetails, NodeDetails, NodeId, NodeTree, NodeTreeBuilder, ProcedureDetails,
    VersionedNode,
};
pub use source::{ArchiveNodeSource, NodeSource};

//! In-memory classification tree.
//!
//! Nodes live in an arena owned by [`NodeTree`]; parents and children are
//! referenced by [`NodeId`]. Index 0 is always the synthetic root, which is
//! marked by [`NodeDetails::Root`] rather than recognised by its code.

use gft_model::{ClassificationKind, ROOT_CODE};

use crate::error::{Result, SourceError};

/// Index of a node inside its [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root of every tree.
    pub const ROOT: NodeId = NodeId(0);
}

/// Criteria attached to an ICD-10-GM node.
///
/// Inclusion and exclusion texts are paired index-by-index with optional
/// reference codes; the two lists are expected to have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseDetails {
    pub inclusions: Vec<String>,
    pub inclusion_codes: Vec<Option<String>>,
    pub exclusions: Vec<String>,
    pub exclusion_codes: Vec<Option<String>>,
    pub hints: Vec<String>,
}

impl DiseaseDetails {
    pub fn with_inclusion(mut self, text: &str, code: Option<&str>) -> Self {
        self.inclusions.push(text.to_string());
        self.inclusion_codes.push(code.map(str::to_string));
        self
    }

    pub fn with_exclusion(mut self, text: &str, code: Option<&str>) -> Self {
        self.exclusions.push(text.to_string());
        self.exclusion_codes.push(code.map(str::to_string));
        self
    }

    pub fn with_hint(mut self, text: &str) -> Self {
        self.hints.push(text.to_string());
        self
    }
}

/// Criteria attached to an OPS node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureDetails {
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub hints: Vec<String>,
    /// Code was added for billing outside the official catalog.
    pub curated: bool,
}

impl ProcedureDetails {
    pub fn with_inclusion(mut self, text: &str) -> Self {
        self.inclusions.push(text.to_string());
        self
    }

    pub fn with_exclusion(mut self, text: &str) -> Self {
        self.exclusions.push(text.to_string());
        self
    }

    pub fn with_hint(mut self, text: &str) -> Self {
        self.hints.push(text.to_string());
        self
    }

    pub fn curated(mut self, curated: bool) -> Self {
        self.curated = curated;
        self
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetails {
    Root,
    Disease(DiseaseDetails),
    Procedure(ProcedureDetails),
}

impl NodeDetails {
    /// Empty details matching the tree's classification kind.
    #[must_use]
    pub fn empty_for(kind: ClassificationKind) -> Self {
        match kind {
            ClassificationKind::ClassificationOfDiseases => {
                Self::Disease(DiseaseDetails::default())
            }
            ClassificationKind::Procedure => Self::Procedure(ProcedureDetails::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VersionedNode {
    id: NodeId,
    code: String,
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    details: NodeDetails,
}

impl VersionedNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn details(&self) -> &NodeDetails {
        &self.details
    }

    pub fn is_root(&self) -> bool {
        matches!(self.details, NodeDetails::Root)
    }
}

/// A read-only classification tree for one catalog version.
#[derive(Debug, Clone)]
pub struct NodeTree {
    kind: ClassificationKind,
    version: String,
    title: String,
    nodes: Vec<VersionedNode>,
}

impl NodeTree {
    pub fn kind(&self) -> ClassificationKind {
        self.kind
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable catalog title, e.g. `ICD-10-GM Version 2023`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root(&self) -> &VersionedNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&VersionedNode> {
        self.nodes.get(id.0)
    }

    /// Resolved parent of a node, if it has one.
    pub fn parent_of(&self, node: &VersionedNode) -> Option<&VersionedNode> {
        node.parent.and_then(|id| self.get(id))
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Nodes in insertion order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &VersionedNode> {
        self.nodes.iter()
    }
}

/// Incremental constructor for [`NodeTree`].
#[derive(Debug)]
pub struct NodeTreeBuilder {
    tree: NodeTree,
}

impl NodeTreeBuilder {
    pub fn new(kind: ClassificationKind, version: &str, title: &str) -> Self {
        let root = VersionedNode {
            id: NodeId::ROOT,
            code: ROOT_CODE.to_string(),
            label: title.to_string(),
            parent: None,
            children: Vec::new(),
            details: NodeDetails::Root,
        };
        Self {
            tree: NodeTree {
                kind,
                version: version.to_string(),
                title: title.to_string(),
                nodes: vec![root],
            },
        }
    }

    pub fn kind(&self) -> ClassificationKind {
        self.tree.kind
    }

    /// Append a node as the last child of `parent`.
    pub fn add(
        &mut self,
        parent: NodeId,
        code: &str,
        label: &str,
        details: NodeDetails,
    ) -> Result<NodeId> {
        if code == ROOT_CODE {
            return Err(SourceError::MalformedTree {
                message: format!("code '{ROOT_CODE}' is reserved for the synthetic root"),
            });
        }
        if matches!(details, NodeDetails::Root) {
            return Err(SourceError::MalformedTree {
                message: format!("node '{code}' cannot carry root details"),
            });
        }
        let id = NodeId(self.tree.nodes.len());
        let parent_node =
            self.tree
                .nodes
                .get_mut(parent.0)
                .ok_or_else(|| SourceError::MalformedTree {
                    message: format!("parent {} of node '{code}' does not exist", parent.0),
                })?;
        parent_node.children.push(id);
        self.tree.nodes.push(VersionedNode {
            id,
            code: code.to_string(),
            label: label.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            details,
        });
        Ok(id)
    }

    pub fn finish(self) -> NodeTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_explicitly_marked() {
        let tree = NodeTreeBuilder::new(ClassificationKind::Procedure, "2021", "OPS 2021").finish();
        assert!(tree.root().is_root());
        assert_eq!(tree.root().code(), ROOT_CODE);
        assert!(tree.root().parent().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn children_keep_insertion_order() {
        let kind = ClassificationKind::ClassificationOfDiseases;
        let mut builder = NodeTreeBuilder::new(kind, "2023", "ICD-10-GM Version 2023");
        let chapter = builder
            .add(NodeId::ROOT, "I", "Infektionen", NodeDetails::empty_for(kind))
            .unwrap();
        let a00 = builder
            .add(chapter, "A00", "Cholera", NodeDetails::empty_for(kind))
            .unwrap();
        let a01 = builder
            .add(chapter, "A01", "Typhus", NodeDetails::empty_for(kind))
            .unwrap();
        let tree = builder.finish();

        let chapter_node = tree.get(chapter).unwrap();
        assert_eq!(chapter_node.children(), &[a00, a01]);
        assert_eq!(
            tree.parent_of(tree.get(a01).unwrap()).map(VersionedNode::code),
            Some("I")
        );
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn rejects_reserved_root_code() {
        let kind = ClassificationKind::Procedure;
        let mut builder = NodeTreeBuilder::new(kind, "2021", "OPS 2021");
        let err = builder
            .add(NodeId::ROOT, ROOT_CODE, "fake", NodeDetails::empty_for(kind))
            .unwrap_err();
        assert!(matches!(err, SourceError::MalformedTree { .. }));
    }

    #[test]
    fn rejects_unknown_parent() {
        let kind = ClassificationKind::Procedure;
        let mut builder = NodeTreeBuilder::new(kind, "2021", "OPS 2021");
        let err = builder
            .add(NodeId(7), "1-10", "x", NodeDetails::empty_for(kind))
            .unwrap_err();
        assert!(err.is_malformed_source());
    }
}

//! Pre-order flattening of a classification tree.

use gft_source::{NodeTree, VersionedNode};

/// A node in traversal order together with its resolved parent.
#[derive(Debug, Clone, Copy)]
pub struct WalkedNode<'a> {
    pub node: &'a VersionedNode,
    /// Direct parent, which is the synthetic root for top-level nodes.
    pub parent: Option<&'a VersionedNode>,
}

impl<'a> WalkedNode<'a> {
    /// Parent worth referencing from a concept: present and not the root.
    #[must_use]
    pub fn concept_parent(&self) -> Option<&'a VersionedNode> {
        self.parent.filter(|parent| !parent.is_root())
    }
}

/// Flatten `tree` depth-first in pre-order, root included.
///
/// Every node is visited exactly once, parents before children, and
/// siblings in the order the source produced them. The traversal keeps an
/// explicit stack so deep trees do not grow the call stack.
pub fn flatten(tree: &NodeTree) -> Vec<WalkedNode<'_>> {
    let mut walked = Vec::with_capacity(tree.len());
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        walked.push(WalkedNode {
            node,
            parent: tree.parent_of(node),
        });
        stack.extend(
            node.children()
                .iter()
                .rev()
                .filter_map(|id| tree.get(*id)),
        );
    }
    walked
}

#[cfg(test)]
mod tests {
    use super::*;
    use gft_model::ClassificationKind;
    use gft_source::{NodeDetails, NodeId, NodeTreeBuilder};

    fn sample_tree() -> NodeTree {
        let kind = ClassificationKind::Procedure;
        let details = || NodeDetails::empty_for(kind);
        let mut builder = NodeTreeBuilder::new(kind, "2021", "OPS 2021");
        let one = builder.add(NodeId::ROOT, "1", "Diagnostik", details()).unwrap();
        let one_ten = builder.add(one, "1-10", "Untersuchung", details()).unwrap();
        builder.add(one_ten, "1-100", "Narkose", details()).unwrap();
        builder.add(one, "1-20", "Neurologie", details()).unwrap();
        builder.add(NodeId::ROOT, "5", "Operationen", details()).unwrap();
        builder.finish()
    }

    #[test]
    fn visits_in_pre_order_with_root_first() {
        let tree = sample_tree();
        let codes: Vec<&str> = flatten(&tree).iter().map(|w| w.node.code()).collect();
        assert_eq!(codes, vec!["ROOT", "1", "1-10", "1-100", "1-20", "5"]);
    }

    #[test]
    fn parents_precede_children() {
        let tree = sample_tree();
        let walked = flatten(&tree);
        for (position, entry) in walked.iter().enumerate() {
            if let Some(parent) = entry.parent {
                let parent_position = walked
                    .iter()
                    .position(|w| w.node.id() == parent.id())
                    .unwrap();
                assert!(parent_position < position);
            }
        }
        assert_eq!(walked.len(), tree.len());
    }

    #[test]
    fn top_level_nodes_have_no_concept_parent() {
        let tree = sample_tree();
        let walked = flatten(&tree);
        let top = walked.iter().find(|w| w.node.code() == "1").unwrap();
        assert_eq!(top.parent.map(VersionedNode::code), Some("ROOT"));
        assert!(top.concept_parent().is_none());
        let nested = walked.iter().find(|w| w.node.code() == "1-100").unwrap();
        assert_eq!(nested.concept_parent().map(VersionedNode::code), Some("1-10"));
    }
}

//! Expected-type bridge (C8): walks up the ancestry while the child is the
//! sole child of its parent, asking an external oracle for the expected
//! type at each step and keeping the deepest informative answer.

use tracing::instrument;

use crate::active_node::ActiveNode;
use crate::error::Result;
use crate::graph::{NodeGraph, NodeKind, PrimitiveType};

/// What the surrounding grammar expects at a given attribute slot. Kept
/// distinct from `PrimitiveType` since an oracle may answer with something
/// coarser than a primitive (e.g. "any").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    Any,
}

/// External collaborator that knows the language's type rules; the
/// inspection core has no notion of types beyond what this reports.
pub trait TypeOracle {
    fn expected_type(&self, parent_kind: NodeKind, child_attribute_index: u8) -> Option<Type>;
}

impl<F> TypeOracle for F
where
    F: Fn(NodeKind, u8) -> Option<Type>,
{
    fn expected_type(&self, parent_kind: NodeKind, child_attribute_index: u8) -> Option<Type> {
        self(parent_kind, child_attribute_index)
    }
}

#[instrument(skip(graph, active_node, type_oracle))]
pub fn try_expected_type(
    graph: &NodeGraph,
    active_node: &ActiveNode,
    type_oracle: &dyn TypeOracle,
) -> Result<Option<Type>> {
    let ancestry = &active_node.ancestry;
    let mut best = None;

    for i in 0..ancestry.len() - 1 {
        let child = &ancestry[i];
        let parent = &ancestry[i + 1];

        let only_child = graph.children(parent.id())?.len() == 1;
        if !only_child {
            break;
        }

        let Some(child_attribute_index) = child.attribute_index() else {
            break;
        };

        if let Some(answer) = type_oracle.expected_type(parent.kind(), child_attribute_index) {
            best = Some(answer);
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_node::ActiveNode;
    use crate::graph::builder::GraphBuilder;
    use crate::position::Position;

    #[test]
    fn keeps_deepest_informative_answer_while_sole_child() {
        let mut b = GraphBuilder::new();
        let leaf = b.ast_leaf(NodeKind::LiteralExpression, 0, 0, 0, 1, Some(0));
        let middle = b.ast_leaf(NodeKind::ParenthesizedExpression, 0, 0, 0, 3, Some(0));
        let root = b.ast_leaf(NodeKind::LetExpression, 0, 0, 0, 3, None);
        b.set_parent(leaf, middle);
        b.set_parent(middle, root);
        b.set_children(middle, vec![Some(leaf)]);
        b.set_children(root, vec![Some(middle)]);
        let graph = b.build();

        let active = ActiveNode {
            position: Position::new(0, 0),
            ancestry: graph.ancestry(leaf).unwrap(),
            maybe_identifier_under_position: None,
        };

        let oracle = |parent_kind: NodeKind, _attr: u8| match parent_kind {
            NodeKind::ParenthesizedExpression => Some(Type::Primitive(PrimitiveType::Number)),
            NodeKind::LetExpression => None,
            _ => None,
        };

        let result = try_expected_type(&graph, &active, &oracle).unwrap();
        assert_eq!(result, Some(Type::Primitive(PrimitiveType::Number)));
    }

    #[test]
    fn stops_at_first_multi_child_parent() {
        let mut b = GraphBuilder::new();
        let leaf = b.ast_leaf(NodeKind::LiteralExpression, 0, 0, 0, 1, Some(0));
        let sibling = b.ast_leaf(NodeKind::LiteralExpression, 0, 2, 0, 3, Some(1));
        let root = b.ast_leaf(NodeKind::RecordExpression, 0, 0, 0, 3, None);
        b.set_parent(leaf, root);
        b.set_parent(sibling, root);
        b.set_children(root, vec![Some(leaf), Some(sibling)]);
        let graph = b.build();

        let active = ActiveNode {
            position: Position::new(0, 0),
            ancestry: graph.ancestry(leaf).unwrap(),
            maybe_identifier_under_position: None,
        };

        let oracle = |_: NodeKind, _: u8| Some(Type::Any);
        let result = try_expected_type(&graph, &active, &oracle).unwrap();
        assert!(result.is_none());
    }
}

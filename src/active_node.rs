//! ActiveNode resolver (C3): picks the closest leaf to the left of the
//! caret and builds its ancestry.

use tracing::instrument;

use crate::graph::{NodeGraph, NodeHandle, NodeId, NodeKind, NodePayload};
use crate::position::{self, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionIdentifierKind {
    Identifier,
    GeneralizedIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierUnderPosition {
    pub node_id: NodeId,
    pub literal: String,
    pub kind: PositionIdentifierKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNode {
    pub position: Position,
    /// Leaf-to-root; never empty.
    pub ancestry: Vec<NodeHandle>,
    pub maybe_identifier_under_position: Option<IdentifierUnderPosition>,
}

impl ActiveNode {
    pub fn leaf(&self) -> &NodeHandle {
        &self.ancestry[0]
    }

    pub fn root(&self) -> &NodeHandle {
        &self.ancestry[self.ancestry.len() - 1]
    }
}

#[instrument(skip(graph, leaf_ids))]
pub fn try_active_node(
    graph: &NodeGraph,
    leaf_ids: &[NodeId],
    pos: Position,
) -> Option<ActiveNode> {
    if graph.is_empty() {
        return None;
    }

    let mut best: Option<(Position, usize, NodeHandle)> = None;

    for &id in leaf_ids {
        let Ok(handle) = graph.xor_node(id) else {
            continue;
        };
        let Some(ast) = handle.as_ast() else { continue };
        if !position::is_before(ast.token_range.start, pos, true) {
            continue;
        }
        let candidate_key = (ast.token_range.start, graph.index_of(id));
        let keep = match &best {
            None => true,
            Some((best_pos, best_idx, _)) => candidate_key > (*best_pos, *best_idx),
        };
        if keep {
            best = Some((ast.token_range.start, graph.index_of(id), handle));
        }
    }

    // Contexts whose start is known and `<= pos`, preferring a higher id
    // (created later => nested deeper) than whatever we currently hold.
    for ctx_id in graph.context_node_ids() {
        let Ok(handle) = graph.xor_node(ctx_id) else {
            continue;
        };
        let Some(ctx) = handle.as_context() else {
            continue;
        };
        let Some(start) = ctx.maybe_token_start else {
            continue;
        };
        if !position::is_before(start, pos, true) {
            continue;
        }
        let candidate_idx = graph.index_of(ctx_id);
        let beats_current = match &best {
            None => true,
            Some((_, best_idx, _)) => candidate_idx > *best_idx,
        };
        if beats_current {
            best = Some((start, candidate_idx, handle));
        }
    }

    let (_, _, chosen) = best?;

    let maybe_identifier_under_position = identifier_under_position(graph, &chosen, pos);

    let ancestry = graph.ancestry(chosen.id()).ok()?;

    Some(ActiveNode {
        position: pos,
        ancestry,
        maybe_identifier_under_position,
    })
}

fn identifier_under_position(
    graph: &NodeGraph,
    chosen: &NodeHandle,
    pos: Position,
) -> Option<IdentifierUnderPosition> {
    let ast = chosen.as_ast()?;
    match (&ast.kind, &ast.payload) {
        (NodeKind::Identifier, NodePayload::Identifier { literal, .. }) => {
            if position::is_in_token_range(pos, ast.token_range, true, true) {
                Some(IdentifierUnderPosition {
                    node_id: ast.id,
                    literal: literal.clone(),
                    kind: PositionIdentifierKind::Identifier,
                })
            } else {
                None
            }
        }
        (NodeKind::GeneralizedIdentifier, NodePayload::GeneralizedIdentifier { literal }) => {
            if position::is_in_token_range(pos, ast.token_range, true, true) {
                Some(IdentifierUnderPosition {
                    node_id: ast.id,
                    literal: literal.clone(),
                    kind: PositionIdentifierKind::GeneralizedIdentifier,
                })
            } else {
                None
            }
        }
        (NodeKind::Constant, NodePayload::Constant { literal }) if literal == "@" => {
            // The `@` inclusive constant: if its parent is an identifier
            // expression, the caret is considered to be on that parent's
            // identifier.
            let parent = graph.parent(ast.id).ok()??;
            let identifier = graph
                .child_at_attribute_index(parent.id(), 1, Some(&[NodeKind::Identifier]))
                .ok()??;
            let ast_id = identifier.as_ast()?;
            match &ast_id.payload {
                NodePayload::Identifier { literal, .. } => Some(IdentifierUnderPosition {
                    node_id: ast_id.id,
                    literal: literal.clone(),
                    kind: PositionIdentifierKind::Identifier,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::position::Position;

    #[test]
    fn empty_graph_returns_none() {
        let graph = NodeGraph::new();
        assert!(try_active_node(&graph, &[], Position::new(0, 0)).is_none());
    }

    #[test]
    fn caret_before_every_token_returns_none() {
        let mut b = GraphBuilder::new();
        let root = b.ast_leaf(NodeKind::Program, 0, 5, 0, 10, None);
        let leaf = b.ast_identifier("foo", 0, 5, Some(0), false);
        b.set_parent(leaf, root);
        b.set_children(root, vec![Some(leaf)]);
        let graph = b.build();

        let result = try_active_node(&graph, &[leaf], Position::new(0, 0));
        assert!(result.is_none());
    }

    #[test]
    fn picks_closest_leaf_to_the_left() {
        let mut b = GraphBuilder::new();
        let root = b.ast_leaf(NodeKind::Program, 0, 0, 0, 20, None);
        let first = b.ast_identifier("abc", 0, 0, Some(0), false);
        let second = b.ast_identifier("def", 0, 4, Some(1), false);
        b.set_parent(first, root);
        b.set_parent(second, root);
        b.set_children(root, vec![Some(first), Some(second)]);
        let graph = b.build();

        let active = try_active_node(&graph, &[first, second], Position::new(0, 6)).unwrap();
        assert_eq!(active.leaf().id(), second);
    }

    #[test]
    fn identifier_under_caret_detected_inclusive_both_ends() {
        let mut b = GraphBuilder::new();
        let root = b.ast_leaf(NodeKind::Program, 0, 0, 0, 10, None);
        let leaf = b.ast_identifier("abc", 0, 0, Some(0), false);
        b.set_parent(leaf, root);
        b.set_children(root, vec![Some(leaf)]);
        let graph = b.build();

        for col in 0..=3 {
            let active = try_active_node(&graph, &[leaf], Position::new(0, col)).unwrap();
            assert!(active.maybe_identifier_under_position.is_some(), "col {col}");
        }
    }
}

//! Position-identifier resolver (C6): if the caret sits on an identifier,
//! finds the binding site that defines it.

use tracing::instrument;

use crate::active_node::{ActiveNode, IdentifierUnderPosition};
use crate::error::Result;
use crate::graph::{NodeGraph, NodeHandle};
use crate::scope::NodeScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionIdentifier {
    Local {
        identifier: IdentifierUnderPosition,
        definition: NodeHandle,
    },
    Undefined {
        identifier: IdentifierUnderPosition,
    },
}

#[instrument(skip(graph, active_node, scope))]
pub fn try_position_identifier(
    graph: &NodeGraph,
    active_node: &ActiveNode,
    scope: &NodeScope,
) -> Result<Option<PositionIdentifier>> {
    let Some(identifier) = active_node.maybe_identifier_under_position.clone() else {
        return Ok(None);
    };

    let maybe_definition_id = scope
        .get(&identifier.literal)
        .and_then(|item| item.definition_node_id());

    match maybe_definition_id {
        Some(definition_id) => {
            let definition = graph.xor_node(definition_id)?;
            Ok(Some(PositionIdentifier::Local {
                identifier,
                definition,
            }))
        }
        None => Ok(Some(PositionIdentifier::Undefined { identifier })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_node::PositionIdentifierKind;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::{NodeId, NodeKind};
    use crate::position::Position;
    use crate::scope::ScopeItem;

    fn identifier_under_position(node_id: NodeId, literal: &str) -> IdentifierUnderPosition {
        IdentifierUnderPosition {
            node_id,
            literal: literal.to_string(),
            kind: PositionIdentifierKind::Identifier,
        }
    }

    #[test]
    fn no_identifier_under_caret_returns_none() {
        let mut b = GraphBuilder::new();
        let leaf = b.ast_leaf(NodeKind::LiteralExpression, 0, 0, 0, 1, None);
        let graph = b.build();
        let active = ActiveNode {
            position: Position::new(0, 0),
            ancestry: vec![graph.xor_node(leaf).unwrap()],
            maybe_identifier_under_position: None,
        };

        assert!(try_position_identifier(&graph, &active, &NodeScope::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn matching_scope_entry_resolves_to_local() {
        let mut b = GraphBuilder::new();
        let value = b.ast_leaf(NodeKind::LiteralExpression, 0, 8, 0, 9, None);
        let caret_leaf = b.ast_identifier("a", 0, 4, Some(0), false);
        let graph = b.build();

        let mut scope = NodeScope::new();
        scope.insert_if_absent("a", ScopeItem::KeyValuePair {
            key_node_id: caret_leaf,
            maybe_value_node_id: Some(value),
            is_recursive: false,
        });

        let active = ActiveNode {
            position: Position::new(0, 4),
            ancestry: vec![graph.xor_node(caret_leaf).unwrap()],
            maybe_identifier_under_position: Some(identifier_under_position(caret_leaf, "a")),
        };

        let result = try_position_identifier(&graph, &active, &scope)
            .unwrap()
            .unwrap();
        match result {
            PositionIdentifier::Local { definition, .. } => {
                assert_eq!(definition.id(), value);
            }
            PositionIdentifier::Undefined { .. } => panic!("expected Local"),
        }
    }

    #[test]
    fn unbound_identifier_resolves_to_undefined() {
        let mut b = GraphBuilder::new();
        let caret_leaf = b.ast_identifier("z", 0, 0, Some(0), false);
        let graph = b.build();

        let active = ActiveNode {
            position: Position::new(0, 0),
            ancestry: vec![graph.xor_node(caret_leaf).unwrap()],
            maybe_identifier_under_position: Some(identifier_under_position(caret_leaf, "z")),
        };

        let result = try_position_identifier(&graph, &active, &NodeScope::new())
            .unwrap()
            .unwrap();
        assert!(matches!(result, PositionIdentifier::Undefined { .. }));
    }

    #[test]
    fn self_referencing_undefined_entry_does_not_resolve_to_local() {
        let mut b = GraphBuilder::new();
        let caret_leaf = b.ast_identifier("z", 0, 0, Some(0), false);
        let graph = b.build();

        let mut scope = NodeScope::new();
        scope.insert_if_absent("z", ScopeItem::Undefined {
            xor_node_id: caret_leaf,
        });

        let active = ActiveNode {
            position: Position::new(0, 0),
            ancestry: vec![graph.xor_node(caret_leaf).unwrap()],
            maybe_identifier_under_position: Some(identifier_under_position(caret_leaf, "z")),
        };

        let result = try_position_identifier(&graph, &active, &scope)
            .unwrap()
            .unwrap();
        assert!(matches!(result, PositionIdentifier::Undefined { .. }));
    }
}

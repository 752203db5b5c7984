//! Top-level entry point: wires the five question-answering components
//! together over one `ActiveNode` resolution.

use tracing::instrument;

use crate::active_node::{try_active_node, ActiveNode};
use crate::config::InspectionConfig;
use crate::error::Result;
use crate::expected_type::{try_expected_type, Type, TypeOracle};
use crate::graph::{NodeGraph, NodeId};
use crate::invoke::{try_invoke_expression, InvokeExpressionInfo};
use crate::keyword::{try_autocomplete_keywords, KeywordSlot, ParseError, EXPRESSION_STARTERS};
use crate::position::Position;
use crate::position_identifier::{try_position_identifier, PositionIdentifier};
use crate::scope::{try_node_scope, NodeScope};

#[derive(Debug, Clone)]
pub struct Inspection {
    pub active_node: Option<ActiveNode>,
    pub scope: NodeScope,
    pub invoke_expression: Option<InvokeExpressionInfo>,
    pub position_identifier: Option<PositionIdentifier>,
    pub keyword_slot: KeywordSlot,
    pub expected_type: Option<Type>,
}

#[instrument(skip(graph, leaf_ids, parse_error, config, type_oracle))]
pub fn try_inspection(
    graph: &NodeGraph,
    leaf_ids: &[NodeId],
    pos: Position,
    parse_error: Option<&ParseError>,
    config: &InspectionConfig,
    type_oracle: Option<&dyn TypeOracle>,
) -> Result<Inspection> {
    let Some(active_node) = try_active_node(graph, leaf_ids, pos) else {
        return Ok(Inspection {
            active_node: None,
            scope: NodeScope::new(),
            invoke_expression: None,
            position_identifier: None,
            keyword_slot: KeywordSlot {
                allowed: EXPRESSION_STARTERS.clone(),
                maybe_required: None,
            },
            expected_type: None,
        });
    };

    let scope = try_node_scope(graph, &active_node, config)?;
    let invoke_expression = try_invoke_expression(graph, &active_node)?;
    let position_identifier = try_position_identifier(graph, &active_node, &scope)?;
    let keyword_slot = try_autocomplete_keywords(graph, &active_node, parse_error)?;
    let expected_type = match type_oracle {
        Some(oracle) => try_expected_type(graph, &active_node, oracle)?,
        None => None,
    };

    Ok(Inspection {
        active_node: Some(active_node),
        scope,
        invoke_expression,
        position_identifier,
        keyword_slot,
        expected_type,
    })
}

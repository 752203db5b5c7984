//! Position-driven inspection over a hybrid AST/context parse tree: scope
//! resolution, invoke-expression context, position-identifier lookup,
//! keyword autocomplete, and expected-type bridging.

mod active_node;
mod ast_schema;
mod cancellation;
mod config;
mod error;
mod expected_type;
mod graph;
mod inspection;
mod invoke;
mod keyword;
mod position;
mod position_identifier;
mod scope;

pub use active_node::{try_active_node, ActiveNode, IdentifierUnderPosition, PositionIdentifierKind};
pub use cancellation::CancellationToken;
pub use config::{InspectionConfig, InspectionConfigBuilder};
pub use error::{Error, Result};
pub use expected_type::{try_expected_type, Type, TypeOracle};
pub use graph::{
    AstNode, CtxNode, NodeGraph, NodeHandle, NodeId, NodeKind, NodePayload, ParameterModifiers,
    PrimitiveType,
};
pub use inspection::{try_inspection, Inspection};
pub use invoke::{try_invoke_expression, InvokeArguments, InvokeExpressionInfo};
pub use keyword::{try_autocomplete_keywords, Keyword, KeywordSlot, ParseError, EXPRESSION_STARTERS};
pub use position::{Position, TokenRange};
pub use position_identifier::{try_position_identifier, PositionIdentifier};
pub use scope::{try_node_scope, NodeScope, ScopeItem};

#[cfg(any(test, feature = "test-support"))]
pub use graph::builder::GraphBuilder;

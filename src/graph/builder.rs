//! Small in-crate fixture builder for tests. Grounded on the teacher's
//! `tests/helpers.rs::parse` — a minimal way to get a tree onto the bench
//! without a real lexer/parser, which is out of scope for this crate.

use std::collections::HashMap;

use id_arena::Arena;

use super::node::NodeSlot;
use super::{AstNode, CtxNode, NodeGraph, NodeId, NodeKind, NodePayload};
use crate::position::{Position, TokenRange};

#[derive(Default)]
pub struct GraphBuilder {
    arena: Arena<NodeSlot>,
    parent_by_id: HashMap<NodeId, NodeId>,
    child_ids_by_id: HashMap<NodeId, Vec<Option<NodeId>>>,
    leaf_ids: std::collections::HashSet<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ast(
        &mut self,
        kind: NodeKind,
        range: TokenRange,
        attribute_index: Option<u8>,
        payload: NodePayload,
    ) -> NodeId {
        self.arena.alloc_with_id(|id| {
            NodeSlot::Ast(AstNode {
                id,
                kind,
                token_range: range,
                attribute_index,
                payload,
            })
        })
    }

    pub fn ast_leaf(
        &mut self,
        kind: NodeKind,
        start_line: u32,
        start_col: u32,
        _unused: u32,
        end_col: u32,
        attribute_index: Option<u8>,
    ) -> NodeId {
        let range = TokenRange::new(
            Position::new(start_line, start_col),
            Position::new(start_line, end_col),
            start_col,
            end_col,
        );
        let id = self.ast(kind, range, attribute_index, NodePayload::None);
        self.leaf_ids.insert(id);
        id
    }

    pub fn ast_identifier(
        &mut self,
        literal: &str,
        start_line: u32,
        start_col: u32,
        attribute_index: Option<u8>,
        is_inclusive: bool,
    ) -> NodeId {
        let end_col = start_col + literal.len() as u32;
        let range = TokenRange::new(
            Position::new(start_line, start_col),
            Position::new(start_line, end_col),
            start_col,
            end_col,
        );
        let id = self.ast(
            NodeKind::Identifier,
            range,
            attribute_index,
            NodePayload::Identifier {
                literal: literal.to_owned(),
                is_inclusive,
            },
        );
        self.leaf_ids.insert(id);
        id
    }

    pub fn ctx(
        &mut self,
        kind: NodeKind,
        maybe_token_start: Option<Position>,
        attribute_counter: u8,
        attribute_index: Option<u8>,
    ) -> NodeId {
        self.arena.alloc_with_id(|id| {
            NodeSlot::Context(CtxNode {
                id,
                kind,
                maybe_token_start,
                maybe_parent_id: None,
                attribute_counter,
                attribute_index,
            })
        })
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.parent_by_id.insert(child, parent);
        if let Some(NodeSlot::Context(ctx)) = self.arena.get_mut(child) {
            ctx.maybe_parent_id = Some(parent);
        }
    }

    pub fn set_children(&mut self, parent: NodeId, children: Vec<Option<NodeId>>) {
        self.child_ids_by_id.insert(parent, children);
    }

    pub fn build(self) -> NodeGraph {
        NodeGraph {
            arena: self.arena,
            parent_by_id: self.parent_by_id,
            child_ids_by_id: self.child_ids_by_id,
            leaf_ids: self.leaf_ids,
        }
    }
}

//! Node graph adapter (C2): uniform access to a node whether fully parsed
//! or in-progress, keyed by process-unique, creation-ordered ids.

mod node;

use std::collections::{HashMap, HashSet};

use id_arena::Arena;

pub use node::{
    AstNode, CtxNode, NodeHandle, NodeId, NodeKind, NodePayload, ParameterModifiers, PrimitiveType,
};
use node::NodeSlot;

use crate::error::{Error, Result};

/// Owns every node the parser produced. Borrowed immutably by every
/// component in this crate; callers may run many inspections over one
/// graph concurrently (spec §5).
#[derive(Default)]
pub struct NodeGraph {
    arena: Arena<NodeSlot>,
    parent_by_id: HashMap<NodeId, NodeId>,
    child_ids_by_id: HashMap<NodeId, Vec<Option<NodeId>>>,
    leaf_ids: HashSet<NodeId>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn leaf_ids(&self) -> &HashSet<NodeId> {
        &self.leaf_ids
    }

    pub fn context_node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.iter().filter_map(|(id, slot)| match slot {
            NodeSlot::Context(_) => Some(id),
            NodeSlot::Ast(_) => None,
        })
    }

    /// Creation order tie-break: lower `index()` means created earlier.
    pub fn index_of(&self, id: NodeId) -> usize {
        id.index()
    }

    pub fn xor_node(&self, id: NodeId) -> Result<NodeHandle> {
        match self.arena.get(id) {
            Some(NodeSlot::Ast(n)) => Ok(NodeHandle::Ast(n.clone())),
            Some(NodeSlot::Context(n)) => Ok(NodeHandle::Context(*n)),
            None => Err(Error::invariant(format!("unknown node id {id:?}"))),
        }
    }

    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        self.parent_by_id.get(&id).copied()
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeHandle>> {
        // Validate `id` itself is known, per C2's contract.
        self.xor_node(id)?;
        match self.parent_by_id.get(&id) {
            Some(&parent_id) => Ok(Some(self.xor_node(parent_id)?)),
            None => Ok(None),
        }
    }

    pub fn children(&self, parent_id: NodeId) -> Result<Vec<NodeHandle>> {
        self.xor_node(parent_id)?;
        match self.child_ids_by_id.get(&parent_id) {
            None => Ok(Vec::new()),
            Some(ids) => ids
                .iter()
                .filter_map(|maybe_id| *maybe_id)
                .map(|id| self.xor_node(id))
                .collect(),
        }
    }

    pub fn child_at_attribute_index(
        &self,
        parent_id: NodeId,
        index: u8,
        allowed_kinds: Option<&[NodeKind]>,
    ) -> Result<Option<NodeHandle>> {
        self.xor_node(parent_id)?;
        let Some(ids) = self.child_ids_by_id.get(&parent_id) else {
            return Ok(None);
        };
        let Some(Some(child_id)) = ids.get(index as usize) else {
            return Ok(None);
        };
        let handle = self.xor_node(*child_id)?;
        if let Some(allowed) = allowed_kinds {
            if !allowed.contains(&handle.kind()) {
                return Err(Error::invariant(format!(
                    "child at attribute index {index} has kind {:?}, not in allowed set",
                    handle.kind()
                )));
            }
        }
        Ok(Some(handle))
    }

    /// Leaf-to-root ancestry, self first.
    pub fn ancestry(&self, id: NodeId) -> Result<Vec<NodeHandle>> {
        let mut out = vec![self.xor_node(id)?];
        let mut current = id;
        while let Some(parent_id) = self.parent_by_id.get(&current).copied() {
            out.push(self.xor_node(parent_id)?);
            current = parent_id;
        }
        Ok(out)
    }

    /// Repeatedly descend attribute 0 until no further child exists.
    pub fn left_most(&self, id: NodeId) -> Result<NodeHandle> {
        let mut current = self.xor_node(id)?;
        loop {
            match self.child_at_attribute_index(current.id(), 0, None)? {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
    }

    /// The recursive-primary-expression head of an invocation, if it is a
    /// bare identifier expression: its literal (without the `@` prefix).
    pub fn invoke_expression_name(&self, invoke_id: NodeId) -> Result<Option<String>> {
        let head = match self.child_at_attribute_index(
            invoke_id,
            crate::ast_schema::INVOKE_EXPRESSION_HEAD,
            Some(&[NodeKind::RecursivePrimaryExpression]),
        )? {
            Some(h) => h,
            None => return Ok(None),
        };
        let head_expr = match self.child_at_attribute_index(
            head.id(),
            0,
            Some(&[NodeKind::IdentifierExpression]),
        )? {
            Some(h) => h,
            None => return Ok(None),
        };
        let identifier = match self.child_at_attribute_index(
            head_expr.id(),
            1,
            Some(&[NodeKind::Identifier]),
        )? {
            Some(h) => h,
            None => return Ok(None),
        };
        Ok(identifier.as_ast().and_then(|ast| match &ast.payload {
            NodePayload::Identifier { literal, .. } => Some(literal.clone()),
            _ => None,
        }))
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod builder;

#[cfg(test)]
mod tests {
    use super::builder::GraphBuilder;
    use super::*;

    #[test]
    fn unknown_id_is_invariant_violation() {
        let graph = NodeGraph::new();
        let mut scratch = Arena::<NodeSlot>::new();
        let bogus = scratch.alloc_with_id(|id| {
            NodeSlot::Context(CtxNode {
                id,
                kind: NodeKind::Program,
                maybe_token_start: None,
                maybe_parent_id: None,
                attribute_counter: 0,
                attribute_index: None,
            })
        });
        assert!(graph.xor_node(bogus).is_err());
    }

    #[test]
    fn ancestry_walks_leaf_to_root() {
        let mut b = GraphBuilder::new();
        let root = b.ast_leaf(NodeKind::Program, 0, 0, 0, 10, None);
        let child = b.ast_leaf(NodeKind::Identifier, 0, 0, 0, 3, Some(0));
        b.set_parent(child, root);
        b.set_children(root, vec![Some(child)]);
        let graph = b.build();

        let ancestry = graph.ancestry(child).unwrap();
        assert_eq!(ancestry.len(), 2);
        assert_eq!(ancestry[0].id(), child);
        assert_eq!(ancestry[1].id(), root);
    }

    #[test]
    fn left_most_descends_attribute_zero() {
        let mut b = GraphBuilder::new();
        let root = b.ast_leaf(NodeKind::Program, 0, 0, 0, 10, None);
        let mid = b.ast_leaf(NodeKind::LetExpression, 0, 0, 0, 8, Some(0));
        let leaf = b.ast_leaf(NodeKind::Identifier, 0, 0, 0, 1, Some(0));
        b.set_parent(mid, root);
        b.set_parent(leaf, mid);
        b.set_children(root, vec![Some(mid)]);
        b.set_children(mid, vec![Some(leaf)]);
        let graph = b.build();

        let result = graph.left_most(root).unwrap();
        assert_eq!(result.id(), leaf);
    }
}

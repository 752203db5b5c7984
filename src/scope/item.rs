use crate::graph::{NodeId, ParameterModifiers, PrimitiveType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeItem {
    KeyValuePair {
        key_node_id: NodeId,
        maybe_value_node_id: Option<NodeId>,
        is_recursive: bool,
    },
    SectionMember {
        key_node_id: NodeId,
        is_recursive: bool,
    },
    Parameter {
        modifiers: ParameterModifiers,
        maybe_type: Option<PrimitiveType>,
        /// Not part of the distilled data model, but C6 needs somewhere to
        /// point a position-identifier definition at; a parameter's key and
        /// value are the same physical node, so one id covers both.
        definition_node_id: NodeId,
    },
    Each {
        each_expr_node_id: NodeId,
    },
    /// An identifier or identifier-expression encountered during the walk
    /// that doesn't come from one of the named binding constructs above —
    /// it just points back at the node that introduced it.
    Undefined {
        xor_node_id: NodeId,
    },
}

impl ScopeItem {
    pub fn is_recursive(&self) -> bool {
        match self {
            Self::KeyValuePair { is_recursive, .. } => *is_recursive,
            Self::SectionMember { is_recursive, .. } => *is_recursive,
            Self::Parameter { .. } | Self::Each { .. } | Self::Undefined { .. } => false,
        }
    }

    /// The node a position-identifier lookup should resolve to, if any.
    /// `Undefined` is a reference marker, not a binding site, so it never
    /// resolves to a definition — only `KeyValuePair`, `SectionMember`, and
    /// `Parameter` are genuine bindings.
    pub fn definition_node_id(&self) -> Option<NodeId> {
        match self {
            Self::KeyValuePair {
                maybe_value_node_id,
                ..
            } => *maybe_value_node_id,
            Self::SectionMember { key_node_id, .. } => Some(*key_node_id),
            Self::Parameter {
                definition_node_id,
                ..
            } => Some(*definition_node_id),
            Self::Each { .. } | Self::Undefined { .. } => None,
        }
    }

    /// The node whose key literal a position-identifier lookup compares
    /// against.
    pub fn key_node_id(&self) -> Option<NodeId> {
        match self {
            Self::KeyValuePair { key_node_id, .. } => Some(*key_node_id),
            Self::SectionMember { key_node_id, .. } => Some(*key_node_id),
            Self::Undefined { xor_node_id } => Some(*xor_node_id),
            Self::Parameter {
                definition_node_id,
                ..
            } => Some(*definition_node_id),
            Self::Each { .. } => None,
        }
    }
}

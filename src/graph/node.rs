use crate::position::{Position, TokenRange};

bitflags::bitflags! {
    /// A parameter's `optional`/`nullable` modifiers. Modeled as flags
    /// rather than two bare `bool`s since the grammar allows either, both,
    /// or neither in front of a parameter name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParameterModifiers: u8 {
        const NULLABLE = 0b01;
        const OPTIONAL = 0b10;
    }
}

/// Fixed closed set of grammar tags. `Other` is an escape hatch so the
/// keyword classifier and scope builder stay total without enumerating
/// every token/constant kind in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    LetExpression,
    KeyValuePair,
    EachExpression,
    FunctionExpression,
    ParameterList,
    Parameter,
    IdentifierExpression,
    Identifier,
    GeneralizedIdentifier,
    InvokeExpression,
    RecursivePrimaryExpression,
    ArrayWrapper,
    Csv,
    ListExpression,
    ListLiteral,
    RecordExpression,
    RecordLiteral,
    Section,
    SectionMember,
    TryExpression,
    OtherwiseExpression,
    ErrorRaisingExpression,
    ErrorHandlingExpression,
    IfExpression,
    ParenthesizedExpression,
    RangeExpression,
    Constant,
    LiteralExpression,
    PrimitiveType,
    Other(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Any,
    Null,
    Logical,
    Number,
    Text,
    Date,
    DateTime,
    DateTimeZone,
    Duration,
    Time,
    Binary,
    List,
    Record,
    Table,
    Function,
    Type,
}

/// Node-kind-specific data that only fully-parsed (`Ast`) leaves and a
/// handful of composite nodes carry. Every grammar token (identifiers,
/// constants, literals) is always `Ast` — only composite constructs can be
/// `Context` mid-parse — so payloads that need literal text live here, not
/// on `CtxNode`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodePayload {
    #[default]
    None,
    Identifier {
        literal: String,
        is_inclusive: bool,
    },
    GeneralizedIdentifier {
        literal: String,
    },
    Parameter {
        name: String,
        modifiers: ParameterModifiers,
        maybe_type: Option<PrimitiveType>,
    },
    Csv {
        /// End position of the trailing comma, if this element has one.
        trailing_comma_end: Option<Position>,
    },
    SectionMember {
        /// End position of the trailing `;`, if the parser got that far.
        trailing_semicolon_end: Option<Position>,
    },
    Constant {
        literal: String,
    },
}

/// A completed subtree: full token range, known child links (tracked
/// separately by `NodeGraph`), and whatever kind-specific payload its kind
/// carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub token_range: TokenRange,
    pub attribute_index: Option<u8>,
    pub payload: NodePayload,
}

/// A partial node recorded by the parser before it gave up. No end
/// position; `attribute_counter` records how many attribute slots were
/// filled before the parser failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtxNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub maybe_token_start: Option<Position>,
    pub maybe_parent_id: Option<NodeId>,
    pub attribute_counter: u8,
    pub attribute_index: Option<u8>,
}

pub(crate) enum NodeSlot {
    Ast(AstNode),
    Context(CtxNode),
}

pub type NodeId = id_arena::Id<NodeSlot>;

/// The tagged union of `Ast` and `Context` nodes ("xor node" in the
/// original vocabulary, because a position query only ever cares about
/// exactly one of the two).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeHandle {
    Ast(AstNode),
    Context(CtxNode),
}

impl NodeHandle {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Ast(n) => n.id,
            Self::Context(n) => n.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Ast(n) => n.kind,
            Self::Context(n) => n.kind,
        }
    }

    pub fn attribute_index(&self) -> Option<u8> {
        match self {
            Self::Ast(n) => n.attribute_index,
            Self::Context(n) => n.attribute_index,
        }
    }

    pub fn as_ast(&self) -> Option<&AstNode> {
        match self {
            Self::Ast(n) => Some(n),
            Self::Context(_) => None,
        }
    }

    pub fn as_context(&self) -> Option<&CtxNode> {
        match self {
            Self::Context(n) => Some(n),
            Self::Ast(_) => None,
        }
    }

    pub fn is_context(&self) -> bool {
        matches!(self, Self::Context(_))
    }
}

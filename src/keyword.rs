//! Keyword-slot classifier (C7): for the caret's innermost unparsed
//! construct, which keywords may or must appear next.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::instrument;

use crate::active_node::ActiveNode;
use crate::ast_schema;
use crate::error::Result;
use crate::graph::{CtxNode, NodeGraph, NodeHandle, NodeKind, NodePayload};
use crate::position::{self, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    As,
    Each,
    Else,
    Error,
    False,
    If,
    In,
    Is,
    Let,
    Meta,
    Not,
    Null,
    Optional,
    Or,
    Otherwise,
    Section,
    Shared,
    Then,
    True,
    Try,
    Type,
}

/// Keywords that may begin an expression.
pub static EXPRESSION_STARTERS: Lazy<HashSet<Keyword>> = Lazy::new(|| {
    use Keyword::*;
    HashSet::from([Each, Error, False, If, Let, Not, Null, Section, True, Try, Type])
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSlot {
    pub allowed: HashSet<Keyword>,
    pub maybe_required: Option<Keyword>,
}

impl KeywordSlot {
    fn required(keyword: Keyword) -> Self {
        Self {
            allowed: HashSet::from([keyword]),
            maybe_required: Some(keyword),
        }
    }

    fn allowed(allowed: HashSet<Keyword>) -> Self {
        Self {
            allowed,
            maybe_required: None,
        }
    }

    fn expression_starters() -> Self {
        Self::allowed(EXPRESSION_STARTERS.clone())
    }

    fn nothing() -> Self {
        Self::allowed(HashSet::new())
    }
}

/// Caller-supplied information about why the parse stopped short. The
/// classifier derives its answer from the context ancestry alone; this is
/// threaded through for callers that want to surface the parser's own
/// diagnostic alongside the keyword slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

#[instrument(skip(graph, active_node, _parse_error))]
pub fn try_autocomplete_keywords(
    graph: &NodeGraph,
    active_node: &ActiveNode,
    _parse_error: Option<&ParseError>,
) -> Result<KeywordSlot> {
    let ancestry = &active_node.ancestry;

    for i in 0..ancestry.len() {
        let node = &ancestry[i];
        match node.kind() {
            NodeKind::Csv => {
                if let Some(slot) = csv_slot(graph, node, active_node.position)? {
                    return Ok(slot);
                }
                continue;
            }
            NodeKind::ArrayWrapper => {
                if let Some(ctx) = node.as_context() {
                    if ctx.attribute_counter == ast_schema::ARRAY_WRAPPER_OPEN {
                        return Ok(KeywordSlot::expression_starters());
                    }
                }
                continue;
            }
            _ => {}
        }

        let Some(ctx) = node.as_context() else {
            continue;
        };
        if let Some(slot) = slot_for_context(ctx) {
            return Ok(slot);
        }
    }

    Ok(KeywordSlot::expression_starters())
}

fn slot_for_context(ctx: &CtxNode) -> Option<KeywordSlot> {
    use NodeKind::*;
    match ctx.kind {
        TryExpression => match ctx.attribute_counter {
            0 | 1 => Some(KeywordSlot::required(Keyword::Try)),
            ast_schema::TRY_EXPRESSION_PROTECTED => Some(KeywordSlot::expression_starters()),
            // Optional otherwise handler: inherit the outer slot.
            ast_schema::TRY_EXPRESSION_OTHERWISE => None,
            _ => None,
        },
        ErrorRaisingExpression => match ctx.attribute_counter {
            0 | 1 => Some(KeywordSlot::required(Keyword::Error)),
            ast_schema::ERROR_RAISING_EXPRESSION_VALUE => Some(KeywordSlot::expression_starters()),
            _ => None,
        },
        IfExpression => match ctx.attribute_counter {
            0 => Some(KeywordSlot::required(Keyword::If)),
            ast_schema::IF_EXPRESSION_CONDITION => Some(KeywordSlot::expression_starters()),
            2 => Some(KeywordSlot::required(Keyword::Then)),
            ast_schema::IF_EXPRESSION_THEN => Some(KeywordSlot::expression_starters()),
            4 => Some(KeywordSlot::required(Keyword::Else)),
            ast_schema::IF_EXPRESSION_ELSE => Some(KeywordSlot::expression_starters()),
            _ => None,
        },
        OtherwiseExpression => match ctx.attribute_counter {
            0 | 1 => Some(KeywordSlot::required(Keyword::Otherwise)),
            ast_schema::OTHERWISE_EXPRESSION_HANDLER => Some(KeywordSlot::expression_starters()),
            _ => None,
        },
        ParenthesizedExpression => match ctx.attribute_counter {
            0 => Some(KeywordSlot::nothing()),
            ast_schema::PARENTHESIZED_EXPRESSION_CONTENT => {
                Some(KeywordSlot::expression_starters())
            }
            2 => Some(KeywordSlot::nothing()),
            _ => None,
        },
        RangeExpression => match ctx.attribute_counter {
            ast_schema::RANGE_EXPRESSION_LEFT | 1 => Some(KeywordSlot::expression_starters()),
            2 => Some(KeywordSlot::nothing()),
            ast_schema::RANGE_EXPRESSION_RIGHT => Some(KeywordSlot::expression_starters()),
            _ => None,
        },
        SectionMember => match ctx.attribute_counter {
            ast_schema::SECTION_MEMBER_SEMICOLON => {
                let mut allowed = EXPRESSION_STARTERS.clone();
                allowed.insert(Keyword::Shared);
                Some(KeywordSlot::allowed(allowed))
            }
            _ => None,
        },
        _ => None,
    }
}

fn csv_slot(graph: &NodeGraph, csv: &NodeHandle, pos: Position) -> Result<Option<KeywordSlot>> {
    match csv {
        NodeHandle::Context(ctx) => {
            if ctx.attribute_counter == 0 {
                return Ok(Some(KeywordSlot::expression_starters()));
            }
            Ok(Some(KeywordSlot::expression_starters()))
        }
        NodeHandle::Ast(ast) => {
            if let NodePayload::Csv {
                trailing_comma_end: Some(comma_end),
            } = ast.payload
            {
                if position::is_on(pos, comma_end) {
                    return Ok(Some(KeywordSlot::expression_starters()));
                }
            }

            let has_next_sibling = match graph.parent(ast.id)? {
                Some(parent) => {
                    let next_index = ast.attribute_index.unwrap_or(0) + 1;
                    graph
                        .children(parent.id())?
                        .iter()
                        .any(|sibling| sibling.attribute_index() == Some(next_index))
                }
                None => false,
            };

            if has_next_sibling {
                Ok(Some(KeywordSlot::expression_starters()))
            } else {
                Ok(Some(KeywordSlot::nothing()))
            }
        }
    }
}

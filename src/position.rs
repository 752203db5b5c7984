//! Position arithmetic (C1). Line ordering dominates column ordering; every
//! comparison here is end-exclusive unless the caller asks for inclusive.

use crate::graph::{CtxNode, NodeHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line_number: u32,
    pub line_code_unit: u32,
}

impl Position {
    pub fn new(line_number: u32, line_code_unit: u32) -> Self {
        Self {
            line_number,
            line_code_unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRange {
    pub start: Position,
    pub end: Position,
    pub start_code_unit: u32,
    pub end_code_unit: u32,
}

impl TokenRange {
    pub fn new(start: Position, end: Position, start_code_unit: u32, end_code_unit: u32) -> Self {
        Self {
            start,
            end,
            start_code_unit,
            end_code_unit,
        }
    }
}

pub fn is_before(a: Position, b: Position, inclusive: bool) -> bool {
    if inclusive {
        a <= b
    } else {
        a < b
    }
}

pub fn is_after(a: Position, b: Position, inclusive: bool) -> bool {
    if inclusive {
        a >= b
    } else {
        a > b
    }
}

pub fn is_on(a: Position, b: Position) -> bool {
    a == b
}

pub fn is_in_token_range(
    pos: Position,
    range: TokenRange,
    inclusive_left: bool,
    inclusive_right: bool,
) -> bool {
    is_after(pos, range.start, inclusive_left) && is_before(pos, range.end, inclusive_right)
}

/// For `Ast` nodes, delegates to the node's token range. `Context` nodes
/// have no end position yet, so the caret is always considered "inside" one
/// — the parser hasn't finished telling us where it stops.
pub fn is_in_xor_node(
    pos: Position,
    node: &NodeHandle,
    inclusive_left: bool,
    inclusive_right: bool,
) -> bool {
    match node {
        NodeHandle::Ast(ast) => {
            is_in_token_range(pos, ast.token_range, inclusive_left, inclusive_right)
        }
        NodeHandle::Context(_) => true,
    }
}

pub fn ctx_starts_on_or_before(pos: Position, ctx: &CtxNode) -> bool {
    match ctx.maybe_token_start {
        Some(start) => is_before(start, pos, true),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, col: u32) -> Position {
        Position::new(line, col)
    }

    #[rstest::rstest]
    #[case(pos(0, 0), pos(0, 0), false, false)]
    #[case(pos(0, 0), pos(0, 1), false, true)]
    #[case(pos(0, 1), pos(0, 0), true, false)]
    #[case(pos(1, 0), pos(0, 99), true, false)]
    fn before_after_agree(
        #[case] a: Position,
        #[case] b: Position,
        #[case] expect_before: bool,
        #[case] expect_after: bool,
    ) {
        assert_eq!(is_before(a, b, false), expect_before);
        assert_eq!(is_after(a, b, false), expect_after);
    }

    #[test]
    fn inclusive_endpoints_include_equality() {
        let p = pos(3, 4);
        assert!(is_before(p, p, true));
        assert!(is_after(p, p, true));
        assert!(!is_before(p, p, false));
        assert!(!is_after(p, p, false));
    }

    #[test]
    fn on_requires_exact_equality() {
        assert!(is_on(pos(2, 2), pos(2, 2)));
        assert!(!is_on(pos(2, 2), pos(2, 3)));
        assert!(!is_on(pos(2, 2), pos(3, 2)));
    }

    #[test]
    fn token_range_is_end_exclusive_by_default() {
        let range = TokenRange::new(pos(0, 0), pos(0, 5), 0, 5);
        assert!(is_in_token_range(pos(0, 0), range, true, false));
        assert!(is_in_token_range(pos(0, 4), range, true, false));
        assert!(!is_in_token_range(pos(0, 5), range, true, false));
    }

    #[test]
    fn line_ordering_dominates_column() {
        assert!(is_before(pos(0, 1000), pos(1, 0), false));
        assert!(is_after(pos(5, 0), pos(4, 1000), false));
    }
}

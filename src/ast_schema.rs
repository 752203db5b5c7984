//! Named attribute-index constants for the handful of constructs the
//! inspection core dispatches on. Only the slots spec.md pins down by
//! number are load-bearing; everything else here is a concrete, documented
//! choice recorded in DESIGN.md's Open Question resolutions.

/// `each` _body_.
pub const EACH_EXPRESSION_BODY: u8 = 1;

/// `(params) => body`.
pub const FUNCTION_EXPRESSION_PARAMETERS: u8 = 0;
pub const FUNCTION_EXPRESSION_BODY: u8 = 3;

/// `let k1 = v1, k2 = v2, … in e`.
pub const LET_EXPRESSION_VARIABLE_LIST: u8 = 1;
pub const LET_EXPRESSION_IN_EXPRESSION: u8 = 3;

/// `key = value` (shared by let-bindings, record fields, and the
/// name-paired-expression nested inside a section member).
pub const KEY_VALUE_PAIR_VALUE: u8 = 2;

/// `[a = 1, b = 2]` record content list.
pub const RECORD_CONTENT: u8 = 1;

/// `section foo; [shared] name = value;` — the name-paired-expression is
/// attribute 1; the trailing `;` is attribute 2. Attribute 0 (the optional
/// `shared` keyword) has no named constant: nothing in this crate keys off
/// it directly.
pub const SECTION_MEMBER_NAME_PAIRED_EXPRESSION: u8 = 1;
pub const SECTION_MEMBER_SEMICOLON: u8 = 2;

/// `(args)` / list / record wrapper: open constant, content, close constant.
pub const ARRAY_WRAPPER_OPEN: u8 = 0;
pub const ARRAY_WRAPPER_CONTENT: u8 = 1;
pub const ARRAY_WRAPPER_CLOSE: u8 = 2;

/// `InvokeExpression`: head expression, then the parenthesized argument
/// wrapper.
pub const INVOKE_EXPRESSION_HEAD: u8 = 0;
pub const INVOKE_EXPRESSION_ARGUMENTS: u8 = 1;

/// `IdentifierExpression`: optional `@` inclusive-constant, then identifier.
pub const IDENTIFIER_EXPRESSION_INCLUSIVE_CONSTANT: u8 = 0;
pub const IDENTIFIER_EXPRESSION_IDENTIFIER: u8 = 1;

/// `try protected [otherwise handler]`.
pub const TRY_EXPRESSION_PROTECTED: u8 = 2;
pub const TRY_EXPRESSION_OTHERWISE: u8 = 3;

/// `error reason`.
pub const ERROR_RAISING_EXPRESSION_VALUE: u8 = 2;

/// `otherwise handler` (standalone, e.g. inside try's attr 3).
pub const OTHERWISE_EXPRESSION_HANDLER: u8 = 2;

/// `if c then t else f`.
pub const IF_EXPRESSION_CONDITION: u8 = 1;
pub const IF_EXPRESSION_THEN: u8 = 3;
pub const IF_EXPRESSION_ELSE: u8 = 5;

/// `(expr)`.
pub const PARENTHESIZED_EXPRESSION_CONTENT: u8 = 1;

/// `a .. b`.
pub const RANGE_EXPRESSION_LEFT: u8 = 0;
pub const RANGE_EXPRESSION_RIGHT: u8 = 3;

/// The parser state, the pending-lexeme queue and keyword dispatch.
///
/// Also splits words glued to parentheses into separate tokens.
pub mod core;

/// Literal parsing.
///
/// Quoted strings, `STR (...)` strings, numbers and booleans.
pub mod literal;

/// Control-flow keywords.
///
/// `JUMP` and `SECTION` labels, and `READ` casts.
pub mod control;

pub use self::core::{ParseResult, Parser, parse};

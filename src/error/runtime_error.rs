use thiserror::Error;

use crate::interpreter::token::Position;

/// Represents all structural failures raised while executing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// More tokens were required but the program ended.
    #[error("Unexpected end of input after {at}.")]
    UnexpectedEndOfInput {
        /// The last token that was consumed.
        at: Position,
    },
    /// A `(` was never closed.
    #[error("Unmatched parenthesis opened at {at}.")]
    UnmatchedParen {
        /// Where the group opens.
        at: Position,
    },
    /// No terminator was found for an `IF` or `SECTION` block.
    #[error("Unterminated {block} block opened at {at}.")]
    UnterminatedBlock {
        /// `IF` or `SECTION`.
        block: &'static str,
        /// Where the block opens.
        at:    Position,
    },
    /// A taken `JUMP` found no matching `SECTION` further down.
    #[error("No section '{label}' found after the jump at {at}.")]
    MissingSection {
        /// The label jumped to.
        label: String,
        /// Where the jump is.
        at:    Position,
    },
    /// Groups, macro operands or blocks nested past the depth limit.
    #[error("Nesting deeper than {limit} levels at {at}.")]
    NestingTooDeep {
        /// The maximum depth.
        limit: usize,
        /// Where the level that went too deep opens.
        at:    Position,
    },
    /// A push went past the operand stack capacity.
    #[error("Stack overflow: capacity of {capacity} values exceeded.")]
    StackOverflow {
        /// The configured capacity.
        capacity: usize,
    },
    /// A pop or peek on an empty operand stack.
    #[error("Stack underflow: the operand stack is empty.")]
    StackUnderflow,
    /// `DIV` with a zero divisor.
    #[error("Division by zero at {at}.")]
    DivisionByZero {
        /// The last token that was consumed.
        at: Position,
    },
    /// Reading input or writing output failed.
    #[error("I/O failure: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

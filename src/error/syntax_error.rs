use thiserror::Error;

use crate::interpreter::token::Position;

/// Represents all errors raised for malformed source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A string literal did not open with the expected delimiter.
    #[error("Invalid string at {at}. String must start with: {delimiter}")]
    InvalidString {
        /// The delimiter the literal has to open with.
        delimiter: char,
        /// Where the offending word starts.
        at:        Position,
    },
    /// Input ended before a string literal was closed.
    #[error("Unterminated string starting at {at}.")]
    UnterminatedString {
        /// Where the literal starts.
        at: Position,
    },
    /// A `NUM` literal that is not a finite decimal number.
    #[error("Invalid number '{lexeme}' at {at}.")]
    InvalidNumber {
        /// The offending word.
        lexeme: String,
        /// Where the word starts.
        at:     Position,
    },
    /// A `JUMP` or `SECTION` label that is not an identifier.
    #[error("Invalid {keyword} label '{label}' at {at}.")]
    InvalidLabel {
        /// `JUMP` or `SECTION`.
        keyword: &'static str,
        /// The offending label.
        label:   String,
        /// Where the label starts.
        at:      Position,
    },
    /// A keyword that needs a following word appeared at the end of input.
    #[error("Expected a value after '{keyword}' at {at}.")]
    MissingOperand {
        /// The keyword missing its operand.
        keyword: &'static str,
        /// Where the keyword is.
        at:      Position,
    },
    /// A fixed construct is missing one of its keywords.
    #[error("Expected '{expected}' but found '{found}' at {at}.")]
    ExpectedKeyword {
        /// The keyword the construct requires.
        expected: &'static str,
        /// What was found instead.
        found:    String,
        /// Where it was found.
        at:       Position,
    },
    /// A name was required after a keyword.
    #[error("Expected an identifier after '{keyword}' but found '{found}' at {at}.")]
    ExpectedIdentifier {
        /// The keyword that must be followed by a name.
        keyword: &'static str,
        /// What was found instead.
        found:   String,
        /// Where it was found.
        at:      Position,
    },
}

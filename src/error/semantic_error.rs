use thiserror::Error;

use crate::interpreter::token::Position;

/// Represents all type-contract violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A binary operator or macro got operands of types it does not accept.
    #[error("Cannot apply '{operator}' to {left} and {right} at {at}.")]
    TypeMismatch {
        /// The operator or macro keyword.
        operator: &'static str,
        /// Runtime type of the left operand.
        left:     &'static str,
        /// Runtime type of the right operand.
        right:    &'static str,
        /// The last token that was consumed.
        at:       Position,
    },
    /// A single operand or guard had the wrong type.
    #[error("'{operator}' expects {expected}, found {found} at {at}.")]
    UnexpectedType {
        /// The operator or keyword.
        operator: &'static str,
        /// The accepted type.
        expected: &'static str,
        /// The runtime type found.
        found:    &'static str,
        /// The last token that was consumed.
        at:       Position,
    },
    /// A variable was read before being assigned.
    #[error("Variable '{name}' is not defined at {at}.")]
    UndefinedVariable {
        /// The variable name.
        name: String,
        /// Where it was referenced.
        at:   Position,
    },
    /// A label was defined twice, or jumped to after being defined.
    #[error("Label '{label}' is already defined at {at}.")]
    DuplicateLabel {
        /// The label.
        label: String,
        /// Where the second definition is.
        at:    Position,
    },
    /// `READ` input that does not convert to the requested type.
    #[error("Cannot convert '{input}' to {target} at {at}.")]
    InvalidConversion {
        /// The line that was read.
        input:  String,
        /// `NUM`.
        target: &'static str,
        /// The last token that was consumed.
        at:     Position,
    },
    /// `EXIT` with something other than an integral number.
    #[error("Invalid exit code '{value}' at {at}.")]
    InvalidExitCode {
        /// The rendered value.
        value: String,
        /// The last token that was consumed.
        at:    Position,
    },
}

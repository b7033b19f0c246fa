/// Syntax errors.
///
/// Raised while classifying lexemes into tokens, and while interpreting the
/// fixed-shape constructs (`ASSIGN ... TO name`, `JUMP label IF ...`) whose
/// keywords must appear in a given order.
pub mod syntax_error;
/// Runtime errors.
///
/// Structural failures found while executing: running out of tokens,
/// unmatched parentheses and blocks, and operand stack overflow or underflow.
pub mod runtime_error;
/// Semantic errors.
///
/// Type-contract violations: operators applied to values of the wrong runtime
/// type, undefined variables and duplicate labels.
pub mod semantic_error;

use thiserror::Error;

pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
pub use syntax_error::SyntaxError;

/// Any error a program can stop with.
///
/// The display form is `<Category> >> <message>`, which is what the command
/// line reports before exiting with a non-zero status.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A malformed literal, label or fixed construct.
    #[error("Syntax >> {0}")]
    Syntax(#[from] SyntaxError),
    /// A structural failure during execution.
    #[error("Runtime >> {0}")]
    Runtime(#[from] RuntimeError),
    /// A type-contract violation.
    #[error("Semantic >> {0}")]
    Semantic(#[from] SemanticError),
}

impl Error {
    /// The category tag: `"Syntax"`, `"Runtime"` or `"Semantic"`.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "Syntax",
            Self::Runtime(_) => "Runtime",
            Self::Semantic(_) => "Semantic",
        }
    }
}

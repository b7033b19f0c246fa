//! # stackline
//!
//! stackline is a line-oriented scripting language interpreted straight from
//! its token stream. Source text is split into words, the words are
//! classified into tokens, and the tokens are executed with a program counter
//! and a bounded operand stack, without building a syntax tree.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::interpreter::{
    evaluator::{Host, Interpreter, Options, Outcome},
    parser::parse,
    scanner::scan,
    token::Token,
};

/// Provides the error types for every stage.
///
/// Errors fall into three categories: syntax errors for malformed source,
/// runtime errors for structural failures during execution, and semantic
/// errors for type-contract violations. Each carries the position it was
/// raised at.
///
/// # Responsibilities
/// - Defines one error enum per category and a wrapper over all three.
/// - Renders messages as `<Category> >> <message>`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together scanning, parsing, evaluation and the value
/// representation to provide a complete runtime for stackline programs.
///
/// # Responsibilities
/// - Coordinates the scanner, parser and evaluator.
/// - Defines tokens, values and the host interface programs talk through.
pub mod interpreter;
/// General utilities for number parsing and safe numeric conversion.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::evaluator::{BufferHost, StdHost},
};

/// Scans and parses a program into its token sequence.
///
/// # Errors
/// Returns a syntax error for malformed literals and labels.
///
/// # Examples
/// ```
/// use stackline::tokenize;
///
/// let tokens = tokenize("PRINT \"hi\"").unwrap();
/// assert_eq!(tokens.len(), 2);
///
/// assert!(tokenize("NUM seven").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let lexemes = scan(source);
    debug!(lexemes = lexemes.len(), "scanned");

    let tokens = parse(lexemes)?;
    debug!(tokens = tokens.len(), "parsed");

    Ok(tokens)
}

/// Runs a program from source to completion.
///
/// Output and input go through `host`; pass `StdHost` for the process's
/// standard streams or a `BufferHost` to script them.
///
/// # Errors
/// Returns the first syntax, runtime or semantic error. Nothing after it is
/// executed.
///
/// # Examples
/// ```
/// use stackline::{BufferHost, interpreter::evaluator::{Options, Outcome}, run_source};
///
/// let mut host = BufferHost::new();
/// let outcome = run_source("PRINT \"sum: \" ADD 2 3", &Options::default(), &mut host).unwrap();
///
/// assert_eq!(outcome, Outcome::Completed { stack: Vec::new() });
/// assert_eq!(host.output(), ["sum: 5"]);
///
/// // Type errors stop the program.
/// let err = run_source("1 EQ \"1\"", &Options::default(), &mut host).unwrap_err();
/// assert_eq!(err.category(), "Semantic");
/// ```
pub fn run_source<H: Host>(source: &str, options: &Options, host: H) -> Result<Outcome, Error> {
    let tokens = tokenize(source)?;

    Interpreter::new(&tokens, options, host).run()
}

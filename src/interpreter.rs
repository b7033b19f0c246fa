/// The evaluator module executes the token sequence.
///
/// The evaluator walks the tokens with a program counter, keeps intermediate
/// values on a bounded operand stack, binds variables, and resolves forward
/// jumps to labeled sections. It is the core execution engine.
///
/// # Responsibilities
/// - Dispatches every token kind to its handler.
/// - Checks runtime types before every operation.
/// - Reports runtime and semantic errors with source positions.
pub mod evaluator;
/// The scanner module splits source text into lexemes.
///
/// The scanner reads the raw source and produces one lexeme per
/// whitespace-separated word, with its line and column. Comments are
/// dropped here. This stage never fails.
pub mod scanner;
/// The parser module classifies lexemes into typed tokens.
///
/// The parser maps keywords to token kinds, builds string, number and boolean
/// literals, captures jump and section labels, and splits words glued to
/// parentheses.
///
/// # Responsibilities
/// - Converts lexemes into tokens with kind, literal and position.
/// - Reports malformed literals and labels as syntax errors.
pub mod parser;
/// Token kinds, literals and source positions.
pub mod token;
/// The value module defines the runtime data types for evaluation.
///
/// Strings, numbers, booleans and null, with the type names used in error
/// messages.
pub mod value;

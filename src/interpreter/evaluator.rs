/// Core evaluation logic and interpreter state.
///
/// Contains the token walk, operand resolution for groups and values, the
/// run options and outcome, and the internal unwinding signal that carries
/// `EXIT` and errors out of nested evaluation.
pub mod core;

/// The bounded operand stack.
pub mod stack;

/// The flow-control table that maps labels to section ranges.
pub mod labels;

/// Comparison, equality and logical operators.
///
/// Resolves the left operand from the preceding identifier or the stack,
/// evaluates the right operand, checks runtime types and pushes the result.
pub mod binary;

/// Built-in macros.
///
/// Arithmetic, `READ`, `PRINT` and `EXIT`.
pub mod macros;

/// Block constructs: `IF`, `JUMP` and `SECTION`.
///
/// Blocks end at the first later token in the opener's column.
pub mod control;

/// Variable assignment with `[VAR] ASSIGN value TO name`.
pub mod assignment;

/// The output sink and input source a program talks to.
pub mod host;

pub use self::{
    binary::BinaryOperator,
    core::{Interpreter, MAX_NESTING_DEPTH, Options, Outcome},
    host::{BufferHost, Host, StdHost},
    labels::{FlowRange, LabelIndex},
    stack::{DEFAULT_STACK_CAPACITY, OperandStack},
};

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    error::{Error, RuntimeError, SemanticError, SyntaxError},
    interpreter::{
        evaluator::{
            binary::BinaryOperator,
            host::Host,
            labels::LabelIndex,
            stack::{DEFAULT_STACK_CAPACITY, OperandStack},
        },
        token::{Position, Token, TokenKind},
        value::Value,
    },
};

/// How deeply groups, macro operands and blocks may nest.
///
/// Each level is a native call frame, so the limit keeps deep input from
/// exhausting the thread's stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of values the operand stack holds.
    pub stack_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { stack_capacity: DEFAULT_STACK_CAPACITY }
    }
}

/// How a run that did not fail came to an end.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every token was executed. Carries the operand stack, bottom to top.
    Completed {
        stack: Vec<Value>,
    },
    /// `EXIT` stopped the program with a status code.
    Exited {
        code: i32,
    },
}

/// Anything that unwinds the token walk: an `EXIT` or an error.
#[derive(Debug)]
pub(in crate::interpreter::evaluator) enum Interrupt {
    Exit(i32),
    Fault(Error),
}

impl From<Error> for Interrupt {
    fn from(error: Error) -> Self {
        Self::Fault(error)
    }
}

impl From<SyntaxError> for Interrupt {
    fn from(error: SyntaxError) -> Self {
        Self::Fault(error.into())
    }
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Self::Fault(error.into())
    }
}

impl From<SemanticError> for Interrupt {
    fn from(error: SemanticError) -> Self {
        Self::Fault(error.into())
    }
}

/// Result type used while walking the tokens.
pub(in crate::interpreter::evaluator) type Flow<T> = Result<T, Interrupt>;

/// Executes a token sequence directly, without building a tree.
///
/// The interpreter owns everything one run needs: the program counter, the
/// operand stack, the variable table and the flow-control table. Every
/// `interpret_*` method starts with the program counter just past the token
/// it handles and leaves it past the last token it used.
///
/// Output and input go through the [`Host`] given at construction.
pub struct Interpreter<'t, H> {
    pub(in crate::interpreter::evaluator) tokens:    &'t [Token],
    pub(in crate::interpreter::evaluator) pc:        usize,
    pub(in crate::interpreter::evaluator) stack:     OperandStack,
    pub(in crate::interpreter::evaluator) variables: HashMap<String, Value>,
    pub(in crate::interpreter::evaluator) labels:    LabelIndex,
    pub(in crate::interpreter::evaluator) host:      H,
    pub(in crate::interpreter::evaluator) depth:     usize,
}

impl<'t, H: Host> Interpreter<'t, H> {
    /// Creates an interpreter for a token sequence.
    ///
    /// # Parameters
    /// - `tokens`: The parsed program.
    /// - `options`: Run settings such as the stack capacity.
    /// - `host`: Where `PRINT` writes and `READ` reads.
    #[must_use]
    pub fn new(tokens: &'t [Token], options: &Options, host: H) -> Self {
        Self { tokens,
               pc: 0,
               stack: OperandStack::with_capacity(options.stack_capacity),
               variables: HashMap::new(),
               labels: LabelIndex::new(),
               host,
               depth: 0 }
    }

    /// Executes the program from the current position to the end.
    ///
    /// # Returns
    /// - `Ok(Outcome::Completed)`: Every token ran. Carries the stack.
    /// - `Ok(Outcome::Exited)`: `EXIT` ran. No further tokens were executed.
    /// - `Err(Error)`: The first syntax, runtime or semantic error.
    ///
    /// # Example
    /// ```
    /// use stackline::interpreter::{
    ///     evaluator::{BufferHost, Interpreter, Options, Outcome},
    ///     parser::parse,
    ///     scanner::scan,
    ///     value::Value,
    /// };
    ///
    /// let tokens = parse(scan("ADD 2 3")).unwrap();
    /// let mut interpreter = Interpreter::new(&tokens, &Options::default(), BufferHost::new());
    ///
    /// assert_eq!(interpreter.run().unwrap(),
    ///            Outcome::Completed { stack: vec![Value::Num(5.0)] });
    /// ```
    pub fn run(&mut self) -> Result<Outcome, Error> {
        while self.pc < self.tokens.len() {
            match self.interpret_token() {
                Ok(()) => {},
                Err(Interrupt::Exit(code)) => {
                    debug!(code, pc = self.pc, "program exited");
                    return Ok(Outcome::Exited { code });
                },
                Err(Interrupt::Fault(error)) => {
                    debug!(category = error.category(), pc = self.pc, "program failed");
                    return Err(error);
                },
            }
        }

        Ok(Outcome::Completed { stack: self.stack.values().to_vec() })
    }

    /// The operand stack.
    #[must_use]
    pub const fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// The value bound to a variable, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The flow-control table.
    #[must_use]
    pub const fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Consumes one token and dispatches on its kind.
    pub(in crate::interpreter::evaluator) fn interpret_token(&mut self) -> Flow<()> {
        let token = self.consume()?;
        trace!(pc = self.pc - 1, kind = token.kind.name(), "dispatch");

        match token.kind {
            TokenKind::String | TokenKind::Number | TokenKind::Boolean => {
                self.push(Value::from(&token.literal))?;
            },
            TokenKind::Equal => self.interpret_binary(BinaryOperator::Equal)?,
            TokenKind::Greater => self.interpret_binary(BinaryOperator::Greater)?,
            TokenKind::GreaterEqual => self.interpret_binary(BinaryOperator::GreaterEqual)?,
            TokenKind::Less => self.interpret_binary(BinaryOperator::Less)?,
            TokenKind::LessEqual => self.interpret_binary(BinaryOperator::LessEqual)?,
            TokenKind::And => self.interpret_binary(BinaryOperator::And)?,
            TokenKind::Or => self.interpret_binary(BinaryOperator::Or)?,
            TokenKind::Not => self.interpret_not()?,
            TokenKind::LeftParen => {
                let value = self.evaluate_group(token)?;
                self.push(value)?;
            },
            TokenKind::Var | TokenKind::Assign => self.interpret_assignment(token)?,
            TokenKind::Macro(kind) => self.interpret_macro(kind)?,
            TokenKind::Jump => self.interpret_jump(token)?,
            TokenKind::Section => self.skip_section(token)?,
            TokenKind::If => self.interpret_if(token)?,
            TokenKind::RightParen
            | TokenKind::Identifier
            | TokenKind::To
            | TokenKind::Cast(_)
            | TokenKind::End => {},
        }

        Ok(())
    }

    /// Evaluates one operand of an operator or guard.
    ///
    /// A `(` evaluates the whole group, an identifier yields its bound value,
    /// and any other token yields its literal.
    pub(in crate::interpreter::evaluator) fn evaluate_expression(&mut self) -> Flow<Value> {
        let token = self.consume()?;

        match token.kind {
            TokenKind::LeftParen => self.evaluate_group(token),
            TokenKind::Identifier => self.lookup(token),
            _ => Ok(Value::from(&token.literal)),
        }
    }

    /// Runs the tokens of a group up to its `)` and pops the result.
    ///
    /// `open` is the already consumed `(`.
    pub(in crate::interpreter::evaluator) fn evaluate_group(&mut self,
                                                            open: &Token)
                                                            -> Flow<Value> {
        self.nested(open.position(), |this| {
                loop {
                    let Some(token) = this.current() else {
                        return Err(RuntimeError::UnmatchedParen { at: open.position() }.into());
                    };

                    if token.kind == TokenKind::RightParen {
                        this.pc += 1;
                        break;
                    }

                    this.interpret_token()?;
                }

                Ok(this.stack.pop()?)
            })
    }

    /// Evaluates a macro operand or the right-hand side of an assignment.
    ///
    /// Unlike [`Self::evaluate_expression`], a macro runs and its result is
    /// popped, and a one-letter name or a name starting with `S` refers to
    /// the top of the stack rather than to a variable.
    pub(in crate::interpreter::evaluator) fn evaluate_value(&mut self) -> Flow<Value> {
        let token = self.consume()?;

        match token.kind {
            TokenKind::Macro(kind) => self.nested(token.position(), |this| {
                                              this.interpret_macro(kind)?;
                                              Ok(this.stack.pop()?)
                                          }),
            TokenKind::LeftParen => self.evaluate_group(token),
            TokenKind::Identifier => match token.name() {
                Some(name) if names_stack_top(name) => Ok(self.stack.pop()?),
                _ => self.lookup(token),
            },
            _ => Ok(Value::from(&token.literal)),
        }
    }

    /// Runs `body` one nesting level deeper.
    ///
    /// # Errors
    /// `RuntimeError::NestingTooDeep` at `at` once [`MAX_NESTING_DEPTH`]
    /// levels are open.
    pub(in crate::interpreter::evaluator) fn nested<T>(&mut self,
                                                       at: Position,
                                                       body: impl FnOnce(&mut Self) -> Flow<T>)
                                                       -> Flow<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(RuntimeError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                      at }.into());
        }

        self.depth += 1;
        let result = body(self);
        self.depth -= 1;

        result
    }

    /// The value bound to the identifier `token` names.
    pub(in crate::interpreter::evaluator) fn lookup(&self, token: &Token) -> Flow<Value> {
        let name = token.name().unwrap_or_default();
        let Some(value) = self.variables.get(name) else {
            return Err(SemanticError::UndefinedVariable { name: name.to_string(),
                                                          at:   token.position(), }.into());
        };

        Ok(value.clone())
    }

    pub(in crate::interpreter::evaluator) fn push(&mut self, value: Value) -> Flow<()> {
        Ok(self.stack.push(value)?)
    }

    /// The token at the program counter, if any.
    pub(in crate::interpreter::evaluator) fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pc)
    }

    /// The token `offset` places past the program counter, if any.
    pub(in crate::interpreter::evaluator) fn peek(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pc + offset)
    }

    /// Returns the token at the program counter and advances past it.
    pub(in crate::interpreter::evaluator) fn consume(&mut self) -> Result<&'t Token, RuntimeError> {
        let token = self.tokens
                        .get(self.pc)
                        .ok_or(RuntimeError::UnexpectedEndOfInput { at: self.last_position() })?;
        self.pc += 1;

        Ok(token)
    }

    /// The position of the most recently consumed token.
    pub(in crate::interpreter::evaluator) fn last_position(&self) -> Position {
        self.pc
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or_else(Position::default, Token::position)
    }
}

/// Names of one character, or starting with `S`, stand for the stack top
/// when used as a value.
fn names_stack_top(name: &str) -> bool {
    name.chars().count() == 1 || name.starts_with('S')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{evaluator::host::BufferHost, parser::parse, scanner::scan};

    fn run(source: &str) -> Result<Outcome, Error> {
        let tokens = parse(scan(source)).unwrap();
        Interpreter::new(&tokens, &Options::default(), BufferHost::new()).run()
    }

    fn stack_of(source: &str) -> Vec<Value> {
        match run(source).unwrap() {
            Outcome::Completed { stack } => stack,
            Outcome::Exited { code } => panic!("unexpected exit with {code}"),
        }
    }

    #[test]
    fn literals_are_pushed_in_order() {
        assert_eq!(stack_of("1 \"two\" True"),
                   [Value::Num(1.0), Value::from("two"), Value::Bool(true)]);
    }

    #[test]
    fn empty_program_completes() {
        assert!(stack_of("").is_empty());
        assert!(stack_of("# only a comment").is_empty());
    }

    #[test]
    fn group_result_is_pushed() {
        assert_eq!(stack_of("(ADD 1 2)"), [Value::Num(3.0)]);
        assert_eq!(stack_of("((1 EQ 1))"), [Value::Bool(true)]);
    }

    #[test]
    fn stray_markers_are_ignored() {
        assert_eq!(stack_of("4 ) END TO"), [Value::Num(4.0)]);
    }

    #[test]
    fn stack_top_names() {
        assert!(names_stack_top("s"));
        assert!(names_stack_top("Sum"));
        assert!(!names_stack_top("total"));
        assert!(!names_stack_top("sum"));
    }

    #[test]
    fn stack_top_name_pops() {
        let tokens = parse(scan("7 VAR ASSIGN s TO seven")).unwrap();
        let mut interpreter = Interpreter::new(&tokens, &Options::default(), BufferHost::new());
        interpreter.run().unwrap();

        assert_eq!(interpreter.variable("seven"), Some(&Value::Num(7.0)));
        assert!(interpreter.stack().is_empty());
    }

    #[test]
    fn configured_capacity_is_enforced() {
        let tokens = parse(scan("1 2 3")).unwrap();
        let options = Options { stack_capacity: 2 };
        let err = Interpreter::new(&tokens, &options, BufferHost::new()).run().unwrap_err();

        assert_eq!(err, Error::Runtime(RuntimeError::StackOverflow { capacity: 2 }));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}True{}", "(".repeat(depth), ")".repeat(depth));
        let err = run(&source).unwrap_err();

        assert_eq!(err,
                   Error::Runtime(RuntimeError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                                 at:    Position::new(1, MAX_NESTING_DEPTH), }));
    }

    #[test]
    fn nesting_at_the_limit_runs() {
        let source = format!("{}True{}",
                             "(".repeat(MAX_NESTING_DEPTH),
                             ")".repeat(MAX_NESTING_DEPTH));

        assert_eq!(stack_of(&source), [Value::Bool(true)]);
    }

    #[test]
    fn depth_is_released_after_each_group() {
        let group = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        let source = format!("{group} {group}");

        assert_eq!(stack_of(&source), [Value::Num(1.0), Value::Num(1.0)]);
    }

    #[test]
    fn macro_operand_chains_are_bounded() {
        let source = format!("{}1 1", "ADD 1 ".repeat(MAX_NESTING_DEPTH + 2));

        assert!(matches!(run(&source),
                         Err(Error::Runtime(RuntimeError::NestingTooDeep { .. }))));
    }

    #[test]
    fn end_of_input_reports_last_token() {
        let err = run("1 EQ").unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::UnexpectedEndOfInput { .. })));
    }
}

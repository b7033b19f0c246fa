use tracing::debug;

use crate::{
    error::{RuntimeError, SemanticError},
    interpreter::{
        evaluator::{
            core::{Flow, Interpreter, Interrupt},
            host::Host,
        },
        parser::literal::boolean_from_word,
        token::{CastKind, MacroKind, TokenKind},
        value::Value,
    },
    util::num::{f64_to_i32_checked, parse_decimal},
};

impl<H: Host> Interpreter<'_, H> {
    /// Runs a built-in macro whose keyword was just consumed.
    pub(in crate::interpreter::evaluator) fn interpret_macro(&mut self,
                                                             kind: MacroKind)
                                                             -> Flow<()> {
        match kind {
            MacroKind::Add | MacroKind::Sub | MacroKind::Mul | MacroKind::Div => {
                self.interpret_arithmetic(kind)
            },
            MacroKind::Read => self.interpret_read(),
            MacroKind::Print => self.interpret_print(),
            MacroKind::Exit => self.interpret_exit(),
        }
    }

    /// `ADD|SUB|MUL|DIV a b`
    ///
    /// All four accept two numbers. `ADD` also concatenates two strings.
    #[allow(clippy::float_cmp)]
    fn interpret_arithmetic(&mut self, kind: MacroKind) -> Flow<()> {
        let left = self.evaluate_value()?;
        let right = self.evaluate_value()?;

        let result = match (kind, &left, &right) {
            (MacroKind::Add, Value::Num(a), Value::Num(b)) => Value::Num(a + b),
            (MacroKind::Add, Value::Str(a), Value::Str(b)) => Value::Str(format!("{a}{b}")),
            (MacroKind::Sub, Value::Num(a), Value::Num(b)) => Value::Num(a - b),
            (MacroKind::Mul, Value::Num(a), Value::Num(b)) => Value::Num(a * b),
            (MacroKind::Div, Value::Num(_), Value::Num(b)) if *b == 0.0 => {
                return Err(RuntimeError::DivisionByZero { at: self.last_position() }.into());
            },
            (MacroKind::Div, Value::Num(a), Value::Num(b)) => Value::Num(a / b),
            _ => return Err(self.mismatch(kind.keyword(), &left, &right)),
        };

        self.push(result)
    }

    /// `READ [STR|NUM|BOOL] [AND PRINT prompt]`
    ///
    /// Blocks on the host for one line and pushes it converted to the cast
    /// type, or as a string without one. End of input pushes `Null`.
    fn interpret_read(&mut self) -> Flow<()> {
        let cast = match self.current().map(|token| token.kind) {
            Some(TokenKind::Cast(cast)) => {
                self.pc += 1;
                Some(cast)
            },
            _ => None,
        };

        let prompt = if self.current().is_some_and(|token| token.kind == TokenKind::And)
                        && self.peek(1)
                               .is_some_and(|token| token.kind == TokenKind::Macro(MacroKind::Print))
        {
            self.pc += 2;
            Some(self.evaluate_value()?.to_string())
        } else {
            None
        };

        let line = self.host
                       .read_line(prompt.as_deref())
                       .map_err(RuntimeError::from)?;

        let value = match line {
            Some(line) => self.convert_input(line, cast)?,
            None => Value::Null,
        };

        debug!(value = %value, "input read");
        self.push(value)
    }

    fn convert_input(&self, line: String, cast: Option<CastKind>) -> Flow<Value> {
        match cast {
            Some(CastKind::Num) => {
                let Some(number) = parse_decimal(line.trim()) else {
                    return Err(SemanticError::InvalidConversion { input:  line,
                                                                  target: "NUM",
                                                                  at:     self.last_position(), }.into());
                };
                Ok(Value::Num(number))
            },
            Some(CastKind::Bool) => Ok(Value::Bool(boolean_from_word(line.trim()))),
            Some(CastKind::Str) | None => Ok(Value::Str(line)),
        }
    }

    /// `PRINT values...`
    ///
    /// Takes values for as long as the next token sits on the same line as
    /// the one before it, and writes them concatenated as one line.
    fn interpret_print(&mut self) -> Flow<()> {
        let mut text = String::new();

        while self.continues_line() {
            let value = self.evaluate_value()?;
            text.push_str(&value.to_string());
        }

        self.host.write_line(&text).map_err(RuntimeError::from)?;
        Ok(())
    }

    /// `EXIT [code]`
    ///
    /// The code must be an integral number; it defaults to 0.
    fn interpret_exit(&mut self) -> Flow<()> {
        let code = if self.continues_line() {
            let value = self.evaluate_value()?;
            let invalid = SemanticError::InvalidExitCode { value: value.to_string(),
                                                           at:    self.last_position(), };

            match value {
                Value::Num(number) => f64_to_i32_checked(number, invalid)?,
                _ => return Err(invalid.into()),
            }
        } else {
            0
        };

        Err(Interrupt::Exit(code))
    }

    /// True while the current token is a value on the same line as the
    /// previous one. Block markers and `)` end the line early.
    fn continues_line(&self) -> bool {
        let line = self.last_position().line;

        self.current().is_some_and(|token| {
                          token.line == line
                          && !matches!(token.kind,
                                       TokenKind::If
                                       | TokenKind::End
                                       | TokenKind::Jump
                                       | TokenKind::Section
                                       | TokenKind::RightParen)
                      })
    }
}

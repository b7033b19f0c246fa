use tracing::debug;

use crate::{
    error::{RuntimeError, SemanticError, SyntaxError},
    interpreter::{
        evaluator::{
            core::{Flow, Interpreter},
            host::Host,
            labels::{FlowRange, LabelIndex},
        },
        token::{Token, TokenKind},
        value::Value,
    },
};

impl<H: Host> Interpreter<'_, H> {
    /// `IF guard ... END`
    ///
    /// The block ends at the first later token in the same column as the
    /// `IF`. A true guard runs the tokens up to there, a false one skips
    /// them.
    pub(in crate::interpreter::evaluator) fn interpret_if(&mut self, opener: &Token) -> Flow<()> {
        let unterminated = || RuntimeError::UnterminatedBlock { block: "IF",
                                                                at:    opener.position(), };
        let taken = self.evaluate_guard("IF")?;
        debug!(line = opener.line, taken, "if");

        if taken {
            self.nested(opener.position(), |this| {
                    loop {
                        let Some(token) = this.current() else {
                            return Err(unterminated().into());
                        };
                        if token.column == opener.column {
                            return Ok(());
                        }

                        this.interpret_token()?;
                    }
                })?;
        } else {
            self.pc = self.block_end(self.pc, opener.column)
                          .ok_or_else(unterminated)?;
        }

        self.close_block();
        Ok(())
    }

    /// `JUMP label IF guard`
    ///
    /// When the guard holds, execution moves to `SECTION label` further down,
    /// runs its body, and carries on after its terminator. Everything between
    /// the jump and the section is skipped.
    pub(in crate::interpreter::evaluator) fn interpret_jump(&mut self, jump: &Token) -> Flow<()> {
        let label = jump.name().unwrap_or_default();
        if self.labels.is_defined(label) {
            return Err(SemanticError::DuplicateLabel { label: label.to_string(),
                                                       at:    jump.position(), }.into());
        }

        let keyword = self.consume()?;
        if keyword.kind != TokenKind::If {
            return Err(SyntaxError::ExpectedKeyword { expected: "IF",
                                                      found:    keyword.describe(),
                                                      at:       keyword.position(), }.into());
        }

        if !self.evaluate_guard("JUMP")? {
            debug!(label, "jump not taken");
            return Ok(());
        }

        self.labels.define(label, FlowRange::default(), jump.position())?;

        let section = LabelIndex::scan_forward(self.tokens, self.pc, label).ok_or_else(|| {
                          RuntimeError::MissingSection { label: label.to_string(),
                                                         at:    jump.position(), }
                      })?;
        let opener = &self.tokens[section];
        let end = self.block_end(section + 1, opener.column)
                      .ok_or(RuntimeError::UnterminatedBlock { block: "SECTION",
                                                               at:    opener.position(), })?;

        self.labels.resolve(label, section, end);
        debug!(label, section, end, "jump taken");

        self.pc = section + 1;
        self.nested(jump.position(), |this| {
                while this.pc < end {
                    this.interpret_token()?;
                }
                Ok(())
            })?;

        if self.pc == end {
            self.close_block();
        }

        Ok(())
    }

    /// `SECTION label ... END` met in linear flow.
    ///
    /// The label is recorded and the body skipped; it only runs through a
    /// `JUMP`.
    pub(in crate::interpreter::evaluator) fn skip_section(&mut self, section: &Token) -> Flow<()> {
        let label = section.name().unwrap_or_default();
        let start = self.pc - 1;
        let end = self.block_end(self.pc, section.column)
                      .ok_or(RuntimeError::UnterminatedBlock { block: "SECTION",
                                                               at:    section.position(), })?;

        self.labels.define(label,
                           FlowRange { start: Some(start),
                                       end:   Some(end), },
                           section.position())?;
        debug!(label, start, end, "section skipped");

        self.pc = end;
        self.close_block();
        Ok(())
    }

    /// Evaluates the guard of an `IF` or a `JUMP`, which must be a boolean.
    fn evaluate_guard(&mut self, keyword: &'static str) -> Flow<bool> {
        match self.evaluate_expression()? {
            Value::Bool(flag) => Ok(flag),
            other => Err(SemanticError::UnexpectedType { operator: keyword,
                                                         expected: "a boolean",
                                                         found:    other.type_name(),
                                                         at:       self.last_position(), }.into()),
        }
    }

    /// Index of the first token at or after `from` in `column`.
    fn block_end(&self, from: usize, column: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, token)| token.column == column)
            .map(|(index, _)| index)
    }

    /// Consumes the terminator if it is an `END`; anything else is left to
    /// run.
    fn close_block(&mut self) {
        if self.current().is_some_and(|token| token.kind == TokenKind::End) {
            self.pc += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, RuntimeError, SemanticError, SyntaxError},
        interpreter::{
            evaluator::{
                core::{Interpreter, MAX_NESTING_DEPTH, Options, Outcome},
                host::BufferHost,
            },
            parser::parse,
            scanner::scan,
        },
    };

    fn run(source: &str) -> (Result<Outcome, Error>, Vec<String>) {
        let tokens = parse(scan(source)).unwrap();
        let mut host = BufferHost::new();
        let result = Interpreter::new(&tokens, &Options::default(), &mut host).run();

        (result, host.output().to_vec())
    }

    fn output(source: &str) -> Vec<String> {
        let (result, output) = run(source);
        result.unwrap();
        output
    }

    #[test]
    fn if_runs_or_skips_its_block() {
        assert_eq!(output("IF True\n  PRINT \"yes\"\nEND\nPRINT \"after\""), ["yes", "after"]);
        assert_eq!(output("IF False\n  PRINT \"yes\"\nEND\nPRINT \"after\""), ["after"]);
    }

    #[test]
    fn if_guard_can_be_a_group() {
        assert_eq!(output("IF (2 GT 1)\n  PRINT \"bigger\"\nEND"), ["bigger"]);
    }

    #[test]
    fn if_guard_must_be_boolean() {
        let (result, _) = run("IF 1\n  PRINT 1\nEND");

        assert!(matches!(result,
                         Err(Error::Semantic(SemanticError::UnexpectedType { operator: "IF", .. }))));
    }

    #[test]
    fn unterminated_if() {
        let (result, _) = run("IF False\n  PRINT 1");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::UnterminatedBlock { block: "IF", .. }))));
    }

    #[test]
    fn jump_runs_its_section_once() {
        let source = "JUMP greet IF True\nPRINT \"skipped\"\nSECTION greet\n  PRINT \"hi\"\nEND\nPRINT \"done\"";

        assert_eq!(output(source), ["hi", "done"]);
    }

    #[test]
    fn false_jump_does_nothing() {
        let source = "JUMP greet IF False\nPRINT \"between\"\nSECTION greet\n  PRINT \"hi\"\nEND\nPRINT \"done\"";

        assert_eq!(output(source), ["between", "done"]);
    }

    #[test]
    fn jump_requires_if() {
        let (result, _) = run("JUMP greet True\nSECTION greet\nEND");

        assert!(matches!(result,
                         Err(Error::Syntax(SyntaxError::ExpectedKeyword { expected: "IF", .. }))));
    }

    #[test]
    fn jump_without_section() {
        let (result, _) = run("JUMP nowhere IF True");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::MissingSection { .. }))));
    }

    #[test]
    fn jump_cannot_go_backwards() {
        let (result, _) = run("SECTION back\nEND\nJUMP back IF True");

        assert!(matches!(result,
                         Err(Error::Semantic(SemanticError::DuplicateLabel { .. }))));
    }

    #[test]
    fn duplicate_sections() {
        let (result, _) = run("SECTION twice\nEND\nSECTION twice\nEND");
        let err = result.unwrap_err();

        assert_eq!(err.category(), "Semantic");
        assert!(err.to_string().contains("already defined"));
    }

    #[test]
    fn unterminated_section() {
        let (result, _) = run("SECTION open\n  PRINT 1");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::UnterminatedBlock { block: "SECTION",
                                                                              .. }))));
    }

    #[test]
    fn nested_blocks_close_by_column() {
        let source = "IF True\n  IF False\n    PRINT \"inner\"\n  END\n  PRINT \"outer\"\nEND";

        assert_eq!(output(source), ["outer"]);
    }

    #[test]
    fn block_nesting_is_bounded() {
        let levels = MAX_NESTING_DEPTH + 1;
        let mut source = String::new();
        for level in 0..levels {
            source.push_str(&" ".repeat(level));
            source.push_str("IF True\n");
        }
        source.push_str(&" ".repeat(levels));
        source.push_str("1\n");
        for level in (0..levels).rev() {
            source.push_str(&" ".repeat(level));
            source.push_str("END\n");
        }

        let (result, _) = run(&source);

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::NestingTooDeep { .. }))));
    }

    #[test]
    fn false_jump_needs_no_section() {
        assert_eq!(output("JUMP nowhere IF False\nPRINT 1"), ["1"]);
    }

    #[test]
    fn sections_are_recorded() {
        let tokens = parse(scan("SECTION a\n  1\nEND")).unwrap();
        let mut interpreter = Interpreter::new(&tokens, &Options::default(), BufferHost::new());

        assert_eq!(interpreter.run().unwrap(), Outcome::Completed { stack: Vec::new() });
        assert!(interpreter.labels().is_defined("a"));
    }
}

use tracing::debug;

use crate::{
    error::SyntaxError,
    interpreter::{
        evaluator::{
            core::{Flow, Interpreter},
            host::Host,
        },
        token::{Token, TokenKind},
    },
};

impl<H: Host> Interpreter<'_, H> {
    /// `[VAR] ASSIGN value TO name`
    ///
    /// Binds `name` to the evaluated value, replacing any earlier binding.
    pub(in crate::interpreter::evaluator) fn interpret_assignment(&mut self,
                                                                  keyword: &Token)
                                                                  -> Flow<()> {
        if keyword.kind == TokenKind::Var {
            self.expect_keyword(TokenKind::Assign, "ASSIGN")?;
        }

        let value = self.evaluate_value()?;
        self.expect_keyword(TokenKind::To, "TO")?;

        let target = self.consume()?;
        let Some(name) = target.name().filter(|_| target.kind == TokenKind::Identifier) else {
            return Err(SyntaxError::ExpectedIdentifier { keyword: "TO",
                                                         found:   target.describe(),
                                                         at:      target.position(), }.into());
        };

        debug!(name, value = %value, "variable bound");
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    fn expect_keyword(&mut self, kind: TokenKind, keyword: &'static str) -> Flow<()> {
        let token = self.consume()?;
        if token.kind != kind {
            return Err(SyntaxError::ExpectedKeyword { expected: keyword,
                                                      found:    token.describe(),
                                                      at:       token.position(), }.into());
        }

        Ok(())
    }
}

use crate::{
    error::SyntaxError,
    interpreter::{
        parser::core::{ParseResult, Parser, is_identifier},
        scanner::Lexeme,
        token::{CastKind, Literal, MacroKind, TokenKind},
    },
};

impl Parser {
    /// `JUMP <label>` or `SECTION <label>[:]`.
    ///
    /// The label is folded into the control token, which keeps the keyword's
    /// position. A section label may carry one trailing `:`.
    pub(in crate::interpreter::parser) fn parse_label(&mut self,
                                                      kind: TokenKind,
                                                      keyword: &'static str,
                                                      lexeme: &Lexeme)
                                                      -> ParseResult<()> {
        let word = self.next_operand(keyword, lexeme.position())?;

        let label = match kind {
            TokenKind::Section => word.value.strip_suffix(':').unwrap_or(&word.value),
            _ => word.value.as_str(),
        };

        if !is_identifier(label) {
            return Err(SyntaxError::InvalidLabel { keyword,
                                                   label: word.value.clone(),
                                                   at: word.position() });
        }

        self.push(kind, Literal::Label(label.to_string()), lexeme.position());
        Ok(())
    }

    /// True when the last emitted token is a `READ` macro, which turns the
    /// following `STR`/`NUM`/`BOOL` into a conversion target.
    pub(in crate::interpreter::parser) fn follows_read(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|token| token.kind == TokenKind::Macro(MacroKind::Read))
    }

    pub(in crate::interpreter::parser) fn push_cast(&mut self, lexeme: &Lexeme) {
        if let Some(cast) = CastKind::from_keyword(&lexeme.value) {
            self.push(TokenKind::Cast(cast), Literal::Keyword(cast.keyword()), lexeme.position());
        }
    }
}

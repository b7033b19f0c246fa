use crate::{
    error::SyntaxError,
    interpreter::{
        parser::core::{ParseResult, Parser},
        scanner::Lexeme,
        token::{Literal, Position, TokenKind},
    },
    util::num::parse_decimal,
};

/// The boolean a word stands for: `0` and `False` are false, anything else is
/// true.
///
/// Shared by `BOOL` literals and `READ BOOL` input.
#[must_use]
pub fn boolean_from_word(word: &str) -> bool {
    !matches!(word, "0" | "False")
}

impl Parser {
    /// `BOOL <word>`
    pub(in crate::interpreter::parser) fn parse_bool_keyword(&mut self,
                                                             keyword: &Lexeme)
                                                             -> ParseResult<()> {
        let word = self.next_operand("BOOL", keyword.position())?;
        self.push_bool(&word);

        Ok(())
    }

    /// A boolean literal at the word's own position.
    pub(in crate::interpreter::parser) fn push_bool(&mut self, word: &Lexeme) {
        let literal = Literal::Bool(boolean_from_word(&word.value));
        self.push(TokenKind::Boolean, literal, word.position());
    }

    /// `NUM <word>`, where the word must be a finite decimal number.
    pub(in crate::interpreter::parser) fn parse_number_keyword(&mut self,
                                                               keyword: &Lexeme)
                                                               -> ParseResult<()> {
        let word = self.next_operand("NUM", keyword.position())?;
        let at = word.position();
        let Some(number) = parse_decimal(&word.value) else {
            return Err(SyntaxError::InvalidNumber { lexeme: word.value,
                                                    at });
        };

        self.push(TokenKind::Number, Literal::Num(number), at);
        Ok(())
    }

    /// `STR (some words)`
    pub(in crate::interpreter::parser) fn parse_paren_string(&mut self,
                                                             keyword: &Lexeme)
                                                             -> ParseResult<()> {
        let opener = self.next_lexeme()
                         .ok_or(SyntaxError::MissingOperand { keyword: "STR",
                                                              at:      keyword.position(), })?;

        if !opener.value.starts_with('(') {
            return Err(SyntaxError::InvalidString { delimiter: '(',
                                                    at:        opener.position(), });
        }

        self.parse_delimited(opener, ')')
    }

    /// `"some words"`
    pub(in crate::interpreter::parser) fn parse_quoted_string(&mut self,
                                                              opener: Lexeme)
                                                              -> ParseResult<()> {
        if !opener.value.starts_with('"') {
            return Err(SyntaxError::InvalidString { delimiter: '"',
                                                    at:        opener.position(), });
        }

        self.parse_delimited(opener, '"')
    }

    /// Joins words with single spaces until one contains `close`.
    ///
    /// The opener's first character is the opening delimiter and is skipped.
    /// Anything glued after the closing delimiter is re-queued as its own
    /// lexeme, so `"done")` still closes the surrounding group.
    fn parse_delimited(&mut self, opener: Lexeme, close: char) -> ParseResult<()> {
        let start: Position = opener.position();
        let mut text = String::new();
        let mut lexeme = opener;
        let mut skip = lexeme.value.chars().next().map_or(0, char::len_utf8);

        loop {
            if let Some(offset) = lexeme.value[skip..].find(close) {
                let end = skip + offset;
                text.push_str(&lexeme.value[skip..end]);
                self.requeue_tail(&lexeme, end + close.len_utf8());
                break;
            }

            text.push_str(&lexeme.value[skip..]);
            text.push(' ');
            lexeme = self.next_lexeme()
                         .ok_or(SyntaxError::UnterminatedString { at: start })?;
            skip = 0;
        }

        self.push(TokenKind::String, Literal::Str(text), start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::SyntaxError,
        interpreter::{
            parser::parse,
            scanner::scan,
            token::{Literal, Position, TokenKind},
        },
    };

    fn literals(source: &str) -> Vec<Literal> {
        parse(scan(source)).unwrap().into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn quoted_strings_join_words() {
        assert_eq!(literals("\"hello   big world\""),
                   [Literal::Str("hello big world".to_string())]);
        assert_eq!(literals("\"single\""), [Literal::Str("single".to_string())]);
    }

    #[test]
    fn quoted_string_keeps_trailing_space_before_lone_quote() {
        assert_eq!(literals("\"Hello, \" x"),
                   [Literal::Str("Hello, ".to_string()), Literal::Ident("x".to_string())]);
    }

    #[test]
    fn quoted_string_inside_group() {
        let tokens = parse(scan("(\"a b\")")).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

        assert_eq!(kinds, [TokenKind::LeftParen, TokenKind::String, TokenKind::RightParen]);
        assert_eq!(tokens[1].literal, Literal::Str("a b".to_string()));
        assert_eq!(tokens[1].position(), Position::new(1, 1));
    }

    #[test]
    fn unterminated_string() {
        let err = parse(scan("PRINT \"open")).unwrap_err();

        assert_eq!(err, SyntaxError::UnterminatedString { at: Position::new(1, 6) });
    }

    #[test]
    fn paren_strings() {
        assert_eq!(literals("STR (two words)"), [Literal::Str("two words".to_string())]);
        assert_eq!(literals("STR (one)"), [Literal::Str("one".to_string())]);
    }

    #[test]
    fn paren_string_needs_opening_paren() {
        let err = parse(scan("STR hello")).unwrap_err();

        assert!(matches!(err, SyntaxError::InvalidString { delimiter: '(', .. }));
        assert_eq!(err.to_string(), "Invalid string at 1:4. String must start with: (");
    }

    #[test]
    fn numbers() {
        assert_eq!(literals("3 -2.5 NUM 7"),
                   [Literal::Num(3.0), Literal::Num(-2.5), Literal::Num(7.0)]);
    }

    #[test]
    fn invalid_number_keyword() {
        let err = parse(scan("NUM seven")).unwrap_err();

        assert_eq!(err,
                   SyntaxError::InvalidNumber { lexeme: "seven".to_string(),
                                                at:     Position::new(1, 4), });
    }

    #[test]
    fn booleans() {
        assert_eq!(literals("True False BOOL 0 BOOL 1 BOOL False BOOL yes"),
                   [Literal::Bool(true),
                    Literal::Bool(false),
                    Literal::Bool(false),
                    Literal::Bool(true),
                    Literal::Bool(false),
                    Literal::Bool(true)]);
    }

    #[test]
    fn bool_keyword_needs_a_word() {
        let err = parse(scan("BOOL")).unwrap_err();

        assert_eq!(err,
                   SyntaxError::MissingOperand { keyword: "BOOL",
                                                 at:      Position::new(1, 0), });
    }
}

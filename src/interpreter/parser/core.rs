use std::collections::VecDeque;

use crate::{
    error::SyntaxError,
    interpreter::{
        scanner::Lexeme,
        token::{Literal, MacroKind, Position, Token, TokenKind},
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Turns raw lexemes into typed tokens.
///
/// Words are pulled from a pending queue before the raw sequence. Splitting a
/// glued word such as `(x)` pushes the pieces onto the front of that queue,
/// so they are classified exactly as if they had been written apart, without
/// touching the raw sequence itself.
pub struct Parser {
    pub(in crate::interpreter::parser) lexemes: std::vec::IntoIter<Lexeme>,
    pub(in crate::interpreter::parser) pending: VecDeque<Lexeme>,
    pub(in crate::interpreter::parser) tokens:  Vec<Token>,
}

/// Parses a lexeme sequence into tokens.
///
/// # Errors
/// Returns a `SyntaxError` for malformed literals and labels.
///
/// # Example
/// ```
/// use stackline::interpreter::{parser::parse, scanner::scan, token::TokenKind};
///
/// let tokens = parse(scan("(ADD 1 2)")).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind.name()).collect();
///
/// assert_eq!(kinds, ["LEFT_PAREN", "MACRO", "NUMBER", "NUMBER", "RIGHT_PAREN"]);
/// ```
pub fn parse(lexemes: Vec<Lexeme>) -> ParseResult<Vec<Token>> {
    Parser::new(lexemes).parse()
}

impl Parser {
    /// Creates a parser over a lexeme sequence.
    #[must_use]
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self { lexemes: lexemes.into_iter(),
               pending: VecDeque::new(),
               tokens:  Vec::new(), }
    }

    /// Consumes every lexeme and returns the token sequence.
    ///
    /// # Errors
    /// Returns the first `SyntaxError` encountered.
    pub fn parse(mut self) -> ParseResult<Vec<Token>> {
        while let Some(lexeme) = self.next_lexeme() {
            self.parse_lexeme(lexeme)?;
        }

        Ok(self.tokens)
    }

    /// Classifies one lexeme by its exact value.
    fn parse_lexeme(&mut self, lexeme: Lexeme) -> ParseResult<()> {
        match lexeme.value.as_str() {
            "STR" | "NUM" | "BOOL" if self.follows_read() => self.push_cast(&lexeme),
            "BOOL" => self.parse_bool_keyword(&lexeme)?,
            "True" | "False" => self.push_bool(&lexeme),
            "STR" => self.parse_paren_string(&lexeme)?,
            "NUM" => self.parse_number_keyword(&lexeme)?,
            "EQ" => self.push_operator(TokenKind::Equal, "EQ", &lexeme),
            "GT" => self.push_operator(TokenKind::Greater, "GT", &lexeme),
            "GTE" => self.push_operator(TokenKind::GreaterEqual, "GTE", &lexeme),
            "LT" => self.push_operator(TokenKind::Less, "LT", &lexeme),
            "LTE" => self.push_operator(TokenKind::LessEqual, "LTE", &lexeme),
            "NOT" => self.push_operator(TokenKind::Not, "NOT", &lexeme),
            "AND" => self.push_operator(TokenKind::And, "AND", &lexeme),
            "OR" => self.push_operator(TokenKind::Or, "OR", &lexeme),
            "VAR" => self.push_keyword(TokenKind::Var, "VAR", &lexeme),
            "ASSIGN" => self.push_keyword(TokenKind::Assign, "ASSIGN", &lexeme),
            "TO" => self.push_keyword(TokenKind::To, "TO", &lexeme),
            "IF" => self.push(TokenKind::If, Literal::Absent, lexeme.position()),
            "END" => self.push(TokenKind::End, Literal::Absent, lexeme.position()),
            "JUMP" => self.parse_label(TokenKind::Jump, "JUMP", &lexeme)?,
            "SECTION" => self.parse_label(TokenKind::Section, "SECTION", &lexeme)?,
            _ => self.classify(lexeme)?,
        }

        Ok(())
    }

    /// Handles every word that is not a reserved keyword.
    fn classify(&mut self, lexeme: Lexeme) -> ParseResult<()> {
        let value = lexeme.value.as_str();

        if let Some(kind) = MacroKind::from_keyword(value) {
            let literal = Literal::Keyword(kind.keyword());
            self.push(TokenKind::Macro(kind), literal, lexeme.position());
        } else if value.starts_with('"') {
            self.parse_quoted_string(lexeme)?;
        } else if let Some(number) = crate::util::num::parse_decimal(value) {
            self.push(TokenKind::Number, Literal::Num(number), lexeme.position());
        } else if value.starts_with('(') {
            self.split_open_paren(&lexeme);
        } else if value.ends_with(')') {
            self.split_close_paren(&lexeme);
        } else if is_identifier(value) {
            let name = Literal::Ident(lexeme.value.clone());
            self.push(TokenKind::Identifier, name, lexeme.position());
        }

        Ok(())
    }

    /// `(rest` becomes `(` followed by `rest` re-queued one column later.
    fn split_open_paren(&mut self, lexeme: &Lexeme) {
        self.push(TokenKind::LeftParen, Literal::Absent, lexeme.position());
        self.requeue_tail(lexeme, '('.len_utf8());
    }

    /// `rest)` re-queues `rest` and a lone `)` so the prefix is classified
    /// before the parenthesis is emitted.
    fn split_close_paren(&mut self, lexeme: &Lexeme) {
        let split = lexeme.value.len() - ')'.len_utf8();
        if split == 0 {
            self.push(TokenKind::RightParen, Literal::Absent, lexeme.position());
            return;
        }

        let prefix = &lexeme.value[..split];
        let paren_column = lexeme.column + prefix.chars().count();
        self.pending
            .push_front(Lexeme::new(")", Position::new(lexeme.line, paren_column)));
        self.pending.push_front(Lexeme::new(prefix, lexeme.position()));
    }

    /// Re-queues whatever follows `byte_offset` in a lexeme, if anything.
    pub(in crate::interpreter::parser) fn requeue_tail(&mut self,
                                                       lexeme: &Lexeme,
                                                       byte_offset: usize) {
        let tail = &lexeme.value[byte_offset..];
        if tail.is_empty() {
            return;
        }

        let column = lexeme.column + lexeme.value[..byte_offset].chars().count();
        self.pending
            .push_front(Lexeme::new(tail, Position::new(lexeme.line, column)));
    }

    /// Pulls the next lexeme, pending ones first.
    pub(in crate::interpreter::parser) fn next_lexeme(&mut self) -> Option<Lexeme> {
        self.pending.pop_front().or_else(|| self.lexemes.next())
    }

    /// Pulls the word a keyword operates on.
    ///
    /// Closing parentheses glued to the word are split off and re-queued, so
    /// `(NUM 5)` still closes its group.
    pub(in crate::interpreter::parser) fn next_operand(&mut self,
                                                       keyword: &'static str,
                                                       at: Position)
                                                       -> ParseResult<Lexeme> {
        let mut lexeme = self.next_lexeme()
                             .ok_or(SyntaxError::MissingOperand { keyword, at })?;

        let trimmed = lexeme.value.trim_end_matches(')').len();
        if trimmed > 0 && trimmed < lexeme.value.len() {
            self.requeue_tail(&lexeme, trimmed);
            lexeme.value.truncate(trimmed);
        }

        Ok(lexeme)
    }

    /// Peeks at the position of the next lexeme without consuming it.
    fn next_position(&self) -> Option<Position> {
        if let Some(lexeme) = self.pending.front() {
            return Some(lexeme.position());
        }
        self.lexemes.as_slice().first().map(Lexeme::position)
    }

    /// Emits a comparison or logical operator.
    ///
    /// The operator takes the position of the word after it; the keyword's
    /// own position is only used when it is the last word of the program.
    fn push_operator(&mut self, kind: TokenKind, keyword: &'static str, lexeme: &Lexeme) {
        let at = self.next_position().unwrap_or_else(|| lexeme.position());
        self.push(kind, Literal::Keyword(keyword), at);
    }

    fn push_keyword(&mut self, kind: TokenKind, keyword: &'static str, lexeme: &Lexeme) {
        self.push(kind, Literal::Keyword(keyword), lexeme.position());
    }

    pub(in crate::interpreter::parser) fn push(&mut self,
                                               kind: TokenKind,
                                               literal: Literal,
                                               at: Position) {
        self.tokens.push(Token::new(kind, literal, at));
    }
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();

    chars.next()
         .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::scanner::scan;

    fn kinds(source: &str) -> Vec<&'static str> {
        parse(scan(source)).unwrap().iter().map(|t| t.kind.name()).collect()
    }

    #[test]
    fn identifier_pattern() {
        assert!(is_identifier("total_2"));
        assert!(is_identifier("_x"));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn glued_parentheses_are_split() {
        assert_eq!(kinds("((a) OR b)"),
                   ["LEFT_PAREN", "LEFT_PAREN", "IDENTIFIER", "RIGHT_PAREN", "OR", "IDENTIFIER", "RIGHT_PAREN"]);
    }

    #[test]
    fn split_pieces_keep_their_columns() {
        let tokens = parse(scan("  (abc)")).unwrap();
        let columns: Vec<_> = tokens.iter().map(|t| t.column).collect();

        assert_eq!(columns, [2, 3, 6]);
    }

    #[test]
    fn split_keywords_are_still_keywords() {
        assert_eq!(kinds("(ADD 1 2)"), ["LEFT_PAREN", "MACRO", "NUMBER", "NUMBER", "RIGHT_PAREN"]);
        assert_eq!(kinds("(NUM 5)"), ["LEFT_PAREN", "NUMBER", "RIGHT_PAREN"]);
    }

    #[test]
    fn operators_take_the_next_word_position() {
        let tokens = parse(scan("1 EQ\n  2")).unwrap();

        assert_eq!(tokens[1].kind, TokenKind::Equal);
        assert_eq!(tokens[1].position(), Position::new(2, 2));
        assert_eq!(tokens[1].literal, Literal::Keyword("EQ"));
    }

    #[test]
    fn trailing_operator_keeps_its_own_position() {
        let tokens = parse(scan("1 AND")).unwrap();

        assert_eq!(tokens[1].position(), Position::new(1, 2));
    }

    #[test]
    fn unknown_words_are_dropped() {
        assert_eq!(kinds("@@ 1 %"), ["NUMBER"]);
    }

    #[test]
    fn assignment_keywords() {
        assert_eq!(kinds("VAR ASSIGN 5 TO x"), ["VAR", "ASSIGN", "NUMBER", "TO", "IDENTIFIER"]);
    }
}

use logos::Logos;

use crate::interpreter::token::Position;

/// A raw whitespace-delimited word and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The word exactly as written.
    pub value:  String,
    /// 1-based line.
    pub line:   usize,
    /// 0-based character offset inside the line.
    pub column: usize,
}

impl Lexeme {
    /// Creates a lexeme at the given position.
    #[must_use]
    pub fn new(value: impl Into<String>, at: Position) -> Self {
        Self { value:  value.into(),
               line:   at.line,
               column: at.column, }
    }

    /// The position of the first character of the word.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Line bookkeeping carried by the scanner.
///
/// `line_start` is the byte offset where the current line begins, so a word's
/// column is the number of characters between it and the word.
pub struct ScannerExtras {
    /// The current 1-based line.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for ScannerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// The pieces of source text the scanner distinguishes.
#[derive(Logos, Debug, PartialEq)]
#[logos(extras = ScannerExtras)]
enum Piece {
    /// Any run of non-blank characters. `#note` is a word like any other.
    #[regex(r"[^ \t\r\n\f]+", |lex| lex.slice().to_string(), allow_greedy = true)]
    Word(String),
    /// A lone `#` and the rest of its line.
    #[regex(r"#([ \t\r\f][^\n]*)?", logos::skip, allow_greedy = true, priority = 10)]
    Comment,
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Blank,
}

/// Splits source text into whitespace-separated words.
///
/// Blank lines and runs of whitespace produce nothing, and a `#` standing
/// alone as a word discards the rest of its line. Scanning never fails: every input,
/// including the empty string, yields a (possibly empty) list.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// The lexemes in source order.
///
/// # Example
/// ```
/// use stackline::interpreter::scanner::scan;
///
/// let lexemes = scan("PRINT 1\n  ADD 2 3 # sum");
/// let words: Vec<_> = lexemes.iter().map(|l| l.value.as_str()).collect();
///
/// assert_eq!(words, ["PRINT", "1", "ADD", "2", "3"]);
/// assert_eq!((lexemes[2].line, lexemes[2].column), (2, 2));
/// ```
#[must_use]
pub fn scan(source: &str) -> Vec<Lexeme> {
    let mut lexer = Piece::lexer_with_extras(source, ScannerExtras::default());
    let mut lexemes = Vec::new();

    while let Some(piece) = lexer.next() {
        if let Ok(Piece::Word(value)) = piece {
            let start = lexer.span().start;
            let column = source[lexer.extras.line_start..start].chars().count();
            lexemes.push(Lexeme::new(value, Position::new(lexer.extras.line, column)));
        }
    }

    lexemes
}

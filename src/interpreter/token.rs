use std::fmt;

/// A location inside the source text.
///
/// Lines are 1-based, columns are the 0-based character offset inside the
/// line. Displayed as `line:column`, which is the form every error message
/// uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The 1-based source line.
    pub line:   usize,
    /// The 0-based character offset inside the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The built-in macros.
///
/// Macros are multi-token operations that pull their own operands from the
/// token stream, unlike operators which take their left operand from what was
/// evaluated before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    /// `ADD a b`, numeric addition or string concatenation.
    Add,
    /// `SUB a b`
    Sub,
    /// `MUL a b`
    Mul,
    /// `DIV a b`
    Div,
    /// `READ [STR|NUM|BOOL] [AND PRINT prompt]`
    Read,
    /// `PRINT values...` up to the end of the line.
    Print,
    /// `EXIT [code]`
    Exit,
}

impl MacroKind {
    /// Looks up the macro named by a source keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "ADD" => Self::Add,
            "SUB" => Self::Sub,
            "MUL" => Self::Mul,
            "DIV" => Self::Div,
            "READ" => Self::Read,
            "PRINT" => Self::Print,
            "EXIT" => Self::Exit,
            _ => return None,
        })
    }

    /// The keyword the macro is written with.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Read => "READ",
            Self::Print => "PRINT",
            Self::Exit => "EXIT",
        }
    }
}

/// Target type of a `READ` conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    /// `STR`, keep the input line as a string.
    Str,
    /// `NUM`, parse the input line as a number.
    Num,
    /// `BOOL`, interpret the input line as a boolean.
    Bool,
}

impl CastKind {
    /// Looks up the cast named by a source keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "STR" => Some(Self::Str),
            "NUM" => Some(Self::Num),
            "BOOL" => Some(Self::Bool),
            _ => None,
        }
    }

    /// The keyword the cast is written with.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Num => "NUM",
            Self::Bool => "BOOL",
        }
    }
}

/// The closed set of token kinds produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// String literal.
    String,
    /// Number literal.
    Number,
    /// Boolean literal.
    Boolean,
    /// `EQ`
    Equal,
    /// `GT`
    Greater,
    /// `GTE`
    GreaterEqual,
    /// `LT`
    Less,
    /// `LTE`
    LessEqual,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT`
    Not,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Variable names, and any other bare word.
    Identifier,
    /// `VAR`
    Var,
    /// `ASSIGN`
    Assign,
    /// `TO`
    To,
    /// A built-in macro.
    Macro(MacroKind),
    /// A `READ` conversion target.
    Cast(CastKind),
    /// `JUMP label`
    Jump,
    /// `SECTION label`
    Section,
    /// `IF`
    If,
    /// `END`
    End,
}

impl TokenKind {
    /// The name shown in the type column of the token table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Equal => "EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::Identifier => "IDENTIFIER",
            Self::Var => "VAR",
            Self::Assign => "ASSIGN",
            Self::To => "TO",
            Self::Macro(_) => "MACRO",
            Self::Cast(_) => "CAST",
            Self::Jump => "JUMP",
            Self::Section => "SECTION",
            Self::If => "IF",
            Self::End => "END",
        }
    }
}

/// The typed payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal.
    Str(String),
    /// A number literal.
    Num(f64),
    /// A boolean literal.
    Bool(bool),
    /// The name of an identifier.
    Ident(String),
    /// The label of a `JUMP` or `SECTION`.
    Label(String),
    /// The fixed text of an operator, macro or keyword.
    Keyword(&'static str),
    /// Grouping and block markers carry nothing.
    Absent,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) | Self::Ident(text) | Self::Label(text) => f.write_str(text),
            Self::Num(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Keyword(keyword) => f.write_str(keyword),
            Self::Absent => Ok(()),
        }
    }
}

/// A classified unit of the program.
///
/// Tokens are produced once by the parser and are read-only afterwards. The
/// position is the one the parser chose for the token, which for comparison
/// and logical operators is the position of the word that follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The typed payload.
    pub literal: Literal,
    /// 1-based line.
    pub line:    usize,
    /// 0-based column.
    pub column:  usize,
}

impl Token {
    /// Creates a token at the given position.
    #[must_use]
    pub const fn new(kind: TokenKind, literal: Literal, at: Position) -> Self {
        Self { kind,
               literal,
               line: at.line,
               column: at.column }
    }

    /// The position of the token.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The identifier name or label carried by the token, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.literal {
            Literal::Ident(name) | Literal::Label(name) => Some(name),
            _ => None,
        }
    }

    /// A short human readable rendering used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.literal {
            Literal::Absent => self.kind.name().to_string(),
            ref literal => literal.to_string(),
        }
    }
}

impl fmt::Display for Token {
    /// Renders one row of the token table:
    /// `TYPE | literal | line:column`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = format!("{:>4}", self.literal.to_string());
        write!(f,
               "{:<20} | {:<20} | {:>4}:{:02}",
               self.kind.name(),
               literal,
               self.line,
               self.column)
    }
}

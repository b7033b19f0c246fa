use std::{fmt, mem::discriminant};

use crate::interpreter::token::Literal;

/// Represents a runtime value in the interpreter.
///
/// Everything the operand stack and the variable table hold is one of these.
/// Operators match on the variant and raise a semantic error when it is not
/// the one they accept.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string.
    Str(String),
    /// A double precision number.
    Num(f64),
    /// A boolean, produced by literals, comparisons and logical operators.
    Bool(bool),
    /// The absence of a value, pushed by `READ` at end of input.
    Null,
}

impl Value {
    /// The runtime type name used in error messages.
    ///
    /// # Example
    /// ```
    /// use stackline::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Num(1.0).type_name(), "number");
    /// assert_eq!(Value::Null.type_name(), "null");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Num(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// True when both values have the same runtime type.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Num(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&Literal> for Value {
    /// The value a token's literal stands for when it is used directly.
    ///
    /// Names, labels and keywords become their text; markers without a
    /// literal become `Null`.
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Str(text) | Literal::Ident(text) | Literal::Label(text) => {
                Self::Str(text.clone())
            },
            Literal::Num(number) => Self::Num(*number),
            Literal::Bool(flag) => Self::Bool(*flag),
            Literal::Keyword(keyword) => Self::Str((*keyword).to_string()),
            Literal::Absent => Self::Null,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

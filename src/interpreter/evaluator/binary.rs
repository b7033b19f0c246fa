use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::{Flow, Interpreter, Interrupt},
            host::Host,
        },
        token::TokenKind,
        value::Value,
    },
};

/// The two-operand operators that produce a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// The operator's keyword, as used in error messages.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Equal => "EQ",
            Self::Greater => "GT",
            Self::GreaterEqual => "GTE",
            Self::Less => "LT",
            Self::LessEqual => "LTE",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl<H: Host> Interpreter<'_, H> {
    /// `left EQ|GT|GTE|LT|LTE|AND|OR right`
    ///
    /// The left operand is already evaluated: it is the variable named by the
    /// token right before the operator, or else the top of the stack.
    pub(in crate::interpreter::evaluator) fn interpret_binary(&mut self,
                                                              operator: BinaryOperator)
                                                              -> Flow<()> {
        let left = self.left_operand(self.pc - 1)?;
        let right = self.evaluate_expression()?;
        let keyword = operator.keyword();

        let result = match operator {
            BinaryOperator::Equal => self.equality(keyword, &left, &right)?,
            BinaryOperator::Greater => self.compare(keyword, &left, &right, |a, b| a > b)?,
            BinaryOperator::GreaterEqual => self.compare(keyword, &left, &right, |a, b| a >= b)?,
            BinaryOperator::Less => self.compare(keyword, &left, &right, |a, b| a < b)?,
            BinaryOperator::LessEqual => self.compare(keyword, &left, &right, |a, b| a <= b)?,
            BinaryOperator::And => self.logic(keyword, &left, &right, |a, b| a && b)?,
            BinaryOperator::Or => self.logic(keyword, &left, &right, |a, b| a || b)?,
        };

        self.push(Value::Bool(result))
    }

    /// `NOT value`, or `left NOT EQ right` for inequality.
    pub(in crate::interpreter::evaluator) fn interpret_not(&mut self) -> Flow<()> {
        let not_index = self.pc - 1;

        if self.current().is_some_and(|token| token.kind == TokenKind::Equal) {
            self.pc += 1;
            let left = self.left_operand(not_index)?;
            let right = self.evaluate_expression()?;
            let equal = self.equality("NOT EQ", &left, &right)?;

            return self.push(Value::Bool(!equal));
        }

        match self.evaluate_expression()? {
            Value::Bool(flag) => self.push(Value::Bool(!flag)),
            other => Err(SemanticError::UnexpectedType { operator: "NOT",
                                                         expected: "a boolean",
                                                         found:    other.type_name(),
                                                         at:       self.last_position(), }.into()),
        }
    }

    /// Resolves the left operand of the operator at `operator_index`.
    fn left_operand(&mut self, operator_index: usize) -> Flow<Value> {
        let before = operator_index.checked_sub(1)
                                   .and_then(|index| self.tokens.get(index));

        match before {
            Some(token) if token.kind == TokenKind::Identifier => self.lookup(token),
            _ => Ok(self.stack.pop()?),
        }
    }

    /// Values of the same runtime type compare by value.
    fn equality(&self, operator: &'static str, left: &Value, right: &Value) -> Flow<bool> {
        if !left.same_type(right) {
            return Err(self.mismatch(operator, left, right));
        }

        Ok(left == right)
    }

    fn compare(&self,
               operator: &'static str,
               left: &Value,
               right: &Value,
               op: fn(f64, f64) -> bool)
               -> Flow<bool> {
        match (left, right) {
            (Value::Num(a), Value::Num(b)) => Ok(op(*a, *b)),
            _ => Err(self.mismatch(operator, left, right)),
        }
    }

    fn logic(&self,
             operator: &'static str,
             left: &Value,
             right: &Value,
             op: fn(bool, bool) -> bool)
             -> Flow<bool> {
        match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(op(*a, *b)),
            _ => Err(self.mismatch(operator, left, right)),
        }
    }

    pub(in crate::interpreter::evaluator) fn mismatch(&self,
                                                      operator: &'static str,
                                                      left: &Value,
                                                      right: &Value)
                                                      -> Interrupt {
        SemanticError::TypeMismatch { operator,
                                      left: left.type_name(),
                                      right: right.type_name(),
                                      at: self.last_position() }.into()
    }
}

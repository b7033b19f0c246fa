use crate::{error::RuntimeError, interpreter::value::Value};

/// Capacity of the operand stack unless configured otherwise.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// The bounded last-in-first-out operand stack.
///
/// Its size never exceeds its capacity, and popping or peeking an empty stack
/// is an error rather than a silent `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperandStack {
    values:   Vec<Value>,
    capacity: usize,
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }
}

impl OperandStack {
    /// Creates an empty stack holding at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: Vec::with_capacity(capacity),
               capacity }
    }

    /// Pushes a value on top of the stack.
    ///
    /// # Errors
    /// `RuntimeError::StackOverflow` when the stack is full.
    pub fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if self.values.len() >= self.capacity {
            return Err(RuntimeError::StackOverflow { capacity: self.capacity });
        }

        self.values.push(value);
        Ok(())
    }

    /// Removes and returns the top value.
    ///
    /// # Errors
    /// `RuntimeError::StackUnderflow` when the stack is empty.
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.values.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Returns the top value without removing it.
    ///
    /// # Errors
    /// `RuntimeError::StackUnderflow` when the stack is empty.
    pub fn peek(&self) -> Result<&Value, RuntimeError> {
        self.values.last().ok_or(RuntimeError::StackUnderflow)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The values from bottom to top.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

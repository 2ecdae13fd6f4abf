//! Bounded LIFO stack of signed integers.

use pfusch_common::Cell;
use thiserror::Error;

/// Default stack capacity.
pub const DEFAULT_STACK_CAPACITY: usize = 1000;

/// Stack failures, before the machine attaches a position to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack overflow (capacity {capacity})")]
    Overflow { capacity: usize },
    #[error("stack underflow")]
    Underflow,
    #[error("stack is empty")]
    Empty,
}

/// A fixed-capacity stack. Depth is always in `0..=capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Cell>,
    capacity: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity.min(DEFAULT_STACK_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, value: Cell) -> Result<(), StackError> {
        if self.values.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Cell, StackError> {
        self.values.pop().ok_or(StackError::Underflow)
    }

    /// The top value, without removing it.
    pub fn peek(&self) -> Result<Cell, StackError> {
        self.values.last().copied().ok_or(StackError::Empty)
    }

    /// Overwrite the top value in place. Depth is unchanged.
    pub fn replace_top(&mut self, value: Cell) -> Result<(), StackError> {
        let top = self.values.last_mut().ok_or(StackError::Empty)?;
        *top = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[Cell] {
        &self.values
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

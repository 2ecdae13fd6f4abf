//! Runtime errors for the Pfusch VM.
//!
//! Every error is fatal: the step that detects it stops the run. Each
//! variant carries the instruction pointer position (`at`) where the
//! condition was detected.

use pfusch_common::{Cell, Direction, Position};
use thiserror::Error;

/// Errors that end a program run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Push onto a full stack.
    #[error("stack overflow at {at} (capacity {capacity})")]
    StackOverflow { at: Position, capacity: usize },

    /// Pop from an empty stack.
    #[error("stack underflow at {at}: cannot pop from empty stack")]
    StackUnderflow { at: Position },

    /// Peek at an empty stack.
    #[error("stack is empty at {at}: cannot peek")]
    StackEmpty { at: Position },

    /// Divide or modulo with a zero neighbor cell.
    #[error("division by zero at {at}")]
    DivisionByZero { at: Position },

    /// A neighbor read or write fell outside the grid.
    #[error("cell access outside bounds ({x}, {y}) at {at}")]
    GridAccessOutOfBounds { at: Position, x: isize, y: isize },

    /// Advancing would leave the grid. There is no wraparound.
    #[error("instruction pointer moved outside bounds ({direction}) at {at}")]
    MovementOutOfBounds { at: Position, direction: Direction },

    /// A jump scan reached the grid edge without finding its target.
    #[error("jump target {value} not found scanning {direction} from {at}")]
    JumpTargetNotFound {
        at: Position,
        direction: Direction,
        value: Cell,
    },

    /// An unregistered control character was executed.
    #[error("invalid instruction at {at}: ASCII {code} (control character)")]
    InvalidInstruction { at: Position, code: u8 },

    /// The cell under the instruction pointer is not 7-bit ASCII.
    #[error("invalid instruction at {at}: value {code} (must be 7-bit ASCII)")]
    InvalidByte { at: Position, code: Cell },

    /// An output opcode read a value outside `0..=127`.
    #[error("invalid ASCII value for output at {at}: {value} (must be 0-127)")]
    InvalidOutputByte { at: Position, value: Cell },

    /// The input source failed (end of input is not a failure).
    #[error("input error at {at}: {message}")]
    Input { at: Position, message: String },

    /// The output sink failed.
    #[error("output error at {at}: {message}")]
    Output { at: Position, message: String },
}

impl RuntimeError {
    /// Instruction pointer position where the error was detected.
    pub fn position(&self) -> Position {
        match self {
            RuntimeError::StackOverflow { at, .. }
            | RuntimeError::StackUnderflow { at }
            | RuntimeError::StackEmpty { at }
            | RuntimeError::DivisionByZero { at }
            | RuntimeError::GridAccessOutOfBounds { at, .. }
            | RuntimeError::MovementOutOfBounds { at, .. }
            | RuntimeError::JumpTargetNotFound { at, .. }
            | RuntimeError::InvalidInstruction { at, .. }
            | RuntimeError::InvalidByte { at, .. }
            | RuntimeError::InvalidOutputByte { at, .. }
            | RuntimeError::Input { at, .. }
            | RuntimeError::Output { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        let at = Position::new(3, 1);
        assert_eq!(
            RuntimeError::DivisionByZero { at }.to_string(),
            "division by zero at (3, 1)"
        );
        assert_eq!(
            RuntimeError::MovementOutOfBounds {
                at: Position::ORIGIN,
                direction: Direction::Left
            }
            .to_string(),
            "instruction pointer moved outside bounds (LEFT) at (0, 0)"
        );
        assert_eq!(
            RuntimeError::JumpTargetNotFound {
                at,
                direction: Direction::Down,
                value: 7
            }
            .to_string(),
            "jump target 7 not found scanning DOWN from (3, 1)"
        );
        assert_eq!(
            RuntimeError::InvalidOutputByte { at, value: 200 }.to_string(),
            "invalid ASCII value for output at (3, 1): 200 (must be 0-127)"
        );
        assert_eq!(
            RuntimeError::GridAccessOutOfBounds { at, x: 3, y: -1 }.to_string(),
            "cell access outside bounds (3, -1) at (3, 1)"
        );
    }

    #[test]
    fn position_is_recoverable() {
        let at = Position::new(9, 9);
        assert_eq!(RuntimeError::StackEmpty { at }.position(), at);
        assert_eq!(
            RuntimeError::InvalidInstruction { at, code: 9 }.position(),
            at
        );
    }
}

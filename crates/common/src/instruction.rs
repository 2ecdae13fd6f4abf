//! Semantic categories of opcodes.
//!
//! The engine never matches on raw opcodes. Each [`Opcode`] is translated
//! into an [`Instruction`], a closed sum type grouping opcodes by what they
//! do, so that adding an opcode forces every executor to handle it.

use crate::direction::{Direction, Neighbor};
use crate::opcode::Opcode;

/// Signed integer held by a grid cell or a stack slot.
pub type Cell = i32;

/// Binary arithmetic applied as `top OP neighbor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl ArithOp {
    /// Apply the operation. Returns `None` for division or remainder by zero.
    ///
    /// Overflow wraps, including `i32::MIN / -1`.
    pub fn apply(self, top: Cell, neighbor: Cell) -> Option<Cell> {
        match self {
            ArithOp::Add => Some(top.wrapping_add(neighbor)),
            ArithOp::Subtract => Some(top.wrapping_sub(neighbor)),
            ArithOp::Multiply => Some(top.wrapping_mul(neighbor)),
            ArithOp::Divide if neighbor == 0 => None,
            ArithOp::Divide => Some(top.wrapping_div(neighbor)),
            ArithOp::Modulo if neighbor == 0 => None,
            ArithOp::Modulo => Some(top.wrapping_rem(neighbor)),
        }
    }
}

/// Which way a conditional turn rotates, and the sign that triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Rotate clockwise when the top of stack is positive.
    ClockwiseIfPositive,
    /// Rotate counter-clockwise when the top of stack is negative.
    CounterClockwiseIfNegative,
}

impl Turn {
    /// The direction after this turn given the current top of stack.
    pub fn apply(self, direction: Direction, top: Cell) -> Direction {
        match self {
            Turn::ClockwiseIfPositive if top > 0 => direction.clockwise(),
            Turn::CounterClockwiseIfNegative if top < 0 => direction.counter_clockwise(),
            _ => direction,
        }
    }
}

/// What an opcode does, grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Nop,
    Halt,
    /// Face a direction; the usual advance then moves that way.
    SetDirection(Direction),
    /// Scan for the top-of-stack value and relocate onto it.
    Jump(Direction),
    Turn(Turn),
    PushNeighbor(Neighbor),
    Duplicate,
    Delete,
    Arith(ArithOp, Neighbor),
    Store(Neighbor),
    Output(Neighbor),
    Input(Neighbor),
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        use Direction::*;
        use Neighbor::*;

        match opcode {
            Opcode::Nop => Instruction::Nop,
            Opcode::End => Instruction::Halt,

            Opcode::Left => Instruction::SetDirection(Left),
            Opcode::Down => Instruction::SetDirection(Down),
            Opcode::Up => Instruction::SetDirection(Up),
            Opcode::Right => Instruction::SetDirection(Right),

            Opcode::JumpLeft => Instruction::Jump(Left),
            Opcode::JumpDown => Instruction::Jump(Down),
            Opcode::JumpUp => Instruction::Jump(Up),
            Opcode::JumpRight => Instruction::Jump(Right),

            Opcode::TurnRight => Instruction::Turn(Turn::ClockwiseIfPositive),
            Opcode::TurnLeft => Instruction::Turn(Turn::CounterClockwiseIfNegative),

            Opcode::PushBelow => Instruction::PushNeighbor(Below),
            Opcode::PushAbove => Instruction::PushNeighbor(Above),
            Opcode::Duplicate => Instruction::Duplicate,
            Opcode::Delete => Instruction::Delete,

            Opcode::AddBelow => Instruction::Arith(ArithOp::Add, Below),
            Opcode::AddAbove => Instruction::Arith(ArithOp::Add, Above),
            Opcode::SubtractBelow => Instruction::Arith(ArithOp::Subtract, Below),
            Opcode::SubtractAbove => Instruction::Arith(ArithOp::Subtract, Above),
            Opcode::MultiplyBelow => Instruction::Arith(ArithOp::Multiply, Below),
            Opcode::MultiplyAbove => Instruction::Arith(ArithOp::Multiply, Above),
            Opcode::DivideBelow => Instruction::Arith(ArithOp::Divide, Below),
            Opcode::DivideAbove => Instruction::Arith(ArithOp::Divide, Above),
            Opcode::ModuloBelow => Instruction::Arith(ArithOp::Modulo, Below),
            Opcode::ModuloAbove => Instruction::Arith(ArithOp::Modulo, Above),

            Opcode::StoreBelow => Instruction::Store(Below),
            Opcode::StoreAbove => Instruction::Store(Above),
            Opcode::OutputBelow => Instruction::Output(Below),
            Opcode::OutputAbove => Instruction::Output(Above),
            Opcode::InputBelow => Instruction::Input(Below),
            Opcode::InputAbove => Instruction::Input(Above),
        }
    }
}

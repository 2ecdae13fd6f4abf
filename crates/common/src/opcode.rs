//! Opcode definitions for the Pfusch instruction set.
//!
//! Every opcode is a single 7-bit ASCII symbol. The repertoire is closed:
//! printable characters that are not listed here are no-ops, and control
//! characters that are not listed here are invalid.

/// Identifies the operation bound to a grid symbol.
///
/// The `#[repr(u8)]` discriminant of each variant is the ASCII symbol that
/// selects it, so `opcode as u8` is the character written in program text.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Explicit no operation.
    Nop = b'#',

    // Direction control
    /// Set execution direction to left.
    Left = b'h',
    /// Set execution direction to down.
    Down = b'j',
    /// Set execution direction to up.
    Up = b'k',
    /// Set execution direction to right.
    Right = b'l',
    /// Jump left to the next cell equal to the top of stack.
    JumpLeft = b'H',
    /// Jump down to the next cell equal to the top of stack.
    JumpDown = b'J',
    /// Jump up to the next cell equal to the top of stack.
    JumpUp = b'K',
    /// Jump right to the next cell equal to the top of stack.
    JumpRight = b'L',
    /// Turn clockwise if the top of stack is positive.
    TurnRight = b'x',
    /// Turn counter-clockwise if the top of stack is negative.
    TurnLeft = b'X',
    /// Stop execution successfully.
    End = b'e',

    // Stack
    /// Push the value of the cell below.
    PushBelow = b's',
    /// Push the value of the cell above.
    PushAbove = b'S',
    /// Push a copy of the top value.
    Duplicate = b'd',
    /// Pop and discard the top value.
    Delete = b'D',

    // Arithmetic (top OP neighbor, written back in place)
    /// Add the cell below to the top of stack.
    AddBelow = b'a',
    /// Add the cell above to the top of stack.
    AddAbove = b'A',
    /// Subtract the cell below from the top of stack.
    SubtractBelow = b'r',
    /// Subtract the cell above from the top of stack.
    SubtractAbove = b'R',
    /// Multiply the top of stack by the cell below.
    MultiplyBelow = b'p',
    /// Multiply the top of stack by the cell above.
    MultiplyAbove = b'P',
    /// Divide the top of stack by the cell below, truncating.
    DivideBelow = b'q',
    /// Divide the top of stack by the cell above, truncating.
    DivideAbove = b'Q',
    /// Remainder of the top of stack divided by the cell below.
    ModuloBelow = b'm',
    /// Remainder of the top of stack divided by the cell above.
    ModuloAbove = b'M',

    // Grid writes
    /// Pop the top value and store it in the cell below.
    StoreBelow = b'f',
    /// Pop the top value and store it in the cell above.
    StoreAbove = b'F',

    // I/O
    /// Emit the cell below as one output byte.
    OutputBelow = b'o',
    /// Emit the cell above as one output byte.
    OutputAbove = b'O',
    /// Read one input byte into the cell below.
    InputBelow = b'i',
    /// Read one input byte into the cell above.
    InputAbove = b'I',
}

/// All opcodes, in registration order.
pub const ALL_OPCODES: [Opcode; 32] = [
    Opcode::Nop,
    Opcode::Left,
    Opcode::Down,
    Opcode::Up,
    Opcode::Right,
    Opcode::JumpLeft,
    Opcode::JumpDown,
    Opcode::JumpUp,
    Opcode::JumpRight,
    Opcode::TurnRight,
    Opcode::TurnLeft,
    Opcode::End,
    Opcode::PushBelow,
    Opcode::PushAbove,
    Opcode::Duplicate,
    Opcode::Delete,
    Opcode::AddBelow,
    Opcode::AddAbove,
    Opcode::SubtractBelow,
    Opcode::SubtractAbove,
    Opcode::MultiplyBelow,
    Opcode::MultiplyAbove,
    Opcode::DivideBelow,
    Opcode::DivideAbove,
    Opcode::ModuloBelow,
    Opcode::ModuloAbove,
    Opcode::StoreBelow,
    Opcode::StoreAbove,
    Opcode::OutputBelow,
    Opcode::OutputAbove,
    Opcode::InputBelow,
    Opcode::InputAbove,
];

impl Opcode {
    /// The ASCII symbol that selects this opcode.
    pub fn symbol(self) -> u8 {
        self as u8
    }

    /// Short upper-case name used in listings.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Left => "LEFT",
            Opcode::Down => "DOWN",
            Opcode::Up => "UP",
            Opcode::Right => "RIGHT",
            Opcode::JumpLeft => "JUMP_LEFT",
            Opcode::JumpDown => "JUMP_DOWN",
            Opcode::JumpUp => "JUMP_UP",
            Opcode::JumpRight => "JUMP_RIGHT",
            Opcode::TurnRight => "TURN_RIGHT",
            Opcode::TurnLeft => "TURN_LEFT",
            Opcode::End => "END",
            Opcode::PushBelow => "PUSH_BELOW",
            Opcode::PushAbove => "PUSH_ABOVE",
            Opcode::Duplicate => "DUP",
            Opcode::Delete => "DEL",
            Opcode::AddBelow => "ADD_BELOW",
            Opcode::AddAbove => "ADD_ABOVE",
            Opcode::SubtractBelow => "SUB_BELOW",
            Opcode::SubtractAbove => "SUB_ABOVE",
            Opcode::MultiplyBelow => "MUL_BELOW",
            Opcode::MultiplyAbove => "MUL_ABOVE",
            Opcode::DivideBelow => "DIV_BELOW",
            Opcode::DivideAbove => "DIV_ABOVE",
            Opcode::ModuloBelow => "MOD_BELOW",
            Opcode::ModuloAbove => "MOD_ABOVE",
            Opcode::StoreBelow => "STORE_BELOW",
            Opcode::StoreAbove => "STORE_ABOVE",
            Opcode::OutputBelow => "OUT_BELOW",
            Opcode::OutputAbove => "OUT_ABOVE",
            Opcode::InputBelow => "IN_BELOW",
            Opcode::InputAbove => "IN_ABOVE",
        }
    }

    /// Human-readable description shown by `describe` and the visualizer.
    pub fn description(self) -> &'static str {
        match self {
            Opcode::Nop => "no operation (NOP)",
            Opcode::Left => "set execution direction to left",
            Opcode::Down => "set execution direction to down",
            Opcode::Up => "set execution direction to up",
            Opcode::Right => "set execution direction to right",
            Opcode::JumpLeft => {
                "jump left to next cell matching top of stack; set direction to left"
            }
            Opcode::JumpDown => {
                "jump down to next cell matching top of stack; set direction to down"
            }
            Opcode::JumpUp => "jump up to next cell matching top of stack; set direction to up",
            Opcode::JumpRight => {
                "jump right to next cell matching top of stack; set direction to right"
            }
            Opcode::TurnRight => "if top of stack > 0, turn direction 90 degrees right",
            Opcode::TurnLeft => "if top of stack < 0, turn direction 90 degrees left",
            Opcode::End => "end program execution",
            Opcode::PushBelow => "push value of cell below current to stack",
            Opcode::PushAbove => "push value of cell above current to stack",
            Opcode::Duplicate => "duplicate top value on stack",
            Opcode::Delete => "delete top value off stack",
            Opcode::AddBelow => "add value of cell below to top of stack",
            Opcode::AddAbove => "add value of cell above to top of stack",
            Opcode::SubtractBelow => "reduce top of stack by value of cell below",
            Opcode::SubtractAbove => "reduce top of stack by value of cell above",
            Opcode::MultiplyBelow => "multiply top of stack by value of cell below",
            Opcode::MultiplyAbove => "multiply top of stack by value of cell above",
            Opcode::DivideBelow => "divide top of stack by value of cell below (quotient)",
            Opcode::DivideAbove => "divide top of stack by value of cell above (quotient)",
            Opcode::ModuloBelow => "divide top of stack by value of cell below (remainder)",
            Opcode::ModuloAbove => "divide top of stack by value of cell above (remainder)",
            Opcode::StoreBelow => "pop top of stack and store to cell below",
            Opcode::StoreAbove => "pop top of stack and store to cell above",
            Opcode::OutputBelow => "send value of cell below to stdout",
            Opcode::OutputAbove => "send value of cell above to stdout",
            Opcode::InputBelow => "read one byte from stdin and store in cell below",
            Opcode::InputAbove => "read one byte from stdin and store in cell above",
        }
    }

    /// True for the eight opcodes a program is allowed to start with:
    /// the four direction setters and the four jumps.
    pub fn is_direction_control(self) -> bool {
        matches!(
            self,
            Opcode::Left
                | Opcode::Down
                | Opcode::Up
                | Opcode::Right
                | Opcode::JumpLeft
                | Opcode::JumpDown
                | Opcode::JumpUp
                | Opcode::JumpRight
        )
    }
}

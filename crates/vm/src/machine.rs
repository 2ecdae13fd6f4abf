//! VM state management: grid, stack, instruction pointer, run status.

use crate::error::RuntimeError;
use crate::snapshot::Snapshot;
use crate::stack::{Stack, StackError, DEFAULT_STACK_CAPACITY};
use pfusch_common::{Cell, Direction, DispatchTable, Grid, GridError, Neighbor, Position};

/// The instruction pointer: where execution is and which way it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionPointer {
    pub position: Position,
    pub direction: Direction,
}

impl InstructionPointer {
    /// `(0, 0)` facing right.
    pub fn start() -> Self {
        Self {
            position: Position::ORIGIN,
            direction: Direction::Right,
        }
    }
}

impl Default for InstructionPointer {
    fn default() -> Self {
        Self::start()
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The halt opcode was executed.
    Halted,
    /// A fatal error stopped the run.
    Failed(RuntimeError),
}

/// Result of one successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The machine is still running.
    Continue,
    /// The program halted successfully.
    Halted,
}

/// The Pfusch virtual machine.
///
/// Owns all execution state. Nothing is shared between machines except the
/// read-only standard dispatch table.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) grid: Grid,
    pub(crate) stack: Stack,
    pub(crate) ip: InstructionPointer,
    pub(crate) status: Status,
    /// Completed steps that left the machine running.
    pub(crate) steps: u64,
    /// Every byte emitted so far, in order.
    pub(crate) output: Vec<u8>,
    pub(crate) table: &'static DispatchTable,
}

impl Machine {
    /// Create a machine for `grid` with the default stack capacity.
    pub fn new(grid: Grid) -> Self {
        Self::with_stack_capacity(grid, DEFAULT_STACK_CAPACITY)
    }

    pub fn with_stack_capacity(grid: Grid, capacity: usize) -> Self {
        Self {
            grid,
            stack: Stack::with_capacity(capacity),
            ip: InstructionPointer::start(),
            status: Status::Running,
            steps: 0,
            output: Vec::new(),
            table: DispatchTable::standard(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn ip(&self) -> InstructionPointer {
        self.ip
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Bytes emitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Borrowed view of the current state, for display.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            stack: self.stack.as_slice(),
            ip: self.ip,
            output: &self.output,
            steps: self.steps,
        }
    }

    /// Place the instruction pointer. Test and debugger hook.
    pub fn set_ip(&mut self, ip: InstructionPointer) {
        self.ip = ip;
    }

    /// Mutable stack access. Test and debugger hook.
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    // ---- Stack access with position-tagged errors ----

    pub(crate) fn push(&mut self, value: Cell) -> Result<(), RuntimeError> {
        let at = self.ip.position;
        self.stack.push(value).map_err(|e| stack_error(e, at))
    }

    pub(crate) fn pop(&mut self) -> Result<Cell, RuntimeError> {
        let at = self.ip.position;
        self.stack.pop().map_err(|e| stack_error(e, at))
    }

    pub(crate) fn peek(&self) -> Result<Cell, RuntimeError> {
        self.stack
            .peek()
            .map_err(|e| stack_error(e, self.ip.position))
    }

    // ---- Neighbor cells ----

    pub(crate) fn read_neighbor(&self, neighbor: Neighbor) -> Result<Cell, RuntimeError> {
        let at = self.ip.position;
        let (x, y) = at.offset(0, neighbor.dy());
        self.grid.get(x, y).map_err(|e| grid_error(e, at))
    }

    pub(crate) fn write_neighbor(
        &mut self,
        neighbor: Neighbor,
        value: Cell,
    ) -> Result<(), RuntimeError> {
        let at = self.ip.position;
        let (x, y) = at.offset(0, neighbor.dy());
        self.grid.set(x, y, value).map_err(|e| grid_error(e, at))
    }
}

fn stack_error(e: StackError, at: Position) -> RuntimeError {
    match e {
        StackError::Overflow { capacity } => RuntimeError::StackOverflow { at, capacity },
        StackError::Underflow => RuntimeError::StackUnderflow { at },
        StackError::Empty => RuntimeError::StackEmpty { at },
    }
}

fn grid_error(e: GridError, at: Position) -> RuntimeError {
    match e {
        GridError::OutOfBounds { x, y, .. } => RuntimeError::GridAccessOutOfBounds { at, x, y },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let machine = Machine::new(Grid::from_rows(3, 2, &["le"]));
        assert_eq!(machine.ip(), InstructionPointer::start());
        assert_eq!(machine.ip().direction, Direction::Right);
        assert!(machine.stack().is_empty());
        assert!(machine.is_running());
        assert_eq!(machine.steps(), 0);
        assert!(machine.output().is_empty());
    }

    #[test]
    fn stack_errors_carry_position() {
        let mut machine = Machine::new(Grid::new(3, 3));
        machine.set_ip(InstructionPointer {
            position: Position::new(1, 2),
            direction: Direction::Up,
        });
        assert_eq!(
            machine.pop(),
            Err(RuntimeError::StackUnderflow {
                at: Position::new(1, 2)
            })
        );
        assert_eq!(
            machine.peek(),
            Err(RuntimeError::StackEmpty {
                at: Position::new(1, 2)
            })
        );
    }

    #[test]
    fn overflow_reports_capacity() {
        let mut machine = Machine::with_stack_capacity(Grid::new(1, 1), 1);
        machine.push(1).unwrap();
        assert_eq!(
            machine.push(2),
            Err(RuntimeError::StackOverflow {
                at: Position::ORIGIN,
                capacity: 1
            })
        );
    }

    #[test]
    fn neighbor_above_top_row_is_out_of_bounds() {
        let machine = Machine::new(Grid::new(2, 2));
        assert_eq!(
            machine.read_neighbor(Neighbor::Above),
            Err(RuntimeError::GridAccessOutOfBounds {
                at: Position::ORIGIN,
                x: 0,
                y: -1
            })
        );
        assert_eq!(machine.read_neighbor(Neighbor::Below), Ok(b' ' as Cell));
    }

    #[test]
    fn write_neighbor_below() {
        let mut machine = Machine::new(Grid::new(2, 2));
        machine.write_neighbor(Neighbor::Below, 77).unwrap();
        assert_eq!(machine.grid().get(0, 1), Ok(77));
    }
}

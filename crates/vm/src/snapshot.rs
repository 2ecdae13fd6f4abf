//! Read-only view of a machine between steps.

use crate::machine::InstructionPointer;
use pfusch_common::{Cell, DispatchTable, Grid};
use std::borrow::Cow;

/// Everything a display needs: grid, stack, instruction pointer and the
/// output emitted so far.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    /// Stack values, bottom to top.
    pub stack: &'a [Cell],
    pub ip: InstructionPointer,
    pub output: &'a [u8],
    pub steps: u64,
}

impl Snapshot<'_> {
    /// The cell under the instruction pointer.
    pub fn current_cell(&self) -> Option<Cell> {
        self.grid.at(self.ip.position)
    }

    /// Description of the opcode about to execute.
    pub fn current_description(&self) -> Cow<'static, str> {
        let table = DispatchTable::standard();
        match self.current_cell() {
            Some(cell) => match u8::try_from(cell) {
                Ok(byte) => table.describe(byte),
                Err(_) => Cow::Owned(format!(
                    "invalid character: value {cell} (outside valid 7-bit ASCII range)"
                )),
            },
            None => Cow::Borrowed("instruction pointer outside the grid"),
        }
    }
}

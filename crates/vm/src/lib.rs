//! Pfusch virtual machine: executes grid programs one step at a time.
//!
//! The VM is a stack machine driven by an instruction pointer that walks a
//! fixed grid:
//! - A bounded stack of signed integers
//! - An instruction pointer with a position and one of four directions
//! - A grid whose cells are both program text and data
//!
//! Every fatal condition is returned as a [`RuntimeError`]; nothing in this
//! crate terminates the process.
//!
//! # Usage
//!
//! ```
//! use pfusch_common::Grid;
//! use pfusch_vm::{run, RunConfig, RunOutcome};
//!
//! // Output the cell below, then halt.
//! let grid = Grid::from_rows(3, 2, &["loe", " A"]);
//! let mut output = Vec::<u8>::new();
//! let report = run(grid, &RunConfig::default(), &mut std::io::empty(), &mut output).unwrap();
//!
//! assert_eq!(report.outcome, RunOutcome::Halted);
//! assert_eq!(output, b"A");
//! ```

pub mod error;
pub mod execute;
pub mod io;
pub mod machine;
pub mod snapshot;
pub mod stack;

pub use error::RuntimeError;
pub use execute::{RunOutcome, RunReport};
pub use io::{InputSource, OutputSink};
pub use machine::{InstructionPointer, Machine, Status, StepOutcome};
pub use snapshot::Snapshot;
pub use stack::{Stack, StackError, DEFAULT_STACK_CAPACITY};

use pfusch_common::Grid;
use tracing::debug;

/// Default step ceiling for a run.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Host-supplied limits for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Completed steps after which the run stops without error.
    pub max_steps: u64,
    pub stack_capacity: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

/// Execute a program and report how it stopped.
///
/// This is the primary entry point for the VM. It:
/// 1. Starts at `(0, 0)` facing right with an empty stack
/// 2. Steps until halt, a fatal error, or `config.max_steps`
/// 3. Returns a [`RunReport`] for the two non-fatal endings
///
/// # Errors
///
/// Returns [`RuntimeError`] for any fatal condition (stack underflow,
/// division by zero, leaving the grid, missing jump target, etc.).
pub fn run<I, O>(
    grid: Grid,
    config: &RunConfig,
    input: &mut I,
    output: &mut O,
) -> Result<RunReport, RuntimeError>
where
    I: InputSource + ?Sized,
    O: OutputSink + ?Sized,
{
    debug!(
        width = grid.width(),
        height = grid.height(),
        max_steps = config.max_steps,
        "starting run"
    );
    let mut machine = Machine::with_stack_capacity(grid, config.stack_capacity);
    machine.run(config.max_steps, input, output)
}

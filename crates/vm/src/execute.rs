//! Single-step execution and opcode dispatch for the Pfusch VM.

use crate::error::RuntimeError;
use crate::io::{InputSource, OutputSink};
use crate::machine::{Machine, Status, StepOutcome};
use crate::snapshot::Snapshot;
use pfusch_common::{ArithOp, Cell, Direction, Instruction, Neighbor, Position, Turn};
use std::ops::ControlFlow;
use tracing::{debug, trace, warn};

/// Code points below this are control characters.
const FIRST_PRINTABLE: u8 = 0x20;

/// How control leaves an executed instruction.
enum Flow {
    /// Advance one cell in the current direction.
    Advance,
    /// The instruction already repositioned the IP.
    Jumped,
    Halt,
}

/// Why a bounded run stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program executed its halt opcode.
    Halted,
    /// The host's step ceiling was reached first.
    StepLimitReached,
    /// The observer asked to stop before the program finished.
    Interrupted,
}

/// Summary of a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Completed steps, not counting the halting one.
    pub steps: u64,
}

impl Machine {
    /// Execute exactly one step.
    ///
    /// On error the machine moves to [`Status::Failed`] and every later call
    /// returns the same error. On halt every later call returns
    /// [`StepOutcome::Halted`].
    pub fn step<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<StepOutcome, RuntimeError>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        match &self.status {
            Status::Running => {}
            Status::Halted => return Ok(StepOutcome::Halted),
            Status::Failed(e) => return Err(e.clone()),
        }

        match self.step_running(input, output) {
            Ok(StepOutcome::Continue) => {
                self.steps += 1;
                Ok(StepOutcome::Continue)
            }
            Ok(StepOutcome::Halted) => {
                debug!(steps = self.steps, "program halted");
                self.status = Status::Halted;
                Ok(StepOutcome::Halted)
            }
            Err(e) => {
                debug!(steps = self.steps, error = %e, "program failed");
                self.status = Status::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Step until halt, error, or `max_steps` completed steps.
    pub fn run<I, O>(
        &mut self,
        max_steps: u64,
        input: &mut I,
        output: &mut O,
    ) -> Result<RunReport, RuntimeError>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        self.run_observed(max_steps, input, output, |_| ControlFlow::Continue(()))
    }

    /// Like [`Machine::run`], calling `observe` with a snapshot before each step.
    ///
    /// Returning [`ControlFlow::Break`] from `observe` ends the run with
    /// [`RunOutcome::Interrupted`] before that step executes.
    pub fn run_observed<I, O, F>(
        &mut self,
        max_steps: u64,
        input: &mut I,
        output: &mut O,
        mut observe: F,
    ) -> Result<RunReport, RuntimeError>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
        F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
    {
        while self.steps < max_steps {
            if observe(&self.snapshot()).is_break() {
                debug!(steps = self.steps, "run interrupted by observer");
                return Ok(RunReport {
                    outcome: RunOutcome::Interrupted,
                    steps: self.steps,
                });
            }
            if self.step(input, output)? == StepOutcome::Halted {
                return Ok(RunReport {
                    outcome: RunOutcome::Halted,
                    steps: self.steps,
                });
            }
        }

        warn!(max_steps, "step limit reached");
        Ok(RunReport {
            outcome: RunOutcome::StepLimitReached,
            steps: self.steps,
        })
    }

    fn step_running<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<StepOutcome, RuntimeError>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        let at = self.ip.position;
        let code = self.grid.at(at).ok_or(RuntimeError::MovementOutOfBounds {
            at,
            direction: self.ip.direction,
        })?;

        let symbol = match u8::try_from(code) {
            Ok(byte) if byte <= 127 => byte,
            _ => return Err(RuntimeError::InvalidByte { at, code }),
        };

        let flow = match self.table.lookup(symbol) {
            Some(opcode) => {
                trace!(x = at.x, y = at.y, opcode = opcode.mnemonic(), "execute");
                self.execute(Instruction::from(opcode), input, output)?
            }
            None if symbol < FIRST_PRINTABLE => {
                return Err(RuntimeError::InvalidInstruction { at, code: symbol });
            }
            None => Flow::Advance,
        };

        match flow {
            Flow::Halt => Ok(StepOutcome::Halted),
            Flow::Jumped => Ok(StepOutcome::Continue),
            Flow::Advance => {
                self.advance()?;
                Ok(StepOutcome::Continue)
            }
        }
    }

    fn execute<I, O>(
        &mut self,
        instruction: Instruction,
        input: &mut I,
        output: &mut O,
    ) -> Result<Flow, RuntimeError>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        match instruction {
            Instruction::Nop => {}
            Instruction::Halt => return Ok(Flow::Halt),
            Instruction::SetDirection(direction) => self.ip.direction = direction,
            Instruction::Jump(direction) => {
                self.exec_jump(direction)?;
                return Ok(Flow::Jumped);
            }
            Instruction::Turn(turn) => self.exec_turn(turn)?,
            Instruction::PushNeighbor(neighbor) => {
                let value = self.read_neighbor(neighbor)?;
                self.push(value)?;
            }
            Instruction::Duplicate => {
                let value = self.peek()?;
                self.push(value)?;
            }
            Instruction::Delete => {
                self.pop()?;
            }
            Instruction::Arith(op, neighbor) => self.exec_arith(op, neighbor)?,
            Instruction::Store(neighbor) => {
                let value = self.pop()?;
                self.write_neighbor(neighbor, value)?;
            }
            Instruction::Output(neighbor) => self.exec_output(neighbor, output)?,
            Instruction::Input(neighbor) => self.exec_input(neighbor, input)?,
        }
        Ok(Flow::Advance)
    }

    // ---- Movement ----

    /// Move one cell in the current direction. There is no wraparound.
    fn advance(&mut self) -> Result<(), RuntimeError> {
        let at = self.ip.position;
        let direction = self.ip.direction;
        let (dx, dy) = direction.delta();
        let (x, y) = at.offset(dx, dy);
        if !self.grid.contains(x, y) {
            return Err(RuntimeError::MovementOutOfBounds { at, direction });
        }
        self.ip.position = Position::new(x as usize, y as usize);
        Ok(())
    }

    /// Scan from one cell past the IP towards `direction` for a cell equal
    /// to the top of stack. The IP is untouched unless a match is found.
    fn exec_jump(&mut self, direction: Direction) -> Result<(), RuntimeError> {
        let at = self.ip.position;
        let value = self.peek()?;
        let target = self
            .scan(at, direction, value)
            .ok_or(RuntimeError::JumpTargetNotFound {
                at,
                direction,
                value,
            })?;

        trace!(from = %at, to = %target, %direction, value, "jump");
        self.ip.position = target;
        self.ip.direction = direction;
        Ok(())
    }

    fn scan(&self, from: Position, direction: Direction, value: Cell) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let (mut x, mut y) = from.offset(dx, dy);
        while self.grid.contains(x, y) {
            if self.grid.get(x, y).ok()? == value {
                return Some(Position::new(x as usize, y as usize));
            }
            x += dx;
            y += dy;
        }
        None
    }

    fn exec_turn(&mut self, turn: Turn) -> Result<(), RuntimeError> {
        let top = self.peek()?;
        self.ip.direction = turn.apply(self.ip.direction, top);
        Ok(())
    }

    // ---- Data ----

    /// Replace the top of stack with `top OP neighbor`. Depth never changes,
    /// and nothing is written when the operation fails.
    fn exec_arith(&mut self, op: ArithOp, neighbor: Neighbor) -> Result<(), RuntimeError> {
        let at = self.ip.position;
        let top = self.peek()?;
        let operand = self.read_neighbor(neighbor)?;
        let result = op
            .apply(top, operand)
            .ok_or(RuntimeError::DivisionByZero { at })?;
        self.stack
            .replace_top(result)
            .map_err(|_| RuntimeError::StackEmpty { at })
    }

    // ---- I/O ----

    fn exec_output<O>(&mut self, neighbor: Neighbor, output: &mut O) -> Result<(), RuntimeError>
    where
        O: OutputSink + ?Sized,
    {
        let at = self.ip.position;
        let value = self.read_neighbor(neighbor)?;
        let byte = match u8::try_from(value) {
            Ok(byte) if byte <= 127 => byte,
            _ => return Err(RuntimeError::InvalidOutputByte { at, value }),
        };

        output.emit(byte).map_err(|e| RuntimeError::Output {
            at,
            message: e.to_string(),
        })?;
        self.output.push(byte);
        Ok(())
    }

    /// End of input stores 0.
    fn exec_input<I>(&mut self, neighbor: Neighbor, input: &mut I) -> Result<(), RuntimeError>
    where
        I: InputSource + ?Sized,
    {
        let at = self.ip.position;
        let byte = input.next_byte().map_err(|e| RuntimeError::Input {
            at,
            message: e.to_string(),
        })?;
        self.write_neighbor(neighbor, Cell::from(byte.unwrap_or(0)))
    }
}

//! CLI command implementations.

use pfusch_cli::args::{parse_symbol, RunArgs};
use pfusch_cli::visual::{render_frame, CLEAR_SCREEN};
use pfusch_common::{DispatchTable, Grid};
use pfusch_vm::{Machine, RunConfig, RunOutcome, RunReport, RuntimeError, Snapshot};
use std::fs;
use std::io::{self, Read, Write};
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;
use tracing::debug;

const RUN_USAGE: &str = "Usage: pfusch run <file.pf> [--max-steps N] [--visual] [--delay-ms N]";

/// Load and execute a program with stdin and stdout as its I/O.
pub fn run(args: &[String]) -> Result<(), i32> {
    let opts = RunArgs::parse(args).map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("{RUN_USAGE}");
        1
    })?;

    let grid = load_file(&opts.path)?;
    let max_steps = opts.step_limit();
    debug!(max_steps, visual = opts.visual, "running program");
    let mut input = io::stdin().lock();

    let result = if opts.visual {
        run_visual(grid, max_steps, opts.delay_ms, &mut input).map_err(|e| {
            eprintln!("error: cannot draw frame: {e}");
            1
        })?
    } else {
        let config = RunConfig {
            max_steps,
            ..RunConfig::default()
        };
        pfusch_vm::run(grid, &config, &mut input, &mut io::stdout().lock())
    };

    match result {
        Ok(report) => {
            match report.outcome {
                RunOutcome::Halted => {
                    eprintln!("program ended normally after {} steps", report.steps)
                }
                RunOutcome::StepLimitReached => eprintln!(
                    "execution stopped after {} steps to prevent an infinite loop",
                    report.steps
                ),
                RunOutcome::Interrupted => {
                    eprintln!("execution interrupted after {} steps", report.steps)
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(2)
        }
    }
}

/// Load a program and report its grid, without running it.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: pfusch check <file.pf>");
        return Err(1);
    }

    let input = &args[0];
    let grid = load_file(input)?;
    println!("OK: {input} ({}x{} grid)", grid.width(), grid.height());
    Ok(())
}

/// Print what each given symbol does.
pub fn describe(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: describe requires at least one symbol");
        eprintln!("Usage: pfusch describe <symbol|code>...");
        return Err(1);
    }

    let table = DispatchTable::standard();
    for arg in args {
        let byte = parse_symbol(arg).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
        println!("{byte:3}  {}", table.describe(byte));
    }
    Ok(())
}

/// List the dispatch table, one opcode per line.
pub fn opcodes(_args: &[String]) -> Result<(), i32> {
    for entry in DispatchTable::standard().entries() {
        println!(
            "{}  {:<16} {}",
            char::from(entry.symbol),
            entry.opcode.mnemonic(),
            entry.description
        );
    }
    Ok(())
}

/// Print the blake3 fingerprint of a loaded program.
pub fn hash(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: hash requires an input file");
        eprintln!("Usage: pfusch hash <file.pf>");
        return Err(1);
    }

    let grid = load_file(&args[0])?;
    println!("{}", grid.fingerprint());
    Ok(())
}

// --- Helpers ---

/// Read and load a program file.
fn load_file(path: &str) -> Result<Grid, i32> {
    debug!(path, "reading program");
    let source = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    pfusch_loader::load(&source).map_err(|e| {
        eprintln!("error: {path}: {e}");
        1
    })
}

/// Run with a frame drawn before every step and once more at the end.
///
/// Program output goes to the output panel rather than straight to stdout.
/// The first failed frame write stops the run and is returned as the outer
/// error.
fn run_visual(
    grid: Grid,
    max_steps: u64,
    delay_ms: u64,
    input: &mut impl Read,
) -> io::Result<Result<RunReport, RuntimeError>> {
    let mut screen = io::stdout().lock();
    run_visual_on(grid, max_steps, delay_ms, input, &mut screen)
}

fn run_visual_on(
    grid: Grid,
    max_steps: u64,
    delay_ms: u64,
    input: &mut impl Read,
    screen: &mut impl Write,
) -> io::Result<Result<RunReport, RuntimeError>> {
    let mut machine = Machine::new(grid);
    let delay = Duration::from_millis(delay_ms);
    let mut draw_error = None;

    let result = machine.run_observed(max_steps, input, &mut io::sink(), |snapshot| {
        if let Err(e) = draw(&mut *screen, snapshot) {
            draw_error = Some(e);
            return ControlFlow::Break(());
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        ControlFlow::Continue(())
    });

    if let Some(e) = draw_error {
        return Err(e);
    }
    draw(screen, &machine.snapshot())?;
    Ok(result)
}

fn draw(screen: &mut impl Write, snapshot: &Snapshot<'_>) -> io::Result<()> {
    write!(screen, "{CLEAR_SCREEN}{}", render_frame(snapshot))?;
    screen.flush()
}

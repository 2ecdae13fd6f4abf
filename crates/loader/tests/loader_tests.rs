//! Integration tests for the Pfusch loader.
//!
//! Tests cover:
//! - Loading and running complete programs
//! - Render → load roundtrip on loaded grids
//! - Error cases (invalid bytes, oversize text, bad start cell)

use pfusch_common::{Direction, Grid, Position};
use pfusch_loader::{load, load_with, render, LoadError, LoadOptions};
use pfusch_vm::{run, RunConfig, RunOutcome, RuntimeError};
use proptest::prelude::*;

// ---- Test helpers ----

/// Load and run `source`, returning the run result and everything written.
fn load_and_run(source: &str, input: &[u8]) -> (Result<RunOutcome, RuntimeError>, Vec<u8>) {
    let grid = load(source.as_bytes()).unwrap();
    let mut input = input;
    let mut output: Vec<u8> = Vec::new();
    let result = run(grid, &RunConfig::default(), &mut input, &mut output);
    (result.map(|report| report.outcome), output)
}

// ---- Programs ----

#[test]
fn hello() {
    let (result, output) = load_and_run("looe\n Hi\n", b"");
    assert_eq!(result, Ok(RunOutcome::Halted));
    assert_eq!(output, b"Hi");
}

#[test]
fn echo_one_byte() {
    let (result, output) = load_and_run("lij\n  #\neOh\n", b"Z");
    assert_eq!(result, Ok(RunOutcome::Halted));
    assert_eq!(output, b"Z");
}

#[test]
fn crlf_program_runs_like_lf() {
    let (result, output) = load_and_run("looe\r\n Hi\r\n", b"");
    assert_eq!(result, Ok(RunOutcome::Halted));
    assert_eq!(output, b"Hi");
}

#[test]
fn countdown_fixture_loads_and_loops() {
    let source = include_str!("../../../tests/programs/countdown.pf");
    let (result, output) = load_and_run(source, b"");
    assert_eq!(result, Ok(RunOutcome::Halted));
    assert_eq!(output, b"***");
}

#[test]
fn shipped_fixtures_pass_start_rule() {
    let fixtures = [
        include_str!("../../../tests/programs/hello.pf"),
        include_str!("../../../tests/programs/echo.pf"),
        include_str!("../../../tests/programs/loop.pf"),
        include_str!("../../../tests/programs/leave.pf"),
        include_str!("../../../tests/programs/countdown.pf"),
        include_str!("../../../tests/programs/divide_by_zero.pf"),
    ];
    for source in fixtures {
        assert!(load(source.as_bytes()).is_ok(), "{source:?}");
    }
}

#[test]
fn walking_into_padding_leaves_the_grid() {
    // No halt: the IP crosses the padded spaces to the right edge.
    let (result, _) = load_and_run("l", b"");
    assert_eq!(
        result,
        Err(RuntimeError::MovementOutOfBounds {
            at: Position::new(68, 0),
            direction: Direction::Right
        })
    );
}

#[test]
fn fills_full_default_grid() {
    let line = format!("l{}\n", "#".repeat(68));
    let mut source = line.repeat(42);
    source.replace_range(1..2, "e");
    let grid = load(source.as_bytes()).unwrap();
    assert_eq!(grid.get(68, 41), Ok(b'#' as i32));
    let (result, _) = load_and_run(&source, b"");
    assert_eq!(result, Ok(RunOutcome::Halted));
}

// ---- Rendering ----

#[test]
fn render_is_canonical() {
    let grid = load(b"lo e   \r\n Hi  \n\n\n").unwrap();
    assert_eq!(render(&grid), "lo e\n Hi\n");
}

#[test]
fn render_then_load_roundtrip() {
    let source = "lsrlOraxe\n 30# BA#\n   k   h\n";
    let grid = load(source.as_bytes()).unwrap();
    let text = render(&grid);
    assert_eq!(text, source);
    assert_eq!(load(text.as_bytes()).unwrap(), grid);
}

#[test]
fn render_custom_size() {
    let options = LoadOptions {
        width: 4,
        height: 3,
    };
    let grid = load_with(b"jD\n\nlA e", &options).unwrap();
    assert_eq!(render(&grid), "jD\n\nlA e\n");
}

// ---- Errors ----

#[test]
fn error_invalid_byte_position() {
    let err = load("l\n  é\n".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        LoadError::InvalidByte {
            byte: 0xc3,
            line: 2,
            column: 3
        }
    );
}

#[test]
fn error_line_too_long() {
    let source = format!("l{}", "#".repeat(69));
    assert_eq!(
        load(source.as_bytes()),
        Err(LoadError::LineTooLong {
            line: 1,
            length: 70,
            max: 69
        })
    );
}

#[test]
fn error_too_many_lines() {
    let source = "l\n".repeat(43);
    assert_eq!(
        load(source.as_bytes()),
        Err(LoadError::TooManyLines { found: 43, max: 42 })
    );
}

#[test]
fn exactly_max_lines_is_fine() {
    assert!(load("l\n".repeat(42).as_bytes()).is_ok());
}

#[test]
fn error_bad_start() {
    assert_eq!(
        load(b" le"),
        Err(LoadError::InvalidStart { found: Some(b' ') })
    );
    assert_eq!(
        load(b"e"),
        Err(LoadError::InvalidStart { found: Some(b'e') })
    );
}

#[test]
fn error_messages_are_readable() {
    let err = load(b"#").unwrap_err();
    assert_eq!(
        err.to_string(),
        "program must start with a direction control opcode (hjklHJKL) at (0, 0), found '#'"
    );
}

// ---- Properties ----

fn arb_line() -> impl Strategy<Value = Vec<u8>> {
    // Printable ASCII; spaces included so trimming is exercised.
    prop::collection::vec(0x20u8..0x7f, 0..12)
}

proptest! {
    /// Rendering a loaded grid and loading it again gives the same grid.
    #[test]
    fn roundtrip_loaded_grids(
        start in prop::sample::select(b"hjklHJKL".to_vec()),
        lines in prop::collection::vec(arb_line(), 0..6),
    ) {
        let options = LoadOptions { width: 12, height: 6 };
        let mut source = vec![start];
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                source.extend(line.iter().take(11));
            } else {
                source.push(b'\n');
                source.extend(line);
            }
        }
        let grid = load_with(&source, &options).unwrap();
        let text = render(&grid);
        prop_assert_eq!(load_with(text.as_bytes(), &options).unwrap(), grid);
    }

    /// Any byte above 127 is rejected wherever it appears.
    #[test]
    fn high_bytes_rejected(byte in 128u8..=255, column in 1usize..10) {
        let mut line = vec![b'l'; column];
        line[column - 1] = byte;
        let mut source = b"l\n".to_vec();
        source.extend(&line);
        let err = load(&source).unwrap_err();
        prop_assert_eq!(err, LoadError::InvalidByte { byte, line: 2, column });
    }
}

#[test]
fn loaded_grid_is_default_size() {
    let grid: Grid = load(b"l").unwrap();
    assert_eq!((grid.width(), grid.height()), (69, 42));
}

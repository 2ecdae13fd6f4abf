//! Pfusch loader: program text to grid, and back.
//!
//! Loading is strict: every byte must be 7-bit ASCII, the text must fit the
//! grid, and the first cell must turn the instruction pointer somewhere.
//! Rendering is the inverse for any loaded grid.
//!
//! # Usage
//!
//! ```
//! use pfusch_loader::{load, render};
//!
//! let grid = load(b"loe\n A\n").unwrap();
//! assert_eq!(grid.width(), 69);
//! assert_eq!(grid.height(), 42);
//! assert_eq!(render(&grid), "loe\n A\n");
//! ```

pub mod error;

mod reader;
mod render;

pub use error::LoadError;

use pfusch_common::{DispatchTable, Grid, Opcode, Position, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use reader::{check_line, split_lines};
use tracing::debug;

/// Grid dimensions used when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub width: usize,
    pub height: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Load program text into a grid of the default size.
pub fn load(source: &[u8]) -> Result<Grid, LoadError> {
    load_with(source, &LoadOptions::default())
}

/// Load program text into a grid of `options.width x options.height`.
///
/// Short lines and missing rows are filled with spaces. Returns the first
/// error encountered, scanning lines top to bottom.
pub fn load_with(source: &[u8], options: &LoadOptions) -> Result<Grid, LoadError> {
    let lines = split_lines(source);
    if lines.len() > options.height {
        return Err(LoadError::TooManyLines {
            found: lines.len(),
            max: options.height,
        });
    }
    for (idx, line) in lines.iter().enumerate() {
        check_line(line, idx + 1, options.width)?;
    }

    let grid = Grid::from_rows(options.width, options.height, &lines);
    check_start(&grid)?;

    debug!(
        lines = lines.len(),
        width = options.width,
        height = options.height,
        "program loaded"
    );
    Ok(grid)
}

/// Render a grid as canonical program text.
///
/// `load_with(render(g).as_bytes(), ..)` gives back `g` for any grid that
/// was itself loaded with the same options.
pub fn render(grid: &Grid) -> String {
    render::render(grid)
}

fn check_start(grid: &Grid) -> Result<(), LoadError> {
    let found = grid
        .at(Position::ORIGIN)
        .and_then(|cell| u8::try_from(cell).ok());
    let is_control = found
        .and_then(|byte| DispatchTable::standard().lookup(byte))
        .is_some_and(Opcode::is_direction_control);
    if is_control {
        Ok(())
    } else {
        Err(LoadError::InvalidStart { found })
    }
}

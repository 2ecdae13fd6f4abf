//! Canonical text form of a grid.

use pfusch_common::{Cell, Grid};

/// Stand-in for cells that are not 7-bit ASCII.
const UNPRINTABLE: char = char::REPLACEMENT_CHARACTER;

/// Render `grid` as text: one line per row, each ending in `\n`.
///
/// Trailing spaces are trimmed from every row and trailing empty rows are
/// dropped, so a blank grid renders as the empty string.
pub(crate) fn render(grid: &Grid) -> String {
    let mut lines: Vec<String> = grid
        .rows()
        .map(|row| {
            let text: String = row.iter().map(|&cell| cell_char(cell)).collect();
            text.trim_end_matches(' ').to_string()
        })
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn cell_char(cell: Cell) -> char {
    match u8::try_from(cell) {
        Ok(byte) if byte <= 127 => char::from(byte),
        _ => UNPRINTABLE,
    }
}

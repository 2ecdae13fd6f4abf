//! Terminal frames for `run --visual`.
//!
//! A frame is the grid with the instruction pointer highlighted, a side
//! panel with the IP and the stack, an output panel, and a line describing
//! the instruction about to run.

use pfusch_common::Cell;
use pfusch_vm::Snapshot;
use std::fmt::Write;

/// Clear the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HIGHLIGHT: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Inner width of the side panel.
const PANEL_WIDTH: usize = 25;

/// Rows in the output panel, including its title.
const OUTPUT_ROWS: usize = 10;

/// First side-panel row used for stack entries.
const STACK_ROW: usize = 6;

/// Render one frame. Ends with a newline.
pub fn render_frame(snapshot: &Snapshot<'_>) -> String {
    let grid = snapshot.grid;
    let grid_span = grid.width() + 4;
    let mut out = String::new();

    out.push('┌');
    out.push_str(&"─".repeat(grid_span));
    out.push('┬');
    out.push_str(&"─".repeat(PANEL_WIDTH));
    out.push_str("┐\n");

    for (y, row) in grid.rows().enumerate() {
        let _ = write!(out, "│{y:2} │");
        for (x, &cell) in row.iter().enumerate() {
            let c = display_char(cell);
            if snapshot.ip.position.x == x && snapshot.ip.position.y == y {
                let _ = write!(out, "{HIGHLIGHT}{c}{RESET}");
            } else {
                out.push(c);
            }
        }
        let _ = writeln!(out, "│{:<width$}│", side_panel(snapshot, y), width = PANEL_WIDTH);
    }

    out.push('├');
    out.push_str(&"─".repeat(grid_span));
    out.push('┴');
    out.push_str(&"─".repeat(PANEL_WIDTH));
    out.push_str("┤\n");

    let inner = grid_span + 1 + PANEL_WIDTH;
    let _ = writeln!(out, "│{:<inner$}│", " Output:");
    let lines = output_lines(snapshot.output, inner - 2, OUTPUT_ROWS - 1);
    for line in lines {
        let _ = writeln!(out, "│ {line:<width$} │", width = inner - 2);
    }

    out.push('└');
    out.push_str(&"─".repeat(inner));
    out.push_str("┘\n");

    out.push_str(&instruction_line(snapshot));
    out.push('\n');
    out
}

/// Printable ASCII as-is, everything else as `#`.
fn display_char(cell: Cell) -> char {
    match u8::try_from(cell) {
        Ok(byte) if (0x20..=0x7e).contains(&byte) => char::from(byte),
        _ => '#',
    }
}

fn side_panel(snapshot: &Snapshot<'_>, row: usize) -> String {
    let ip = snapshot.ip;
    match row {
        0 => format!(" Step: {}", snapshot.steps),
        1 => " IP Position:".to_string(),
        2 => format!(" ({:2}, {:2})", ip.position.x, ip.position.y),
        3 => format!(" Direction: {}", ip.direction),
        4 => "─".repeat(PANEL_WIDTH),
        5 => " Stack (top to bottom):".to_string(),
        STACK_ROW if snapshot.stack.is_empty() => " (empty)".to_string(),
        _ => {
            let depth = row - STACK_ROW;
            match snapshot.stack.len().checked_sub(depth + 1) {
                Some(index) => format!(" [{index:2}]: {}", snapshot.stack[index]),
                None => String::new(),
            }
        }
    }
}

/// Split output into at most `rows` lines of at most `width` characters.
///
/// `\n` starts a new line; other unprintable bytes show as `#`. The most
/// recent lines are kept when the output overflows.
fn output_lines(output: &[u8], width: usize, rows: usize) -> Vec<String> {
    let mut lines = vec![String::new()];
    for &byte in output {
        if byte == b'\n' {
            lines.push(String::new());
            continue;
        }
        if lines.last().is_some_and(|line| line.chars().count() >= width) {
            lines.push(String::new());
        }
        if let Some(line) = lines.last_mut() {
            line.push(display_char(Cell::from(byte)));
        }
    }

    let skip = lines.len().saturating_sub(rows);
    let mut visible: Vec<String> = lines.into_iter().skip(skip).collect();
    visible.resize(rows, String::new());
    visible
}

fn instruction_line(snapshot: &Snapshot<'_>) -> String {
    let position = snapshot.ip.position;
    match snapshot.current_cell() {
        Some(cell) => format!(
            "Current instruction at {position}: '{}' (ASCII {cell}) - {}",
            display_char(cell),
            snapshot.current_description()
        ),
        None => format!("Instruction pointer at {position} is outside the grid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfusch_common::Grid;
    use pfusch_vm::Machine;

    fn frame_for(rows: &[&str], width: usize) -> String {
        let machine = Machine::new(Grid::from_rows(width, rows.len(), rows));
        render_frame(&machine.snapshot())
    }

    #[test]
    fn highlights_instruction_pointer() {
        let frame = frame_for(&["le"], 2);
        assert!(frame.contains("\x1b[7ml\x1b[0me"));
    }

    #[test]
    fn borders_line_up() {
        let frame = frame_for(&["le", "  "], 2);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], format!("┌{}┬{}┐", "─".repeat(6), "─".repeat(25)));
        let width = lines[0].chars().count();
        assert_eq!(lines[2].chars().count(), width);
        assert_eq!(lines[3], format!("├{}┴{}┤", "─".repeat(6), "─".repeat(25)));
        assert_eq!(lines[4].chars().count(), width);
        assert_eq!(lines[14].chars().count(), width);
        assert!(lines[14].starts_with('└'));
    }

    #[test]
    fn panel_shows_ip_and_empty_stack() {
        let mut grid = Grid::new(3, 8);
        grid.set(0, 0, b'l' as Cell).unwrap();
        let machine = Machine::new(grid);
        let frame = render_frame(&machine.snapshot());
        assert!(frame.contains(" IP Position:"));
        assert!(frame.contains(" ( 0,  0)"));
        assert!(frame.contains(" Direction: RIGHT"));
        assert!(frame.contains(" (empty)"));
    }

    #[test]
    fn stack_listed_top_first() {
        let mut machine = Machine::new(Grid::new(3, 9));
        machine.stack_mut().push(11).unwrap();
        machine.stack_mut().push(22).unwrap();
        let frame = render_frame(&machine.snapshot());
        let top = frame.find("[ 1]: 22").unwrap();
        let bottom = frame.find("[ 0]: 11").unwrap();
        assert!(top < bottom);
    }

    #[test]
    fn instruction_line_describes_current_cell() {
        let frame = frame_for(&["le"], 2);
        assert!(frame.ends_with(
            "Current instruction at (0, 0): 'l' (ASCII 108) - set execution direction to right\n"
        ));
    }

    #[test]
    fn output_wraps_and_masks() {
        let lines = output_lines(b"ab\ncdef\x01", 3, 4);
        assert_eq!(lines, vec!["ab", "cde", "f#", ""]);
    }

    #[test]
    fn output_keeps_latest_lines() {
        let lines = output_lines(b"1\n2\n3\n4", 5, 2);
        assert_eq!(lines, vec!["3", "4"]);
    }

    #[test]
    fn unprintable_cells_shown_as_hash() {
        assert_eq!(display_char(9), '#');
        assert_eq!(display_char(127), '#');
        assert_eq!(display_char(-4), '#');
        assert_eq!(display_char(b'~' as Cell), '~');
    }
}

//! Line splitting and byte validation for program text.

use crate::error::LoadError;

/// Split `source` into lines.
///
/// Lines end at `\n`; one trailing `\r` per line is dropped. A final newline
/// does not start another line, so `b"ab\n"` is one line.
pub(crate) fn split_lines(source: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = source.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// Check one line against the 7-bit range and the grid width.
///
/// `line_num` is 1-based.
pub(crate) fn check_line(line: &[u8], line_num: usize, width: usize) -> Result<(), LoadError> {
    if let Some(idx) = line.iter().position(|&b| b > 127) {
        return Err(LoadError::InvalidByte {
            byte: line[idx],
            line: line_num,
            column: idx + 1,
        });
    }
    if line.len() > width {
        return Err(LoadError::LineTooLong {
            line: line_num,
            length: line.len(),
            max: width,
        });
    }
    Ok(())
}

//! Error types for the Pfusch loader.

use thiserror::Error;

/// Errors produced while turning program text into a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A byte outside 7-bit ASCII. Line and column are 1-based.
    #[error("line {line}, column {column}: invalid byte 0x{byte:02x} (outside valid 7-bit ASCII range)")]
    InvalidByte { byte: u8, line: usize, column: usize },

    #[error("line {line}: {length} characters exceeds the grid width of {max}")]
    LineTooLong {
        line: usize,
        length: usize,
        max: usize,
    },

    #[error("program has {found} lines, grid height is {max}")]
    TooManyLines { found: usize, max: usize },

    /// Cell (0, 0) must hold one of `h j k l H J K L`.
    #[error("program must start with a direction control opcode (hjklHJKL) at (0, 0), found {}", describe_start(.found))]
    InvalidStart { found: Option<u8> },
}

fn describe_start(found: &Option<u8>) -> String {
    match *found {
        Some(byte) if byte.is_ascii_graphic() => format!("'{}'", byte as char),
        Some(byte) => format!("ASCII {byte}"),
        None => "an empty grid".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_byte() {
        let e = LoadError::InvalidByte {
            byte: 0xc3,
            line: 2,
            column: 5,
        };
        assert_eq!(
            e.to_string(),
            "line 2, column 5: invalid byte 0xc3 (outside valid 7-bit ASCII range)"
        );
    }

    #[test]
    fn error_display_line_too_long() {
        let e = LoadError::LineTooLong {
            line: 1,
            length: 70,
            max: 69,
        };
        assert_eq!(
            e.to_string(),
            "line 1: 70 characters exceeds the grid width of 69"
        );
    }

    #[test]
    fn error_display_too_many_lines() {
        let e = LoadError::TooManyLines { found: 43, max: 42 };
        assert_eq!(e.to_string(), "program has 43 lines, grid height is 42");
    }

    #[test]
    fn error_display_invalid_start() {
        let e = LoadError::InvalidStart { found: Some(b'#') };
        assert!(e.to_string().ends_with("found '#'"));
        let e = LoadError::InvalidStart { found: Some(b' ') };
        assert!(e.to_string().ends_with("found ASCII 32"));
        let e = LoadError::InvalidStart { found: None };
        assert!(e.to_string().ends_with("found an empty grid"));
    }
}

//! Errors shared by the grid store and the dispatch table.

use thiserror::Error;

/// Errors from bounds-checked grid access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A read or write addressed a cell outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
}

/// Errors from building a dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Every slot is occupied; the symbol could not be placed.
    #[error("dispatch table is full (capacity {capacity}), cannot register {symbol:#04x}")]
    TableFull { symbol: u8, capacity: usize },

    /// The symbol already has a handler.
    #[error("symbol {symbol:#04x} is already registered")]
    Duplicate { symbol: u8 },
}

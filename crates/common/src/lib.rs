//! Pfusch common types: opcodes, the grid store and the dispatch table.
//!
//! This crate provides the data model shared by the loader and the VM:
//!
//! - [`Opcode`]: the 32 symbols of the instruction set
//! - [`Instruction`]: opcodes grouped into semantic categories
//! - [`Direction`], [`Position`], [`Neighbor`]: movement primitives
//! - [`Grid`]: the fixed-size program grid
//! - [`DispatchTable`]: symbol lookup and descriptions
//!
//! # Dependencies
//!
//! `thiserror` for error derives and `blake3` for grid fingerprints.

pub mod direction;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod instruction;
pub mod opcode;

// Re-export commonly used types at the crate root.
pub use direction::{Direction, Neighbor, Position};
pub use dispatch::{DispatchEntry, DispatchTable};
pub use error::{DispatchError, GridError};
pub use grid::{Grid, BLANK, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use instruction::{ArithOp, Cell, Instruction, Turn};
pub use opcode::{Opcode, ALL_OPCODES};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(direction::ALL_DIRECTIONS.to_vec())
    }

    proptest! {
        /// `describe` answers for every byte and never returns empty text.
        #[test]
        fn describe_is_total(byte in any::<u8>()) {
            let text = DispatchTable::standard().describe(byte);
            prop_assert!(!text.is_empty());
        }

        /// Bytes above 127 are never registered and always described as invalid.
        #[test]
        fn high_bytes_are_invalid(byte in 128u8..=255) {
            let table = DispatchTable::standard();
            prop_assert_eq!(table.lookup(byte), None);
            prop_assert!(table.describe(byte).starts_with("invalid character"));
        }

        /// Four clockwise turns return to the starting direction.
        #[test]
        fn four_turns_are_identity(dir in arb_direction()) {
            prop_assert_eq!(dir.clockwise().clockwise().clockwise().clockwise(), dir);
            prop_assert_eq!(
                dir.counter_clockwise().counter_clockwise().counter_clockwise().counter_clockwise(),
                dir
            );
        }

        /// A turn never fires when the top of stack has the wrong sign.
        #[test]
        fn turns_respect_sign(dir in arb_direction(), top in any::<i32>()) {
            let cw = Turn::ClockwiseIfPositive.apply(dir, top);
            let ccw = Turn::CounterClockwiseIfNegative.apply(dir, top);
            if top > 0 {
                prop_assert_eq!(cw, dir.clockwise());
                prop_assert_eq!(ccw, dir);
            } else if top < 0 {
                prop_assert_eq!(cw, dir);
                prop_assert_eq!(ccw, dir.counter_clockwise());
            } else {
                prop_assert_eq!(cw, dir);
                prop_assert_eq!(ccw, dir);
            }
        }

        /// Grid reads succeed exactly inside the bounds.
        #[test]
        fn grid_bounds(x in -3isize..10, y in -3isize..10) {
            let grid = Grid::new(5, 4);
            let inside = (0..5).contains(&x) && (0..4).contains(&y);
            prop_assert_eq!(grid.get(x, y).is_ok(), inside);
        }
    }
}

//! Pieces of the `pfusch` host that are worth testing without a terminal:
//! argument parsing and the visual-mode frame renderer.

pub mod args;
pub mod visual;

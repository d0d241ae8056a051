//! Mathematical utilities and decisions.

mod cell;
pub use cell::Cell;
mod color;
pub use color::*;
mod coord;
pub use coord::*;
mod grid_iter;
pub use grid_iter::*;
mod grid_rect;
pub use grid_rect::*;
mod plane;
pub use plane::*;
#[cfg(feature = "serde")]
mod serde_impls;

// We make an assumption in several places that `usize` is at least 32 bits.
// It's likely that compilation would not succeed anyway, but let's make it explicit.
#[cfg(target_pointer_width = "16")]
compile_error!("stowage does not support platforms with less than 32-bit `usize`");

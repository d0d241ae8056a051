//! Mathematical utilities and decisions: cells, rectangles, and planar storage.

#[doc(inline)]
pub use stowage_base::math::*;

//! This library is an internal component of [`stowage`],
//! which defines the cell coordinate types and rectangle math.
//! Do not depend on this library; use only [`stowage`] instead.
//!
//! [`stowage`]: https://crates.io/crates/stowage/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;
#[macro_use]
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `stowage`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `stowage`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;

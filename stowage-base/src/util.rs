//! Tools that we could imagine being in the Rust standard library, but aren't.

mod log;
pub use log::standard_filter;

#[cfg(any(feature = "std", test))]
mod multi_failure;
#[doc(hidden)] // for tests only
#[cfg(any(feature = "std", test))]
pub use multi_failure::MultiFailure;

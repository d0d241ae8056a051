//! Stowage is the occupancy and placement engine behind grid inventories:
//! backpacks, tactical rigs, storage crates, the ground, and pockets, where items of
//! different sizes occupy rectangles of cells and are moved around by drag and drop.
//!
//! This crate defines the authoritative spatial model and the rules for changing it.
//! It does not render anything or read input devices; a presentation layer feeds it
//! pointer positions and draws what it reports.
//!
//! ## Data model
//!
//! * An [`Item`] has an [`ItemId`] and a size in whole cells. It is owned by value by
//!   whichever container currently holds it, so it can never be counted in two grids
//!   at once.
//! * A [`GridSurface`] is the occupancy model of one container: a fixed-size rectangle of
//!   cells, each of which is empty or refers to the item covering it.
//! * Placement is performed by methods such as [`GridSurface::try_place()`] and
//!   [`GridSurface::pick_up()`]. A placement that collides with exactly one existing item
//!   swaps: the existing item is evicted and handed back to the caller. A placement that
//!   collides with two or more items, or does not fit inside the grid, is rejected
//!   without any change.
//! * [`pointer::CellMetrics`] maps pointer positions to cells, and
//!   [`highlight`] derives the valid/swap/invalid preview for the item being dragged.
//!   [`drag::DragSession`] ties these together as an event-driven state machine.
//! * [`identity::GridIdentity`] gives a grid a stable GUID, a kind, and feature flags
//!   used by persistence and container policy.
//!
//! ## Coordinate system
//!
//! Cell `(0, 0)` is the top-left cell of a grid; X increases to the right and Y increases
//! downward. Pointer space may have Y increasing either way; see [`pointer::YAxis`].
//!
//! ## Crate features
//!
//! This crate, `stowage`, defines the following feature flags:
//!
//! * `save` (default):
//!   Enable `serde` serialization of grid snapshots, identities, and
//!   [`config::ContainerConfig`], including loading configuration from JSON.
//!
//! ## Dependencies and global state
//!
//! `stowage` has no global state. Instead of a process-wide manager, grids are collected in
//! an explicitly constructed [`registry::GridRegistry`]. It does write log messages using
//! the [`log`] crate and is therefore subject to that global configuration;
//! [`util::standard_filter`] is a recommended filter for the per-pointer-event messages.
//!
//! `stowage` depends on and re-exports the following crates as part of its public API:
//!
//! * [`euclid`] for vector math (as `stowage::euclid`).
//! * [`uuid`] for grid GUIDs (as `stowage::uuid`).
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod math;

mod item;
pub use item::{Item, ItemId};
mod surface;
pub use surface::{DimensionsError, GridSurface};
mod placement;
pub use placement::*;

pub mod config;
pub mod drag;
pub mod highlight;
pub mod identity;
pub mod pointer;
pub mod registry;
#[cfg(feature = "save")]
pub mod save;
pub mod util;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
/// Re-export the version of the `uuid` library we're using for grid GUIDs.
pub use uuid;

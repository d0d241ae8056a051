//! Data types which represent saved grids in a format explicitly designed for
//! serialization, and versioned to ensure ability to deserialize older data.
//!
//! As a general rule, all types in this file should avoid referring to types outside
//! this file, except where specifically intended. This ensures that changes to internal
//! representations will not accidentally leak to the save format via
//! `#[derive(Serialize, Deserialize)]`.
//!
//! General properties of the serialization schema:
//!
//! * 2D points and sizes are represented as 2-element arrays
//!   (and not, say, as structures with named fields).
//! * Item identifiers are plain integers.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub(crate) enum GridSnapshotSer {
    GridSnapshotV1 {
        guid: Uuid,
        dimensions: [u32; 2],
        /// Sorted by `id`.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<ItemRecordV1Ser>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ItemRecordV1Ser {
    pub id: u64,
    pub anchor: [i32; 2],
    pub size: [u32; 2],
}

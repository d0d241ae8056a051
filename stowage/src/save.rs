//! Saving and restoring the contents of grids.
//!
//! A [`GridSnapshot`] lists the identifier, anchor, and size of every item in a grid. The
//! items themselves are not saved; on load, an [`ItemCatalog`] supplied by the host is
//! consulted to confirm each identifier still refers to an item of the saved size.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::identity::GridIdentity;
use crate::math::{Cell, GridRect, GridSize};
use crate::{BlockReason, ConflictKind, DimensionsError, GridSurface, Item, ItemId};

mod schema;


/// The saved form of one [`GridSurface`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct GridSnapshot {
    /// [`GridIdentity::guid()`] of the grid this was taken from.
    pub guid: Uuid,
    #[allow(missing_docs)]
    pub dimensions: GridSize,
    /// One record per placed item, sorted by identifier.
    pub items: Vec<ItemRecord>,
}

/// Where one item was in a [`GridSnapshot`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs, missing_docs)]
pub struct ItemRecord {
    pub id: ItemId,
    pub anchor: Cell,
    pub size: GridSize,
}

/// Source of truth for the sizes of items, used to check a [`GridSnapshot`] when it is
/// restored.
pub trait ItemCatalog {
    /// Returns the size of the item with the given identifier,
    /// or [`None`] if no such item exists any more.
    fn size_of(&self, id: ItemId) -> Option<GridSize>;
}

impl ItemCatalog for BTreeMap<ItemId, GridSize> {
    fn size_of(&self, id: ItemId) -> Option<GridSize> {
        self.get(&id).copied()
    }
}

impl ItemCatalog for hashbrown::HashMap<ItemId, GridSize> {
    fn size_of(&self, id: ItemId) -> Option<GridSize> {
        self.get(&id).copied()
    }
}

impl GridSurface {
    /// Records the position of every item in this grid.
    pub fn snapshot(&self, identity: &GridIdentity) -> GridSnapshot {
        let mut items: Vec<ItemRecord> = self
            .items()
            .filter_map(|item| {
                Some(ItemRecord {
                    id: item.id(),
                    anchor: item.anchor()?,
                    size: item.size(),
                })
            })
            .collect();
        items.sort_by_key(|record| record.id);
        GridSnapshot {
            guid: identity.guid(),
            dimensions: self.dimensions(),
            items,
        }
    }

    /// Rebuilds a grid from a [`GridSnapshot`].
    ///
    /// Every record is checked against the catalog and against the grid's bounds and the
    /// records before it, so a damaged or outdated save produces an error rather than a
    /// grid which breaks the placement invariants. The snapshot's GUID is not checked.
    pub fn restore(
        snapshot: &GridSnapshot,
        catalog: &dyn ItemCatalog,
    ) -> Result<GridSurface, RestoreError> {
        let mut surface =
            GridSurface::try_new(snapshot.dimensions).map_err(RestoreError::Dimensions)?;
        for &record in &snapshot.items {
            if let Err(error) = surface.restore_one(record, catalog) {
                log::warn!("failed to restore grid {}: {error}", snapshot.guid);
                return Err(error);
            }
        }
        log::debug!(
            "restored grid {} with {} items",
            snapshot.guid,
            surface.item_count()
        );
        Ok(surface)
    }

    fn restore_one(
        &mut self,
        record: ItemRecord,
        catalog: &dyn ItemCatalog,
    ) -> Result<(), RestoreError> {
        let ItemRecord { id, anchor, size } = record;
        match catalog.size_of(id) {
            None => return Err(RestoreError::UnknownItem { id }),
            Some(catalog_size) if catalog_size != size => {
                return Err(RestoreError::SizeMismatch {
                    id,
                    saved: size,
                    catalog: catalog_size,
                });
            }
            Some(_) => {}
        }
        if self.contains_item(id) {
            return Err(RestoreError::DuplicateId { id });
        }
        match self.conflicts_at(anchor, size, None) {
            ConflictKind::None => {}
            ConflictKind::Blocked(BlockReason::OutOfBounds | BlockReason::InvalidSize) => {
                return Err(RestoreError::OutOfBounds { id, anchor, size });
            }
            ConflictKind::Blocked(BlockReason::DuplicateId) => {
                return Err(RestoreError::DuplicateId { id });
            }
            ConflictKind::SwappableWith(other)
            | ConflictKind::Blocked(BlockReason::AmbiguousOverlap { first: other, .. }) => {
                return Err(RestoreError::Overlap { id, other });
            }
        }
        let rect = GridRect::checked_from_lower_size(anchor.lower_bounds(), size)
            .map_err(|_| RestoreError::OutOfBounds { id, anchor, size })?;
        self.occupy(rect, Item::new(id, size));
        Ok(())
    }
}

/// Error from [`GridSurface::restore()`].
#[derive(Clone, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum RestoreError {
    /// saved dimensions are invalid
    Dimensions(DimensionsError),

    /// The catalog has no item with this identifier.
    #[displaydoc("item {id} is not in the catalog")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    UnknownItem { id: ItemId },

    /// The catalog disagrees about the size of the item.
    #[displaydoc("item {id} was saved with size {saved:?} but the catalog says {catalog:?}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    SizeMismatch {
        id: ItemId,
        saved: GridSize,
        catalog: GridSize,
    },

    /// The same identifier appears twice.
    #[displaydoc("item {id} appears more than once")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    DuplicateId { id: ItemId },

    /// The item does not fit inside the grid at its saved position.
    #[displaydoc("item {id} of size {size:?} at {anchor:?} is outside the grid")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    OutOfBounds {
        id: ItemId,
        anchor: Cell,
        size: GridSize,
    },

    /// The item overlaps another item restored before it.
    #[displaydoc("item {id} overlaps item {other}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    Overlap { id: ItemId, other: ItemId },
}

impl core::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            RestoreError::Dimensions(e) => Some(e),
            RestoreError::UnknownItem { .. } => None,
            RestoreError::SizeMismatch { .. } => None,
            RestoreError::DuplicateId { .. } => None,
            RestoreError::OutOfBounds { .. } => None,
            RestoreError::Overlap { .. } => None,
        }
    }
}

impl Serialize for GridSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let GridSnapshot {
            guid,
            dimensions,
            ref items,
        } = *self;
        schema::GridSnapshotSer::GridSnapshotV1 {
            guid,
            dimensions: dimensions.to_array(),
            items: items
                .iter()
                .map(|&ItemRecord { id, anchor, size }| schema::ItemRecordV1Ser {
                    id: id.get(),
                    anchor: anchor.into(),
                    size: size.to_array(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GridSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match schema::GridSnapshotSer::deserialize(deserializer)? {
            schema::GridSnapshotSer::GridSnapshotV1 {
                guid,
                dimensions,
                items,
            } => Ok(GridSnapshot {
                guid,
                dimensions: dimensions.into(),
                items: items
                    .into_iter()
                    .map(|schema::ItemRecordV1Ser { id, anchor, size }| ItemRecord {
                        id: ItemId::new(id),
                        anchor: anchor.into(),
                        size: size.into(),
                    })
                    .collect(),
            }),
        }
    }
}

//! [`GridRegistry`]: the set of grids a host is managing, and moving items between them.

use alloc::collections::BTreeMap;
#[cfg(feature = "save")]
use alloc::vec::Vec;
use core::fmt;

use uuid::Uuid;

use crate::identity::{GridFeatures, GridIdentity};
use crate::math::Cell;
use crate::{GridSurface, Item, PlacementError};

/// A collection of grids addressed by their [`GridIdentity::guid()`].
///
/// A host constructs one of these and passes it to whatever needs to find grids or move
/// items between them; there is no global instance. Dropping the registry drops every grid
/// in it, so use [`GridRegistry::unregister()`] and [`GridSurface::into_items()`] first if
/// the items must go somewhere.
#[derive(Clone, Debug, Default)]
pub struct GridRegistry {
    grids: BTreeMap<Uuid, Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    identity: GridIdentity,
    surface: GridSurface,
}

impl GridRegistry {
    /// Constructs an empty registry.
    pub const fn new() -> Self {
        Self {
            grids: BTreeMap::new(),
        }
    }

    /// Adds a grid to the registry.
    ///
    /// Fails, returning the surface inside the error, if a grid with the same GUID is
    /// already registered.
    pub fn register(
        &mut self,
        identity: GridIdentity,
        surface: GridSurface,
    ) -> Result<(), RegistryError> {
        let guid = identity.guid();
        if self.grids.contains_key(&guid) {
            return Err(RegistryError { guid, surface });
        }
        log::debug!("registered grid {guid} ({:?})", identity.kind());
        self.grids.insert(guid, Entry { identity, surface });
        Ok(())
    }

    /// Removes a grid from the registry and returns it.
    pub fn unregister(&mut self, guid: Uuid) -> Option<(GridIdentity, GridSurface)> {
        let Entry { identity, surface } = self.grids.remove(&guid)?;
        log::debug!("unregistered grid {guid}");
        Some((identity, surface))
    }

    #[allow(missing_docs)]
    pub fn get(&self, guid: Uuid) -> Option<&GridSurface> {
        self.grids.get(&guid).map(|entry| &entry.surface)
    }

    #[allow(missing_docs)]
    pub fn get_mut(&mut self, guid: Uuid) -> Option<&mut GridSurface> {
        self.grids.get_mut(&guid).map(|entry| &mut entry.surface)
    }

    /// Returns the identity the grid was registered with.
    pub fn identity(&self, guid: Uuid) -> Option<&GridIdentity> {
        self.grids.get(&guid).map(|entry| &entry.identity)
    }

    /// Iterates over all grids in order of GUID.
    pub fn iter(&self) -> impl Iterator<Item = (&GridIdentity, &GridSurface)> + '_ {
        self.grids
            .values()
            .map(|entry| (&entry.identity, &entry.surface))
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Takes a snapshot of every grid with [`GridFeatures::PERSISTABLE`], in order of GUID.
    #[cfg(feature = "save")]
    pub fn snapshot_persistable(&self) -> Vec<crate::save::GridSnapshot> {
        self.grids
            .values()
            .filter(|entry| entry.identity.has(GridFeatures::PERSISTABLE))
            .map(|entry| entry.surface.snapshot(&entry.identity))
            .collect()
    }

    /// Moves the item at `cell` in grid `from` to `anchor` in grid `to`, which may be the
    /// same grid.
    ///
    /// If the placement is rejected, the item is put back where it was and the error is
    /// returned, so a failed transfer changes nothing. If the placement displaced an item
    /// from `to`, that item is returned and is now the caller's responsibility.
    ///
    /// Grids with [`GridFeatures::READ_ONLY`] are neither taken from nor placed into.
    pub fn transfer(
        &mut self,
        from: Uuid,
        cell: Cell,
        to: Uuid,
        anchor: Cell,
    ) -> Result<Option<Item>, TransferError> {
        self.check_writable(from)?;
        self.check_writable(to)?;

        let source = self.surface_mut(from)?;
        let Some(origin) = source.occupant_item(cell).and_then(Item::anchor) else {
            return Err(TransferError::NothingAt { grid: from, cell });
        };
        let Some(item) = source.pick_up(cell) else {
            return Err(TransferError::NothingAt { grid: from, cell });
        };
        let id = item.id();

        match self.surface_mut(to)?.try_place(item, anchor) {
            Ok(displaced) => {
                log::debug!("transferred {id} from {from} to {to} at {anchor:?}");
                Ok(displaced)
            }
            Err(rejected) => {
                let (item, error) = rejected.into_parts();
                // A rejected placement leaves its grid unchanged, so the cells `item`
                // vacated are still free.
                let source = self.surface_mut(from)?;
                debug_assert!(
                    source.can_place(origin, item.size(), None),
                    "vacated anchor {origin:?} of {id} is no longer free"
                );
                match source.try_place(item, origin) {
                    Ok(None) => {}
                    result => unreachable!("returning {id} to {origin:?} gave {result:?}"),
                }
                log::debug!("transfer of {id} from {from} to {to} rejected: {error}");
                Err(TransferError::Rejected(error))
            }
        }
    }

    fn surface_mut(&mut self, guid: Uuid) -> Result<&mut GridSurface, TransferError> {
        self.get_mut(guid)
            .ok_or(TransferError::UnknownGrid { grid: guid })
    }

    fn check_writable(&self, guid: Uuid) -> Result<(), TransferError> {
        match self.identity(guid) {
            None => Err(TransferError::UnknownGrid { grid: guid }),
            Some(identity) if identity.has(GridFeatures::READ_ONLY) => {
                Err(TransferError::ReadOnly { grid: guid })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Error from [`GridRegistry::register()`]: a grid with the same GUID is already registered.
///
/// Contains the surface that was not registered, so that its items are not lost.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryError {
    guid: Uuid,
    surface: GridSurface,
}

impl RegistryError {
    /// Returns the GUID which was already in use.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Takes back the surface which was not registered.
    pub fn into_surface(self) -> GridSurface {
        self.surface
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a grid with GUID {} is already registered", self.guid)
    }
}

impl core::error::Error for RegistryError {}

/// Error from [`GridRegistry::transfer()`]. When this is returned, no grid has changed.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum TransferError {
    /// No grid with this GUID is registered.
    #[displaydoc("no grid {grid} is registered")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    UnknownGrid { grid: Uuid },

    /// The grid is read-only.
    #[displaydoc("grid {grid} is read-only")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    ReadOnly { grid: Uuid },

    /// There is no item at the source cell.
    #[displaydoc("no item at {cell:?} in grid {grid}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    NothingAt { grid: Uuid, cell: Cell },

    /// The destination grid rejected the item.
    #[displaydoc("destination rejected the item")]
    Rejected(PlacementError),
}

impl core::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TransferError::UnknownGrid { .. } => None,
            TransferError::ReadOnly { .. } => None,
            TransferError::NothingAt { .. } => None,
            TransferError::Rejected(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::GridKind;
    use alloc::string::ToString as _;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_rejects_duplicate_guid() {
        let mut registry = GridRegistry::new();
        let identity = GridIdentity::new(GridKind::PersonalStorage, "backpack");
        registry
            .register(identity, GridSurface::new([4, 4]))
            .unwrap();

        let mut second = GridSurface::new([2, 2]);
        second.insert(Item::new(crate::ItemId::new(1), [1, 1])).unwrap();
        let error = registry.register(identity, second.clone()).unwrap_err();
        assert_eq!(error.guid(), identity.guid());
        assert_eq!(
            error.to_string(),
            alloc::format!("a grid with GUID {} is already registered", identity.guid())
        );
        assert_eq!(error.into_surface(), second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_returns_grid() {
        let mut registry = GridRegistry::new();
        let identity = GridIdentity::new(GridKind::Ground, "ground");
        registry
            .register(identity, GridSurface::new([3, 3]))
            .unwrap();
        let (returned_identity, surface) = registry.unregister(identity.guid()).unwrap();
        assert_eq!(returned_identity, identity);
        assert_eq!(surface.dimensions(), crate::math::GridSize::new(3, 3));
        assert!(registry.is_empty());
        assert_eq!(registry.unregister(identity.guid()), None);
    }

    #[test]
    fn rejected_transfer_puts_item_back() {
        let mut registry = GridRegistry::new();
        let pocket = GridIdentity::new(GridKind::PersonalStorage, "pocket");
        let mut surface = GridSurface::new([3, 3]);
        surface
            .try_place(Item::new(crate::ItemId::new(1), [2, 2]), Cell::new(1, 1))
            .unwrap();
        registry.register(pocket, surface.clone()).unwrap();

        let result = registry.transfer(pocket.guid(), Cell::new(2, 2), pocket.guid(), Cell::new(2, 0));
        assert!(matches!(
            result,
            Err(TransferError::Rejected(PlacementError::OutOfBounds { .. }))
        ));
        assert_eq!(registry.get(pocket.guid()), Some(&surface));
    }

    #[cfg(feature = "save")]
    #[test]
    fn snapshot_only_persistable() {
        let mut registry = GridRegistry::new();
        let kept = GridIdentity::new(GridKind::PersonalStorage, "bag");
        let temporary = GridIdentity::new(GridKind::Ephemeral, "trade window");
        registry.register(kept, GridSurface::new([2, 2])).unwrap();
        registry
            .register(temporary, GridSurface::new([2, 2]))
            .unwrap();
        let snapshots = registry.snapshot_persistable();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].guid, kept.guid());
    }
}

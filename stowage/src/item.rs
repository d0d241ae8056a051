//! [`Item`] and [`ItemId`].

use core::fmt;

use crate::math::{Cell, GridRect, GridSize};

/// Opaque identifier of an [`Item`], stable across save and load.
///
/// Identifiers are assigned by whatever creates items (typically an item catalog or
/// loot table); this crate only compares them.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "save", serde(transparent))]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ItemId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Something which may be stored in a [`GridSurface`](crate::GridSurface),
/// occupying a rectangle of cells.
///
/// An `Item` is owned by value by whichever container currently holds it: a grid, a
/// [`DragSession`](crate::drag::DragSession), or the caller. Its anchor is recorded only
/// by the grid that places it, and is cleared when it is picked up.
///
/// Cloning an item clones its anchor too. A clone of a placed item cannot be placed
/// anywhere until it has been detached (see [`InvalidItem::AlreadyPlaced`]).
///
/// [`InvalidItem::AlreadyPlaced`]: crate::InvalidItem::AlreadyPlaced
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Item {
    id: ItemId,
    size: GridSize,
    /// Top-left cell of the footprint, if the item is currently placed in a grid.
    anchor: Option<Cell>,
}

impl Item {
    /// Constructs an item which is not placed in any grid.
    ///
    /// A size with a zero dimension is permitted here, but such an item will be rejected
    /// by every placement operation.
    #[inline]
    pub fn new(id: ItemId, size: impl Into<GridSize>) -> Self {
        Self {
            id,
            size: size.into(),
            anchor: None,
        }
    }

    /// Returns the identifier of this item.
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the width and height of this item, in cells.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the top-left cell of this item's footprint, or [`None`] if it is not
    /// currently placed in a grid.
    #[inline]
    pub fn anchor(&self) -> Option<Cell> {
        self.anchor
    }

    /// Returns whether this item is currently placed in a grid.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns the rectangle of cells this item occupies, or [`None`] if it is not placed.
    #[inline]
    pub fn footprint(&self) -> Option<GridRect> {
        // Placed items always have a footprint that fits in their grid, so this cannot
        // overflow.
        GridRect::checked_from_lower_size(self.anchor?.lower_bounds(), self.size).ok()
    }

    /// Returns the number of cells this item covers when placed.
    #[inline]
    pub fn area(&self) -> usize {
        (self.size.width as usize).saturating_mul(self.size.height as usize)
    }

    pub(crate) fn set_anchor(&mut self, anchor: Cell) {
        self.anchor = Some(anchor);
    }

    pub(crate) fn detach(&mut self) {
        self.anchor = None;
    }

    /// Returns this item with its anchor cleared, for when the grid that recorded the
    /// anchor is being discarded.
    pub(crate) fn detached(mut self) -> Self {
        self.detach();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn id_formatting() {
        let id = ItemId::new(42);
        assert_eq!(format!("{id}"), "#42");
        assert_eq!(format!("{id:?}"), "ItemId(42)");
    }

    #[test]
    fn new_item_is_detached() {
        let item = Item::new(ItemId::new(1), [2, 3]);
        assert_eq!(item.anchor(), None);
        assert_eq!(item.footprint(), None);
        assert_eq!(item.area(), 6);
    }

    #[test]
    fn footprint_follows_anchor() {
        let mut item = Item::new(ItemId::new(1), [2, 3]);
        item.set_anchor(Cell::new(4, 5));
        assert_eq!(
            item.footprint(),
            Some(GridRect::from_lower_size([4, 5], [2, 3]))
        );
        assert_eq!(item.clone().detached().anchor(), None);
    }
}

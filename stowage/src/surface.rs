//! [`GridSurface`], the occupancy model of one container.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::math::{Cell, GridCoordinate, GridRect, GridSize, Plane};
use crate::{Item, ItemId};

/// The authoritative occupancy model for one container: a fixed-size rectangle of cells,
/// each of which is either empty or refers to the [`Item`] covering it.
///
/// Cell `(0, 0)` is the top-left cell, and the valid cells are
/// `[0, width) × [0, height)`.
///
/// A `GridSurface` owns the items placed in it. The only ways to change its contents are
/// the placement operations ([`try_place()`](Self::try_place),
/// [`pick_up()`](Self::pick_up), [`insert()`](Self::insert),
/// [`organize()`](Self::organize)), which maintain these invariants:
///
/// * Every placed item covers exactly the rectangle given by its anchor and size,
///   and that rectangle is inside the grid.
/// * No cell refers to more than one item, and every cell of an item refers to that item.
/// * Therefore, the number of occupied cells is the sum of the areas of the placed items.
///
/// When a surface is no longer needed, use [`into_items()`](Self::into_items) to take back
/// the items it still holds.
#[derive(Clone, Eq, PartialEq)]
pub struct GridSurface {
    /// For each cell, the item occupying it.
    cells: Plane<Box<[Option<ItemId>]>>,
    /// Every placed item, with its anchor set.
    items: HashMap<ItemId, Item>,
}

impl GridSurface {
    /// Constructs an empty surface with the given width and height in cells.
    ///
    /// Panics if either dimension is zero or does not fit in a [`GridCoordinate`].
    /// Use [`GridSurface::try_new()`] to avoid panics.
    #[track_caller]
    pub fn new(dimensions: impl Into<GridSize>) -> Self {
        match Self::try_new(dimensions) {
            Ok(surface) => surface,
            Err(error) => panic!("GridSurface::new(): {error}"),
        }
    }

    /// Constructs an empty surface with the given width and height in cells.
    ///
    /// Returns an error if either dimension is zero or does not fit in a
    /// [`GridCoordinate`].
    pub fn try_new(dimensions: impl Into<GridSize>) -> Result<Self, DimensionsError> {
        let dimensions = dimensions.into();
        let max = GridCoordinate::MAX.cast_unsigned();
        if dimensions.width == 0
            || dimensions.height == 0
            || dimensions.width > max
            || dimensions.height > max
        {
            return Err(DimensionsError(dimensions));
        }
        Ok(Self {
            cells: Plane::repeat(GridRect::with_size(dimensions), None),
            items: HashMap::new(),
        })
    }

    /// Returns the width and height of this surface in cells.
    #[inline]
    pub fn dimensions(&self) -> GridSize {
        self.cells.bounds().size()
    }

    /// Returns the rectangle of valid cells, which has its lower bounds at the origin.
    #[inline]
    pub fn bounds(&self) -> GridRect {
        self.cells.bounds()
    }

    /// Returns whether `cell` is one of the cells of this surface.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds().contains_cell(cell)
    }

    /// Returns whether every cell of the rectangle with the given top-left cell and size
    /// is [in bounds](Self::in_bounds).
    ///
    /// A rectangle whose extent is not representable is never in bounds.
    #[inline]
    pub fn rect_in_bounds(&self, anchor: Cell, size: GridSize) -> bool {
        GridRect::checked_from_lower_size(anchor.lower_bounds(), size)
            .is_ok_and(|rect| self.bounds().contains_rect(rect))
    }

    /// Returns the identifier of the item occupying `cell`, if any.
    ///
    /// Out-of-bounds cells are always empty.
    #[inline]
    pub fn cell_occupant(&self, cell: Cell) -> Option<ItemId> {
        self.cells.get(cell).copied().flatten()
    }

    /// Returns the item occupying `cell`, if any.
    #[inline]
    pub fn occupant_item(&self, cell: Cell) -> Option<&Item> {
        self.items.get(&self.cell_occupant(cell)?)
    }

    /// Returns the placed item with the given identifier, if it is in this surface.
    #[inline]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Returns whether an item with the given identifier is placed in this surface.
    #[inline]
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Iterates over all placed items, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    /// Returns the number of placed items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no items are placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of cells which are occupied by some item.
    ///
    /// This is always equal to the sum of [`Item::area()`] over [`Self::items()`].
    pub fn occupied_cell_count(&self) -> usize {
        self.cells.as_linear().iter().filter(|c| c.is_some()).count()
    }

    /// Iterates over every cell and its occupant, in row-major order.
    pub fn occupancy(&self) -> impl Iterator<Item = (Cell, Option<ItemId>)> + '_ {
        self.cells.iter().map(|(cell, &occupant)| (cell, occupant))
    }

    /// Tears down this surface, returning every item it held with its anchor cleared,
    /// sorted by identifier.
    #[must_use = "the items are not dropped by the surface; the caller must find them a home"]
    pub fn into_items(self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.into_values().map(Item::detached).collect();
        items.sort_by_key(Item::id);
        log::debug!("tore down surface holding {} items", items.len());
        items
    }

    /// Rebuilds this surface with new dimensions.
    ///
    /// Items whose footprint still fits inside the new bounds keep their anchors.
    /// All other items are returned detached, sorted by identifier, for the caller to
    /// find a new home for.
    pub fn reconfigure(
        self,
        new_dimensions: impl Into<GridSize>,
    ) -> Result<(GridSurface, Vec<Item>), DimensionsError> {
        let mut new_surface = GridSurface::try_new(new_dimensions)?;
        let new_bounds = new_surface.bounds();
        let mut evicted = Vec::new();
        for item in self.items.into_values() {
            match item.footprint() {
                Some(rect) if new_bounds.contains_rect(rect) => {
                    new_surface.occupy(rect, item);
                }
                _ => evicted.push(item.detached()),
            }
        }
        evicted.sort_by_key(Item::id);
        log::debug!(
            "reconfigured surface to {:?}; evicted {} items",
            new_surface.dimensions(),
            evicted.len()
        );
        Ok((new_surface, evicted))
    }

    /// Returns an empty surface with the same dimensions as `self`.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            cells: Plane::repeat(self.bounds(), None),
            items: HashMap::new(),
        }
    }

    /// Writes `item` into every cell of `rect` and records it as placed at the lower
    /// bounds of `rect`.
    ///
    /// The caller must already have checked that `rect` is in bounds, that it has the
    /// item's size, and that every cell of it is empty.
    pub(crate) fn occupy(&mut self, rect: GridRect, mut item: Item) {
        debug_assert!(
            self.bounds().contains_rect(rect),
            "occupy() out of bounds: {rect:?}"
        );
        debug_assert_eq!(rect.size(), item.size());
        debug_assert!(
            rect.interior_iter()
                .all(|cell| self.cell_occupant(cell).is_none()),
            "occupy() over occupied cells: {rect:?}"
        );
        debug_assert!(!self.items.contains_key(&item.id()));

        let id = item.id();
        self.cells.fill_rect(rect, Some(id));
        item.set_anchor(Cell::from(rect.lower_bounds()));
        self.items.insert(id, item);
    }

    /// Clears every cell of `rect` to empty.
    ///
    /// This only affects the cells; use [`Self::detach()`] to remove an item.
    pub(crate) fn clear(&mut self, rect: GridRect) {
        debug_assert!(
            self.bounds().contains_rect(rect),
            "clear() out of bounds: {rect:?}"
        );
        self.cells.fill_rect(rect, None);
    }

    /// Removes the item with the given identifier, clearing its footprint, and returns it
    /// with its anchor cleared.
    pub(crate) fn detach(&mut self, id: ItemId) -> Option<Item> {
        let mut item = self.items.remove(&id)?;
        if let Some(rect) = item.footprint() {
            self.clear(rect);
        }
        item.detach();
        Some(item)
    }

    /// Check the invariants of the surface, panicking if they do not hold.
    ///
    /// This is intended for tests; the placement operations maintain the invariants
    /// themselves.
    #[doc(hidden)]
    #[track_caller]
    pub fn consistency_check(&self) {
        let mut expected_cells = 0usize;
        for (&id, item) in &self.items {
            assert_eq!(id, item.id(), "item stored under wrong key");
            let Some(rect) = item.footprint() else {
                panic!("item {id} in surface has no anchor");
            };
            assert!(
                self.bounds().contains_rect(rect),
                "item {id} footprint {rect:?} out of bounds {:?}",
                self.bounds()
            );
            for cell in rect.interior_iter() {
                assert_eq!(
                    self.cell_occupant(cell),
                    Some(id),
                    "cell {cell:?} in footprint of item {id}"
                );
            }
            expected_cells += item.area();
        }
        for (cell, occupant) in self.occupancy() {
            if let Some(id) = occupant {
                assert!(
                    self.items.contains_key(&id),
                    "cell {cell:?} refers to missing item {id}"
                );
            }
        }
        assert_eq!(
            self.occupied_cell_count(),
            expected_cells,
            "occupied cell count does not match item areas"
        );
    }
}

impl fmt::Debug for GridSurface {
    /// Prints the items sorted by identifier. The alternate form also draws the occupancy
    /// as a map, one row per line, with `.` for empty cells and the last digit of the
    /// occupant's identifier otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by_key(|item| item.id());

        let alternate = f.alternate();
        let mut ds = f.debug_struct("GridSurface");
        ds.field("bounds", &self.bounds());
        ds.field("items", &items);
        if alternate {
            ds.field("map", &OccupancyMap(self));
        }
        ds.finish()
    }
}

/// `Debug`-formatting helper drawing the occupancy of a [`GridSurface`].
struct OccupancyMap<'a>(&'a GridSurface);

impl fmt::Debug for OccupancyMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = self.0.bounds();
        let mut list = f.debug_list();
        for y in bounds.y_range() {
            let row: alloc::string::String = bounds
                .x_range()
                .map(|x| match self.0.cell_occupant(Cell::new(x, y)) {
                    None => '.',
                    Some(id) => char::from_digit((id.get() % 10) as u32, 10).unwrap_or('?'),
                })
                .collect();
            list.entry(&format_args!("{row}"));
        }
        list.finish()
    }
}

/// Error from [`GridSurface::try_new()`] when the dimensions cannot form a grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DimensionsError(pub(crate) GridSize);

impl core::error::Error for DimensionsError {}

impl fmt::Display for DimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let GridSize { width, height, .. } = self.0;
        write!(
            f,
            "grid dimensions {width}×{height} must be at least 1×1 and at most {max} on each axis",
            max = GridCoordinate::MAX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use pretty_assertions::assert_eq;

    fn item(id: u64, size: [u32; 2]) -> Item {
        Item::new(ItemId::new(id), size)
    }

    #[test]
    fn new_is_empty() {
        let surface = GridSurface::new([4, 3]);
        assert_eq!(surface.dimensions(), GridSize::new(4, 3));
        assert_eq!(surface.bounds(), GridRect::from_lower_size([0, 0], [4, 3]));
        assert!(surface.is_empty());
        assert_eq!(surface.occupied_cell_count(), 0);
        assert_eq!(surface.cell_occupant(Cell::new(0, 0)), None);
        surface.consistency_check();
    }

    #[test]
    fn zero_dimensions_rejected() {
        let error = GridSurface::try_new([0, 3]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "grid dimensions 0×3 must be at least 1×1 and at most 2147483647 on each axis"
        );
    }

    #[test]
    fn bounds_queries() {
        let surface = GridSurface::new([10, 10]);
        assert!(surface.in_bounds(Cell::new(0, 0)));
        assert!(surface.in_bounds(Cell::new(9, 9)));
        assert!(!surface.in_bounds(Cell::new(10, 0)));
        assert!(!surface.in_bounds(Cell::new(0, -1)));
        assert!(surface.rect_in_bounds(Cell::new(8, 8), GridSize::new(2, 2)));
        assert!(!surface.rect_in_bounds(Cell::new(9, 9), GridSize::new(2, 2)));
        assert!(!surface.rect_in_bounds(Cell::new(-1, 0), GridSize::new(1, 1)));
        assert!(!surface.rect_in_bounds(
            Cell::new(GridCoordinate::MAX, 0),
            GridSize::new(2, 1)
        ));
    }

    #[test]
    fn occupy_and_clear() {
        let mut surface = GridSurface::new([5, 5]);
        let rect = GridRect::from_lower_size([1, 2], [2, 3]);
        surface.occupy(rect, item(7, [2, 3]));
        surface.consistency_check();
        assert_eq!(surface.cell_occupant(Cell::new(2, 4)), Some(ItemId::new(7)));
        assert_eq!(surface.cell_occupant(Cell::new(3, 4)), None);
        assert_eq!(
            surface.item(ItemId::new(7)).and_then(Item::anchor),
            Some(Cell::new(1, 2))
        );
        assert_eq!(surface.occupied_cell_count(), 6);

        let detached = surface.detach(ItemId::new(7)).unwrap();
        assert_eq!(detached.anchor(), None);
        assert_eq!(surface.occupied_cell_count(), 0);
        surface.consistency_check();
    }

    #[test]
    fn into_items_returns_everything_detached() {
        let mut surface = GridSurface::new([5, 5]);
        surface.occupy(GridRect::from_lower_size([0, 0], [1, 1]), item(2, [1, 1]));
        surface.occupy(GridRect::from_lower_size([1, 0], [1, 1]), item(1, [1, 1]));
        let items = surface.into_items();
        assert_eq!(items, vec![item(1, [1, 1]), item(2, [1, 1])]);
    }

    #[test]
    fn reconfigure_keeps_fitting_items() {
        let mut surface = GridSurface::new([6, 6]);
        surface.occupy(GridRect::from_lower_size([0, 0], [2, 2]), item(1, [2, 2]));
        surface.occupy(GridRect::from_lower_size([3, 3], [2, 2]), item(2, [2, 2]));
        let (surface, evicted) = surface.reconfigure([4, 4]).unwrap();
        surface.consistency_check();
        assert_eq!(evicted, vec![item(2, [2, 2])]);
        assert_eq!(surface.cell_occupant(Cell::new(1, 1)), Some(ItemId::new(1)));
        assert_eq!(surface.dimensions(), GridSize::new(4, 4));
    }

    #[test]
    fn debug_map() {
        let mut surface = GridSurface::new([3, 2]);
        surface.occupy(GridRect::from_lower_size([1, 0], [2, 1]), item(4, [2, 1]));
        let text = format!("{surface:#?}");
        assert!(text.contains("        .44,\n        ...,\n"), "{text}");

        // The map is only drawn in the alternate form.
        let compact = format!("{surface:?}");
        assert!(compact.starts_with("GridSurface { bounds: "), "{compact}");
        assert!(!compact.contains("map"), "{compact}");
    }
}

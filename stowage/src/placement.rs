//! Placement rules: validating and committing placement, pick-up, and swap against a
//! [`GridSurface`].

use core::cmp::Reverse;
use core::fmt;

use itertools::Itertools as _;

use crate::math::{Cell, GridRect, GridSize};
use crate::{GridSurface, Item, ItemId};

/// Result of [`GridSurface::try_place()`].
///
/// * `Ok(None)`: the item was placed and nothing was displaced.
/// * `Ok(Some(other))`: the item was placed, and `other`, the single item it overlapped,
///   was evicted and is now the caller's responsibility.
/// * `Err(rejected)`: nothing changed; the item is returned inside the error.
pub type PlacementResult = Result<Option<Item>, Rejected>;

/// Placement operations.
///
/// These are the only operations which modify a [`GridSurface`]'s occupancy, and every one
/// of them either completes entirely or leaves the surface unchanged.
impl GridSurface {
    /// Places `item` with its top-left cell at `anchor`.
    ///
    /// * If the footprint is empty, the item is placed.
    /// * If the footprint overlaps exactly one other item, that item is removed from the grid
    ///   and returned, and `item` is placed (swap-on-single-conflict).
    /// * If the footprint is not entirely inside the grid, or overlaps two or more distinct
    ///   items, or `item` is not valid for placement, the surface is unchanged and the
    ///   item is returned in the [`Rejected`] error.
    ///
    /// ```
    /// use stowage::{GridSurface, Item, ItemId};
    /// use stowage::math::Cell;
    ///
    /// let mut grid = GridSurface::new([10, 10]);
    /// let a = Item::new(ItemId::new(1), [2, 2]);
    /// let b = Item::new(ItemId::new(2), [2, 2]);
    ///
    /// assert_eq!(grid.try_place(a, Cell::new(0, 0)).unwrap(), None);
    /// let displaced = grid.try_place(b, Cell::new(0, 0)).unwrap().unwrap();
    /// assert_eq!(displaced.id(), ItemId::new(1));
    /// assert_eq!(displaced.anchor(), None);
    /// assert_eq!(grid.cell_occupant(Cell::new(1, 1)), Some(ItemId::new(2)));
    /// ```
    pub fn try_place(&mut self, item: Item, anchor: Cell) -> PlacementResult {
        match self.check_placement(&item, anchor) {
            Ok(plan) => Ok(self.commit_placement(plan, item)),
            Err(error) => {
                log::debug!("rejected placing {} at {anchor:?}: {error}", item.id());
                Err(Rejected { item, error })
            }
        }
    }

    /// Removes and returns the item occupying `cell`, which may be any cell of the item's
    /// footprint. The returned item's anchor is cleared.
    ///
    /// Returns [`None`] if `cell` is empty or out of bounds.
    pub fn pick_up(&mut self, cell: Cell) -> Option<Item> {
        let id = self.cell_occupant(cell)?;
        let item = self.detach(id)?;
        log::debug!("picked up {id} from {cell:?}");
        Some(item)
    }

    /// Returns whether an item of `size` could be placed at `anchor` directly, without
    /// displacing anything.
    ///
    /// Cells occupied by `excluding` are treated as empty; pass the identifier of an item
    /// which is being repositioned within this same grid.
    ///
    /// This never considers swapping; use [`GridSurface::conflicts_at()`] to distinguish
    /// a swap from an impossible placement.
    pub fn can_place(&self, anchor: Cell, size: GridSize, excluding: Option<ItemId>) -> bool {
        self.conflicts_at(anchor, size, excluding) == ConflictKind::None
    }

    /// Classifies what would happen if an item of `size` were placed at `anchor`.
    ///
    /// Cells occupied by `excluding` are treated as empty. This never modifies the surface.
    pub fn conflicts_at(
        &self,
        anchor: Cell,
        size: GridSize,
        excluding: Option<ItemId>,
    ) -> ConflictKind {
        if size.is_empty() {
            return ConflictKind::Blocked(BlockReason::InvalidSize);
        }
        let Some(rect) = self.target_rect(anchor, size) else {
            return ConflictKind::Blocked(BlockReason::OutOfBounds);
        };
        match self.scan(rect, excluding) {
            Scan::Empty => ConflictKind::None,
            Scan::One(id) => ConflictKind::SwappableWith(id),
            Scan::Ambiguous { first, second } => {
                ConflictKind::Blocked(BlockReason::AmbiguousOverlap { first, second })
            }
        }
    }

    /// Finds the first anchor, in row-major order, at which an item of `size` could be
    /// placed without displacing anything.
    ///
    /// Cells occupied by `excluding` are treated as empty.
    pub fn find_free_anchor(&self, size: GridSize, excluding: Option<ItemId>) -> Option<Cell> {
        let dimensions = self.dimensions();
        if size.is_empty() || size.width > dimensions.width || size.height > dimensions.height
        {
            return None;
        }
        // Only anchors whose footprint ends inside the grid are candidates.
        let candidates = GridRect::from_lower_size(
            [0, 0],
            GridSize::new(
                dimensions.width - size.width + 1,
                dimensions.height - size.height + 1,
            ),
        );
        candidates
            .interior_iter()
            .find(|&anchor| self.can_place(anchor, size, excluding))
    }

    /// Places `item` at the first free anchor found by [`GridSurface::find_free_anchor()`],
    /// never displacing anything, and returns that anchor.
    ///
    /// This is the operation for “quick move” and loot pickup, where the player does not
    /// choose a position.
    ///
    /// Returns [`PlacementError::NoSpace`] if there is no such anchor.
    pub fn insert(&mut self, item: Item) -> Result<Cell, Rejected> {
        if let Err(error) = self.check_item(&item) {
            return Err(Rejected { item, error });
        }
        let Some(anchor) = self.find_free_anchor(item.size(), None) else {
            let error = PlacementError::NoSpace { size: item.size() };
            log::debug!("no space to insert {}", item.id());
            return Err(Rejected { item, error });
        };
        match self.check_placement(&item, anchor) {
            Ok(plan) => {
                let displaced = self.commit_placement(plan, item);
                debug_assert!(displaced.is_none(), "insert() displaced {displaced:?}");
                Ok(anchor)
            }
            Err(error) => Err(Rejected { item, error }),
        }
    }

    /// Rearranges every item so that they are packed toward the top-left,
    /// largest first (ties broken by identifier).
    ///
    /// The new layout is computed separately and committed only if every item fits;
    /// otherwise the surface is unchanged and an error is returned.
    pub fn organize(&mut self) -> Result<(), OrganizeError> {
        let mut scratch = self.empty_like();
        for item in self
            .items()
            .sorted_by_key(|item| (Reverse(item.area()), item.id()))
        {
            if let Err(rejected) = scratch.insert(item.clone().detached()) {
                log::debug!("organize abandoned: {}", rejected.error());
                return Err(OrganizeError {
                    item: rejected.item.id(),
                });
            }
        }
        log::debug!("organized {} items", scratch.item_count());
        *self = scratch;
        Ok(())
    }

    // ---------------------------------------------------------------------------------------

    /// Checks everything about placing `item` at `anchor` without changing anything.
    fn check_placement(&self, item: &Item, anchor: Cell) -> Result<PlacementPlan, PlacementError> {
        self.check_item(item)?;
        let Some(rect) = self.target_rect(anchor, item.size()) else {
            return Err(PlacementError::OutOfBounds {
                anchor,
                size: item.size(),
                bounds: self.bounds(),
            });
        };
        let displace = match self.scan(rect, None) {
            Scan::Empty => None,
            Scan::One(other) => Some(other),
            Scan::Ambiguous { first, second } => {
                return Err(PlacementError::AmbiguousOverlap { first, second });
            }
        };
        Ok(PlacementPlan { rect, displace })
    }

    /// Applies a plan produced by [`Self::check_placement()`] for the same `item`.
    fn commit_placement(&mut self, plan: PlacementPlan, item: Item) -> Option<Item> {
        let PlacementPlan { rect, displace } = plan;
        let id = item.id();
        let displaced = displace.and_then(|other| self.detach(other));
        self.occupy(rect, item);
        match &displaced {
            None => log::debug!("placed {id} at {:?}", rect.lower_bounds()),
            Some(other) => log::debug!(
                "placed {id} at {:?}, displacing {}",
                rect.lower_bounds(),
                other.id()
            ),
        }
        displaced
    }

    /// Checks the properties of `item` itself which make it placeable.
    fn check_item(&self, item: &Item) -> Result<(), PlacementError> {
        if item.size().is_empty() {
            Err(InvalidItem::ZeroSize.into())
        } else if let Some(anchor) = item.anchor() {
            Err(InvalidItem::AlreadyPlaced { anchor }.into())
        } else if self.contains_item(item.id()) {
            Err(InvalidItem::DuplicateId.into())
        } else {
            Ok(())
        }
    }

    /// Returns the rectangle with top-left cell `anchor` and the given size, if it is
    /// entirely in bounds.
    fn target_rect(&self, anchor: Cell, size: GridSize) -> Option<GridRect> {
        GridRect::checked_from_lower_size(anchor.lower_bounds(), size)
            .ok()
            .filter(|&rect| self.bounds().contains_rect(rect))
    }

    /// Scans the cells of `rect` in row-major order, stopping as soon as a second distinct
    /// occupant is found.
    fn scan(&self, rect: GridRect, excluding: Option<ItemId>) -> Scan {
        let mut found: Option<ItemId> = None;
        for cell in rect.interior_iter() {
            let Some(occupant) = self.cell_occupant(cell) else {
                continue;
            };
            if Some(occupant) == excluding {
                continue;
            }
            match found {
                None => found = Some(occupant),
                Some(first) if first == occupant => {}
                Some(first) => {
                    return Scan::Ambiguous {
                        first,
                        second: occupant,
                    };
                }
            }
        }
        match found {
            None => Scan::Empty,
            Some(id) => Scan::One(id),
        }
    }
}

/// A placement which has been checked and may be committed.
#[derive(Debug)]
struct PlacementPlan {
    rect: GridRect,
    displace: Option<ItemId>,
}

/// What was found under a rectangle by `GridSurface::scan()`.
#[derive(Debug)]
enum Scan {
    Empty,
    One(ItemId),
    Ambiguous { first: ItemId, second: ItemId },
}

/// What would happen if an item were placed at some position;
/// returned by [`GridSurface::conflicts_at()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The placement would succeed without displacing anything.
    None,
    /// The placement would be rejected.
    Blocked(BlockReason),
    /// The placement would succeed by evicting exactly this one item.
    SwappableWith(ItemId),
}

/// Why a placement would be rejected; part of [`ConflictKind::Blocked`].
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum BlockReason {
    /// footprint is not entirely inside the grid
    OutOfBounds,
    /// item has zero width or height
    InvalidSize,
    /// an item with the same identifier is already in the grid
    DuplicateId,
    /// Footprint overlaps two or more distinct items.
    #[displaydoc("footprint overlaps both {first} and {second}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    AmbiguousOverlap { first: ItemId, second: ItemId },
}

/// Why [`GridSurface::try_place()`] or [`GridSurface::insert()`] refused to place an item.
///
/// Whenever one of these is returned, the surface is unchanged.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlacementError {
    /// The footprint is not entirely inside the grid.
    #[displaydoc("footprint of size {size:?} at {anchor:?} is not inside grid bounds {bounds:?}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    OutOfBounds {
        anchor: Cell,
        size: GridSize,
        bounds: GridRect,
    },

    /// The footprint overlaps two or more distinct items, so no swap is defined.
    #[displaydoc("footprint overlaps both {first} and {second}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    AmbiguousOverlap { first: ItemId, second: ItemId },

    /// The item itself cannot be placed.
    #[displaydoc("invalid item")]
    InvalidItem(InvalidItem),

    /// There is no free position for an item of this size.
    #[displaydoc("no free space for an item of size {size:?}")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    NoSpace { size: GridSize },
}

impl core::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            PlacementError::OutOfBounds { .. } => None,
            PlacementError::AmbiguousOverlap { .. } => None,
            PlacementError::InvalidItem(e) => Some(e),
            PlacementError::NoSpace { .. } => None,
        }
    }
}

impl From<InvalidItem> for PlacementError {
    fn from(value: InvalidItem) -> Self {
        PlacementError::InvalidItem(value)
    }
}

/// Ways in which an [`Item`] may be unsuitable for placement regardless of where it is put.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[non_exhaustive]
pub enum InvalidItem {
    /// item has zero width or height
    ZeroSize,

    /// The item is still recorded as placed; it must be picked up first.
    #[displaydoc("item is still placed at {anchor:?} and must be picked up first")]
    #[non_exhaustive]
    #[allow(missing_docs)]
    AlreadyPlaced { anchor: Cell },

    /// an item with the same identifier is already in this grid
    DuplicateId,
}

impl core::error::Error for InvalidItem {}

/// Error returned when an item could not be placed. Contains the item, so that it is never
/// lost.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejected {
    item: Item,
    error: PlacementError,
}

impl Rejected {
    /// Returns the item which was not placed.
    #[inline]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the reason the item was not placed.
    #[inline]
    pub fn error(&self) -> PlacementError {
        self.error
    }

    /// Takes back the item which was not placed.
    #[inline]
    pub fn into_item(self) -> Item {
        self.item
    }

    /// Takes back the item which was not placed, together with the reason.
    #[inline]
    pub fn into_parts(self) -> (Item, PlacementError) {
        (self.item, self.error)
    }
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {} was not placed", self.item.id())
    }
}

impl core::error::Error for Rejected {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Error from [`GridSurface::organize()`].
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("could not find room for {item} while organizing; the grid is unchanged")]
pub struct OrganizeError {
    item: ItemId,
}

impl OrganizeError {
    /// Returns the first item for which no room was found.
    #[inline]
    pub fn item(&self) -> ItemId {
        self.item
    }
}

impl core::error::Error for OrganizeError {}

//! Placement feedback for a held item hovering over a grid.
//!
//! Nothing here holds state. Every call re-derives the feedback from
//! [`GridSurface::conflicts_at()`], so it cannot disagree with the grid.

use crate::math::{Cell, GridRect, Rgba};
use crate::{BlockReason, ConflictKind, GridSurface, Item, ItemId};

/// What would happen if the held item were committed at the candidate anchor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Feedback {
    /// The item would be placed without displacing anything.
    Valid,
    /// The item would be placed, and this item would be picked up in exchange.
    SwapPreview(ItemId),
    /// The placement would be rejected.
    Invalid(BlockReason),
}

/// Feedback for one candidate placement, together with which cells to mark.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Highlight {
    /// The footprint the held item would occupy, clipped to the grid bounds.
    /// [`None`] if no part of it is inside the grid.
    pub rect: Option<GridRect>,
    #[allow(missing_docs)]
    pub feedback: Feedback,
}

impl Highlight {
    /// Returns whether committing here would succeed, with or without a swap.
    #[inline]
    pub fn is_committable(&self) -> bool {
        !matches!(self.feedback, Feedback::Invalid(_))
    }
}

/// Computes the feedback for placing `held` with its top-left cell at `anchor`.
///
/// If `held` is placed in `grid` (being repositioned without being picked up), cells it
/// occupies are treated as empty, so it does not conflict with its own old footprint.
/// If it is not placed but `grid` contains another item with the same identifier, the
/// placement is [`BlockReason::DuplicateId`], as [`GridSurface::try_place()`] would
/// refuse it.
pub fn highlight(grid: &GridSurface, anchor: Cell, held: &Item) -> Highlight {
    let id = held.id();
    let repositioning = grid.item(id).is_some_and(|placed| placed == held);
    let conflict = if grid.contains_item(id) && !repositioning {
        ConflictKind::Blocked(BlockReason::DuplicateId)
    } else {
        grid.conflicts_at(anchor, held.size(), Some(id))
    };
    let feedback = match conflict {
        ConflictKind::None => Feedback::Valid,
        ConflictKind::SwappableWith(other) => Feedback::SwapPreview(other),
        ConflictKind::Blocked(reason) => Feedback::Invalid(reason),
    };
    let rect = GridRect::checked_from_lower_size(anchor.lower_bounds(), held.size())
        .ok()
        .and_then(|footprint| footprint.intersection(grid.bounds()));
    log::trace!("highlight {} at {anchor:?}: {feedback:?}", held.id());
    Highlight { rect, feedback }
}

/// Colors used to present each kind of [`Feedback`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::exhaustive_structs)]
#[allow(missing_docs)]
pub struct HighlightPalette {
    pub valid: Rgba,
    pub swap: Rgba,
    pub invalid: Rgba,
}

impl HighlightPalette {
    /// Translucent green.
    pub const VALID: Rgba = Rgba::new(0.05, 0.8, 0.1, 0.5);
    /// Translucent yellow.
    pub const SWAP: Rgba = Rgba::new(1.0, 0.8, 0.0, 0.5);
    /// Translucent red.
    pub const INVALID: Rgba = Rgba::new(0.9, 0.05, 0.05, 0.5);

    /// Returns the color for the given feedback.
    #[inline]
    pub fn color(&self, feedback: Feedback) -> Rgba {
        match feedback {
            Feedback::Valid => self.valid,
            Feedback::SwapPreview(_) => self.swap,
            Feedback::Invalid(_) => self.invalid,
        }
    }
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            valid: Self::VALID,
            swap: Self::SWAP,
            invalid: Self::INVALID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: u64, size: [u32; 2]) -> Item {
        Item::new(ItemId::new(id), size)
    }

    fn grid_with_two() -> GridSurface {
        let mut grid = GridSurface::new([6, 4]);
        grid.try_place(item(1, [1, 1]), Cell::new(0, 0)).unwrap();
        grid.try_place(item(2, [1, 1]), Cell::new(1, 0)).unwrap();
        grid
    }

    #[test]
    fn three_feedback_states() {
        let grid = grid_with_two();
        let held = item(3, [2, 1]);
        assert_eq!(
            highlight(&grid, Cell::new(2, 2), &held),
            Highlight {
                rect: Some(GridRect::from_lower_size([2, 2], [2, 1])),
                feedback: Feedback::Valid,
            }
        );
        assert_eq!(
            highlight(&grid, Cell::new(1, 0), &held).feedback,
            Feedback::SwapPreview(ItemId::new(2))
        );
        assert_eq!(
            highlight(&grid, Cell::new(0, 0), &held).feedback,
            Feedback::Invalid(BlockReason::AmbiguousOverlap {
                first: ItemId::new(1),
                second: ItemId::new(2)
            })
        );
    }

    #[test]
    fn out_of_bounds_is_clipped() {
        let grid = grid_with_two();
        let h = highlight(&grid, Cell::new(5, 3), &item(3, [2, 2]));
        assert_eq!(h.feedback, Feedback::Invalid(BlockReason::OutOfBounds));
        assert_eq!(h.rect, Some(GridRect::from_lower_size([5, 3], [1, 1])));
        assert!(!h.is_committable());

        let far = highlight(&grid, Cell::new(50, 50), &item(3, [2, 2]));
        assert_eq!(far.rect, None);
    }

    #[test]
    fn held_item_does_not_conflict_with_itself() {
        let mut grid = GridSurface::new([4, 4]);
        grid.try_place(item(1, [2, 2]), Cell::new(0, 0)).unwrap();
        let held = grid.item(ItemId::new(1)).unwrap().clone();
        assert_eq!(
            highlight(&grid, Cell::new(1, 1), &held).feedback,
            Feedback::Valid
        );
    }

    #[test]
    fn detached_duplicate_is_invalid() {
        let grid = grid_with_two();
        let h = highlight(&grid, Cell::new(3, 3), &item(1, [1, 1]));
        assert_eq!(h.feedback, Feedback::Invalid(BlockReason::DuplicateId));
        assert_eq!(h.rect, Some(GridRect::from_lower_size([3, 3], [1, 1])));
    }

    #[test]
    fn palette() {
        let palette = HighlightPalette::default();
        assert_eq!(palette.color(Feedback::Valid), HighlightPalette::VALID);
        assert_eq!(
            palette.color(Feedback::SwapPreview(ItemId::new(1))),
            HighlightPalette::SWAP
        );
        assert_eq!(
            palette.color(Feedback::Invalid(BlockReason::InvalidSize)).alpha(),
            0.5
        );
    }
}

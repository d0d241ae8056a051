//! [`DragSession`]: picking items up, carrying them over a grid, and putting them down.
//!
//! The host calls the `on_*` methods from its input events. None of them depend on being
//! called every frame.
//!
//! A session does not remember where its item came from. If the host wants a rejected drop
//! to put the item back, it must record the origin itself, or use
//! [`GridRegistry::transfer()`](crate::registry::GridRegistry::transfer).

use crate::highlight::{self, Feedback, Highlight};
use crate::math::{Cell, UiPoint};
use crate::pointer::CellMetrics;
use crate::{BlockReason, GridSurface, Item, PlacementError};

/// A single pointer's drag-and-drop state: either idle, or holding one item which is not
/// in any grid.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DragSession {
    held: Option<Item>,
}

/// The state of a [`DragSession`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum DragState {
    /// Nothing is held.
    Idle,
    /// An item is held.
    Holding,
}

/// Result of [`DragSession::on_commit_gesture()`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CommitOutcome {
    /// The held item was placed and nothing is held any more.
    Placed {
        /// Where the item was placed.
        anchor: Cell,
    },
    /// The held item was placed, and the single item it overlapped is now held instead.
    Swapped {
        /// Where the item was placed.
        anchor: Cell,
        /// The item which is now held.
        now_holding: Item,
    },
    /// The placement was not attempted because it would be rejected.
    /// The item is still held.
    Blocked(BlockReason),
    /// The placement was attempted and rejected by the grid. The item is still held.
    Rejected(PlacementError),
    /// Nothing was held, so nothing happened.
    NothingHeld,
}

impl DragSession {
    /// Constructs an idle session.
    pub const fn new() -> Self {
        Self { held: None }
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> DragState {
        match self.held {
            None => DragState::Idle,
            Some(_) => DragState::Holding,
        }
    }

    /// Returns the held item, if any.
    pub fn held(&self) -> Option<&Item> {
        self.held.as_ref()
    }

    /// Starts holding `item`, which came from somewhere other than a grid
    /// (for example, a freshly created item).
    ///
    /// Fails, returning the item, if something is already held or if the item is still
    /// placed in a grid.
    pub fn grab(&mut self, item: Item) -> Result<(), Item> {
        if self.held.is_some() || item.is_placed() {
            return Err(item);
        }
        log::debug!("grabbed {}", item.id());
        self.held = Some(item);
        Ok(())
    }

    /// Stops holding the held item and returns it, for the host to dispose of.
    pub fn release(&mut self) -> Option<Item> {
        let item = self.held.take();
        if let Some(item) = &item {
            log::debug!("released {}", item.id());
        }
        item
    }

    /// Handles the pointer being pressed over `grid`: if idle, picks up the item under the
    /// pointer. Returns whether an item was picked up.
    pub fn on_pointer_down(
        &mut self,
        grid: &mut GridSurface,
        metrics: &CellMetrics,
        pointer: impl Into<UiPoint>,
    ) -> bool {
        if self.held.is_some() {
            return false;
        }
        let cell = metrics.to_cell(pointer, grid.dimensions());
        match grid.pick_up(cell) {
            Some(item) => {
                self.held = Some(item);
                true
            }
            None => false,
        }
    }

    /// Handles the pointer moving over `grid`, returning the feedback to display, or
    /// [`None`] if nothing is held.
    pub fn on_pointer_move(
        &self,
        grid: &GridSurface,
        metrics: &CellMetrics,
        pointer: impl Into<UiPoint>,
    ) -> Option<Highlight> {
        let held = self.held.as_ref()?;
        let anchor = metrics.to_anchor(pointer, grid.dimensions(), held.size());
        Some(highlight::highlight(grid, anchor, held))
    }

    /// Handles the commit gesture (releasing the button, or a second click) over `grid`:
    /// tries to place the held item at the anchor under the pointer.
    ///
    /// A placement for which [`Self::on_pointer_move()`] would report
    /// [`Feedback::Invalid`] is not attempted; the grid still validates every placement
    /// independently.
    pub fn on_commit_gesture(
        &mut self,
        grid: &mut GridSurface,
        metrics: &CellMetrics,
        pointer: impl Into<UiPoint>,
    ) -> CommitOutcome {
        let Some(item) = self.held.take() else {
            return CommitOutcome::NothingHeld;
        };
        let anchor = metrics.to_anchor(pointer, grid.dimensions(), item.size());
        if let Feedback::Invalid(reason) = highlight::highlight(grid, anchor, &item).feedback {
            self.held = Some(item);
            return CommitOutcome::Blocked(reason);
        }
        match grid.try_place(item, anchor) {
            Ok(None) => CommitOutcome::Placed { anchor },
            Ok(Some(displaced)) => {
                self.held = Some(displaced.clone());
                CommitOutcome::Swapped {
                    anchor,
                    now_holding: displaced,
                }
            }
            Err(rejected) => {
                let (item, error) = rejected.into_parts();
                self.held = Some(item);
                CommitOutcome::Rejected(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InvalidItem, ItemId};
    use pretty_assertions::assert_eq;

    fn item(id: u64, size: [u32; 2]) -> Item {
        Item::new(ItemId::new(id), size)
    }

    /// 10-unit cells at the origin; pointer positions are cell centers.
    fn metrics() -> CellMetrics {
        CellMetrics::new([0.0, 0.0], 10.0, 1.0).unwrap()
    }

    #[allow(clippy::cast_precision_loss)]
    fn at(x: i32, y: i32) -> [f32; 2] {
        [x as f32 * 10.0 + 5.0, y as f32 * 10.0 + 5.0]
    }

    #[test]
    fn pick_up_and_move() {
        let mut grid = GridSurface::new([6, 6]);
        grid.try_place(item(1, [1, 1]), Cell::new(0, 0)).unwrap();
        let mut session = DragSession::new();

        assert!(!session.on_pointer_down(&mut grid, &metrics(), at(3, 3)));
        assert_eq!(session.state(), DragState::Idle);
        assert_eq!(session.on_pointer_move(&grid, &metrics(), at(3, 3)), None);

        assert!(session.on_pointer_down(&mut grid, &metrics(), at(0, 0)));
        assert_eq!(session.state(), DragState::Holding);
        assert!(grid.is_empty());

        assert_eq!(
            session.on_commit_gesture(&mut grid, &metrics(), at(4, 2)),
            CommitOutcome::Placed {
                anchor: Cell::new(4, 2)
            }
        );
        assert_eq!(session.state(), DragState::Idle);
        assert_eq!(grid.cell_occupant(Cell::new(4, 2)), Some(ItemId::new(1)));
        grid.consistency_check();
    }

    #[test]
    fn swap_keeps_holding() {
        let mut grid = GridSurface::new([6, 6]);
        grid.try_place(item(1, [2, 2]), Cell::new(0, 0)).unwrap();
        let mut session = DragSession::new();
        session.grab(item(2, [1, 1])).unwrap();

        let outcome = session.on_commit_gesture(&mut grid, &metrics(), at(1, 1));
        assert_eq!(
            outcome,
            CommitOutcome::Swapped {
                anchor: Cell::new(1, 1),
                now_holding: item(1, [2, 2]),
            }
        );
        assert_eq!(session.held(), Some(&item(1, [2, 2])));
        assert_eq!(session.state(), DragState::Holding);
        grid.consistency_check();
    }

    #[test]
    fn blocked_keeps_holding_and_grid_unchanged() {
        let mut grid = GridSurface::new([6, 6]);
        grid.try_place(item(1, [1, 1]), Cell::new(0, 0)).unwrap();
        grid.try_place(item(2, [1, 1]), Cell::new(1, 0)).unwrap();
        let before = grid.clone();
        let mut session = DragSession::new();
        session.grab(item(3, [2, 1])).unwrap();

        let outcome = session.on_commit_gesture(&mut grid, &metrics(), at(0, 0));
        assert_eq!(
            outcome,
            CommitOutcome::Blocked(BlockReason::AmbiguousOverlap {
                first: ItemId::new(1),
                second: ItemId::new(2),
            })
        );
        assert_eq!(session.held(), Some(&item(3, [2, 1])));
        assert_eq!(grid, before);
    }

    #[test]
    fn duplicate_id_is_blocked_on_hover_and_commit() {
        let mut grid = GridSurface::new([6, 6]);
        grid.try_place(item(1, [1, 1]), Cell::new(5, 5)).unwrap();
        let before = grid.clone();
        let mut session = DragSession::new();
        // Same identifier as an item already in the grid.
        session.grab(item(1, [1, 1])).unwrap();

        let hover = session.on_pointer_move(&grid, &metrics(), at(0, 0)).unwrap();
        assert_eq!(hover.feedback, Feedback::Invalid(BlockReason::DuplicateId));
        assert_eq!(
            session.on_commit_gesture(&mut grid, &metrics(), at(0, 0)),
            CommitOutcome::Blocked(BlockReason::DuplicateId)
        );
        assert_eq!(session.state(), DragState::Holding);
        assert_eq!(grid, before);
        // The grid refuses it on its own as well.
        assert_eq!(
            grid.try_place(item(1, [1, 1]), Cell::new(0, 0))
                .unwrap_err()
                .error(),
            PlacementError::InvalidItem(InvalidItem::DuplicateId)
        );
    }

    #[test]
    fn grab_refuses_second_item() {
        let mut session = DragSession::new();
        session.grab(item(1, [1, 1])).unwrap();
        assert_eq!(session.grab(item(2, [1, 1])), Err(item(2, [1, 1])));
        assert_eq!(session.release(), Some(item(1, [1, 1])));
        assert_eq!(session.release(), None);
        assert_eq!(
            session.on_commit_gesture(&mut GridSurface::new([1, 1]), &metrics(), at(0, 0)),
            CommitOutcome::NothingHeld
        );
    }

    #[test]
    fn move_centers_held_item() {
        let grid = GridSurface::new([6, 6]);
        let mut session = DragSession::new();
        session.grab(item(1, [3, 3])).unwrap();
        let highlight = session.on_pointer_move(&grid, &metrics(), at(3, 3)).unwrap();
        assert_eq!(
            highlight.rect,
            Some(crate::math::GridRect::from_lower_size([2, 2], [3, 3]))
        );
        assert!(highlight.is_committable());
    }
}

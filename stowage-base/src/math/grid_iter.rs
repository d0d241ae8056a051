use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{Cell, GridCoordinate, GridPoint, GridRect};

/// Iterator produced by [`GridRect::interior_iter()`].
///
/// Cells are produced in row-major order: all of row `y = 0` left to right, then row `y = 1`,
/// and so on. This is the same order as [`Cell`]’s [`Ord`] implementation.
#[derive(Clone, Debug)]
pub struct GridIter {
    x_range: Range<GridCoordinate>,
    y_range: Range<GridCoordinate>,
    cell: GridPoint,
}

impl GridIter {
    #[inline]
    pub(in crate::math) fn new(bounds: GridRect) -> Self {
        Self {
            x_range: bounds.x_range(),
            y_range: bounds.y_range(),
            cell: if bounds.is_empty() {
                // The next() algorithm assumes that if self.cell.y is in self.y_range then that
                // cell should be produced, but this is true only in the nonempty case.
                bounds.upper_bounds()
            } else {
                bounds.lower_bounds()
            },
        }
    }

    /// Returns the bounds which this iterator iterates over.
    /// This may be larger than the union of produced cells, but it will not be smaller.
    #[inline]
    pub fn bounds(&self) -> GridRect {
        GridRect::from_lower_upper(
            [self.x_range.start, self.y_range.start],
            [self.x_range.end, self.y_range.end],
        )
    }

    /// Returns whether the iterator will produce the given cell.
    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        if !self.bounds().contains_cell(cell) {
            return false;
        }
        match cell.y.cmp(&self.cell.y) {
            Ordering::Greater => true, // in a row not yet emitted
            Ordering::Less => false,   // in a row already emitted
            Ordering::Equal => cell.x >= self.cell.x,
        }
    }
}

impl Iterator for GridIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cell.y >= self.y_range.end {
            return None;
        }
        let result = self.cell;

        // Cannot overflow: `self.cell` is always strictly less than the upper bounds.
        let next_x = self.cell.x + 1;
        if next_x < self.x_range.end {
            self.cell.x = next_x;
        } else {
            self.cell.x = self.x_range.start;
            self.cell.y += 1;
            // When y becomes out of bounds, that signals the end.
        }

        Some(result.into())
    }

    #[allow(clippy::missing_inline_in_public_items, reason = "unclear benefit")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from((self.y_range.end - self.cell.y) - 1) {
            Err(_) => {
                // y has hit the end, no items left
                (0, Some(0))
            }
            Ok(rows_remaining) => {
                let cells_remaining = rows_remaining * self.x_range.len()
                    + usize::try_from(self.x_range.end - self.cell.x).unwrap_or(0);
                (cells_remaining, Some(cells_remaining))
            }
        }
    }

    // Override fold() to achieve greater performance via simpler iteration.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    fn fold<B, F>(mut self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let mut state = init;

        // First, if the iterator has already been partly advanced,
        // finish the current row so the remainder is a rectangle.
        while self.cell.x != self.x_range.start {
            let Some(cell) = self.next() else {
                return state;
            };
            state = f(state, cell);
        }

        for y in self.cell.y..self.y_range.end {
            for x in self.x_range.clone() {
                state = f(state, Cell::new(x, y));
            }
        }

        state
    }
}

impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_items() {
        fn assert_no_items(b: GridRect) {
            assert_eq!(b.interior_iter().collect::<Vec<_>>(), vec![], "{b:?}");
        }

        assert_no_items(GridRect::from_lower_size([0, 0], [0, 0]));
        assert_no_items(GridRect::from_lower_size([0, 0], [0, 1]));
        assert_no_items(GridRect::from_lower_size([0, 0], [1, 0]));
    }

    #[test]
    fn grid_iter_size_hint() {
        let b = GridRect::from_lower_size([0, 0], [12, 34]);
        let expected_size = b.area();
        let mut iter = b.interior_iter();

        for remaining in (1..=expected_size).rev() {
            assert_eq!(iter.size_hint(), (remaining, Some(remaining)));
            assert!(iter.next().is_some());
        }

        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn correct_at_max() {
        let b = GridRect::from_lower_upper([i32::MAX - 2, i32::MAX - 2], [i32::MAX, i32::MAX]);
        assert_eq!(
            b.interior_iter().collect::<Vec<Cell>>(),
            [
                Cell::new(i32::MAX - 2, i32::MAX - 2),
                Cell::new(i32::MAX - 1, i32::MAX - 2),
                Cell::new(i32::MAX - 2, i32::MAX - 1),
                Cell::new(i32::MAX - 1, i32::MAX - 1),
            ]
        );
    }

    #[test]
    fn order_matches_cell_ord() {
        let cells: Vec<Cell> = GridRect::from_lower_size([-1, 3], [3, 4])
            .interior_iter()
            .collect();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
    }

    #[test]
    fn next_and_fold_are_equivalent() {
        let b = GridRect::from_lower_size([0, -1], [3, 4]);

        for start_point in 0..=b.area() {
            let mut iter_to_next = b.interior_iter().skip(start_point);
            let iter_to_fold = b.interior_iter().skip(start_point);
            iter_to_fold.fold((), |(), fold_cell| {
                let next_cell = iter_to_next.next();
                assert_eq!(Some(fold_cell), next_cell);
            });
            assert_eq!(iter_to_next.next(), None, "finish");
        }
    }

    #[test]
    fn contains_cell() {
        let b = GridRect::from_lower_size([0, 0], [3, 3]);
        let expected_sequence: Vec<Cell> = b.interior_iter().collect();

        let mut iter = b.interior_iter();
        for current in 0..expected_sequence.len() {
            for &cell in &expected_sequence[..current] {
                assert!(!iter.contains_cell(cell), "{cell:?} absent at {current}");
            }
            for &cell in &expected_sequence[current..] {
                assert!(iter.contains_cell(cell), "{cell:?} present at {current}");
            }
            assert_eq!(iter.next(), Some(expected_sequence[current]));
        }
    }
}

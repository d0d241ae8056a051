use core::fmt;

use euclid::Point2D;

use crate::math::{GridCoordinate, GridPoint};

/// “A cell”, in this documentation, is a unit square of a grid whose corners' coordinates
/// are integers. This type identifies such a cell by the coordinates of its top-left corner.
///
/// The X axis increases to the right and the Y axis increases downward, matching the usual
/// reading order of a container grid: cell `(0, 0)` is the top-left cell.
///
/// The valid coordinate range is that of [`GridCoordinate`].
/// Cells with coordinates equal to [`GridCoordinate::MAX`] are not valid members of any
/// [`GridRect`](crate::math::GridRect), because their other corners are out of range. The [`Cell`] type does not
/// enforce this; instead, check the cell with [`GridRect::contains_cell()`](crate::math::GridRect::contains_cell) on some existing
/// [`GridRect`].
///
/// # Why have a dedicated type for this?
///
/// * To avoid confusion between points (zero size) and cells (nonzero size)
///   that causes off-by-one errors when computing footprints.
/// * To provide convenient methods for operations on cells that aren't natural operations
///   on points.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[allow(missing_docs, clippy::exhaustive_structs)]
pub struct Cell {
    // Field order matters for the derived `Ord`: row-major, like `GridIter`.
    pub y: GridCoordinate,
    pub x: GridCoordinate,
}

impl Cell {
    /// Equal to `Cell::new(0, 0)`, the top-left cell of every grid.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct `Cell { x, y }` from the given coordinates.
    #[inline]
    pub const fn new(x: GridCoordinate, y: GridCoordinate) -> Self {
        Self { y, x }
    }

    /// Convert a point in continuous cell-unit space to the cell that encloses it.
    ///
    /// Cells are half-open intervals on each axis; an integer coordinate is counted as part
    /// of the cell extending positively from that coordinate.
    ///
    /// If the point coordinates are NaN or outside of the numeric range of
    /// [`GridCoordinate`], returns [`None`].
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::Cell;
    /// use stowage::euclid::point2;
    ///
    /// assert_eq!(Cell::containing(point2(1.0, 1.5)), Some(Cell::new(1, 1)));
    /// assert_eq!(Cell::containing(point2(-0.25, 2.0)), Some(Cell::new(-1, 2)));
    /// ```
    #[inline]
    pub fn containing(point: Point2D<f32, Cell>) -> Option<Self> {
        const MIN_INCLUSIVE: f32 = GridCoordinate::MIN as f32;
        const MAX_EXCLUSIVE: f32 = GridCoordinate::MAX as f32;

        let Point2D { x, y, .. } = point;

        // Comparisons with NaN are false, so NaN is rejected here too.
        if (MIN_INCLUSIVE <= x) & (MIN_INCLUSIVE <= y) & (x < MAX_EXCLUSIVE) & (y < MAX_EXCLUSIVE)
        {
            Some(Self::new(
                libm::floorf(x) as GridCoordinate,
                libm::floorf(y) as GridCoordinate,
            ))
        } else {
            None
        }
    }

    /// Returns the corner of this cell with the most negative coordinates.
    #[inline]
    pub fn lower_bounds(self) -> GridPoint {
        self.into()
    }
}

impl fmt::Debug for Cell {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y } = self;
        write!(f, "({x:+?}, {y:+?})")
    }
}

mod conversion {
    use super::*;

    impl From<Cell> for [GridCoordinate; 2] {
        #[inline]
        fn from(Cell { x, y }: Cell) -> [GridCoordinate; 2] {
            [x, y]
        }
    }
    impl From<Cell> for GridPoint {
        #[inline]
        fn from(Cell { x, y }: Cell) -> GridPoint {
            GridPoint::new(x, y)
        }
    }

    impl From<[GridCoordinate; 2]> for Cell {
        #[inline]
        fn from([x, y]: [GridCoordinate; 2]) -> Self {
            Self::new(x, y)
        }
    }
    impl From<GridPoint> for Cell {
        #[inline]
        fn from(point: GridPoint) -> Self {
            Self::new(point.x, point.y)
        }
    }
}

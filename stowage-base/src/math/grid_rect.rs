//! Axis-aligned integer-coordinate rectangles of cells ([`GridRect`]).

use core::fmt;
use core::ops::Range;

use crate::math::{Cell, GridCoordinate, GridIter, GridPoint, GridSize};

/// An axis-aligned rectangle of [`Cell`]s: lower bounds inclusive, upper bounds exclusive.
///
/// This is the type used for grid dimensions (a rectangle whose lower bounds are the origin)
/// and for item footprints (the rectangle starting at an item's anchor, of the item's size).
///
/// A `GridRect` may have zero area; such a rectangle contains no cells, but still has a
/// position.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridRect {
    lower_bounds: GridPoint,
    /// Constructor checks ensure this is not smaller than `lower_bounds`.
    upper_bounds: GridPoint,
}

impl GridRect {
    /// Rectangle containing only the cell at `[0, 0]`.
    pub const ORIGIN_CELL: GridRect = GridRect {
        lower_bounds: GridPoint::new(0, 0),
        upper_bounds: GridPoint::new(1, 1),
    };

    /// Rectangle of zero size at `[0, 0]`.
    ///
    /// Use this rectangle as the canonical placeholder “nothing” value when it is necessary to
    /// have *some* rectangle.
    pub const ORIGIN_EMPTY: GridRect = GridRect {
        lower_bounds: GridPoint::new(0, 0),
        upper_bounds: GridPoint::new(0, 0),
    };

    /// Constructs a [`GridRect`] from coordinate lower bounds and sizes.
    ///
    /// For example, if on one axis the lower bound is 5 and the size is 10,
    /// then the cells that are included are numbered 5 through 14 (inclusive).
    ///
    /// Panics if the resulting range would cause numeric overflow.
    /// Use [`GridRect::checked_from_lower_size`] to avoid panics.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn from_lower_size(lower_bounds: impl Into<GridPoint>, size: impl Into<GridSize>) -> Self {
        Self::checked_from_lower_size(lower_bounds.into(), size.into())
            .expect("GridRect::from_lower_size")
    }

    /// Constructs a [`GridRect`] from coordinate lower bounds and sizes.
    ///
    /// Returns [`Err`] if adding `size` to `lower_bounds` overflows.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn checked_from_lower_size(
        lower_bounds: impl Into<GridPoint>,
        size: impl Into<GridSize>,
    ) -> Result<Self, GridOverflowError> {
        fn inner(lower_bounds: GridPoint, size: GridSize) -> Result<GridRect, GridOverflowError> {
            match (
                lower_bounds.x.checked_add_unsigned(size.width),
                lower_bounds.y.checked_add_unsigned(size.height),
            ) {
                (Some(ux), Some(uy)) => Ok(GridRect {
                    lower_bounds,
                    upper_bounds: GridPoint::new(ux, uy),
                }),
                _ => Err(GridOverflowError(OverflowKind::OverflowedSize {
                    lower_bounds,
                    size,
                })),
            }
        }

        inner(lower_bounds.into(), size.into())
    }

    /// Constructs a [`GridRect`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Returns [`Err`] if any of the `upper_bounds` are less than the `lower_bounds`.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if upper_bounds.x < lower_bounds.x || upper_bounds.y < lower_bounds.y {
            return Err(GridOverflowError(OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            }));
        }
        Ok(GridRect {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Constructs a [`GridRect`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Panics if any of the `upper_bounds` are less than the `lower_bounds`.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> GridRect {
        Self::checked_from_lower_upper(lower_bounds, upper_bounds)
            .expect("GridRect::from_lower_upper")
    }

    /// Constructs the rectangle with lower bounds at the origin and the given size,
    /// which is how grid dimensions are represented.
    ///
    /// This cannot fail, because every [`GridSizeCoord`](crate::math::GridSizeCoord) that
    /// fits in a [`GridCoordinate`] can be added to zero; sizes beyond that are clamped to
    /// [`GridCoordinate::MAX`].
    #[inline]
    pub fn with_size(size: impl Into<GridSize>) -> Self {
        let size = size.into();
        let clamp = |s: u32| GridCoordinate::try_from(s).unwrap_or(GridCoordinate::MAX);
        GridRect {
            lower_bounds: GridPoint::new(0, 0),
            upper_bounds: GridPoint::new(clamp(size.width), clamp(size.height)),
        }
    }

    /// Computes the area of this rectangle in cells, i.e. the product of the sizes.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::GridRect;
    ///
    /// assert_eq!(GridRect::from_lower_size([-10, 3], [100, 200]).area(), 20_000);
    /// assert_eq!(GridRect::from_lower_size([0, 0], [100, 0]).area(), 0);
    /// ```
    #[inline]
    pub const fn area(&self) -> usize {
        let size = self.size();
        // Cannot overflow: usize is at least 32 bits and each factor is at most 2^32 - 1,
        // and on 32-bit platforms allocation would fail long before.
        (size.width as usize).saturating_mul(size.height as usize)
    }

    /// Returns whether the rectangle contains no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Inclusive lower bounds on cell coordinates, or the top-left corner of the rectangle.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cell coordinates, or the bottom-right corner of the
    /// rectangle.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// Size of the rectangle on each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`, except that the result is
    /// unsigned (which is necessary so that it cannot overflow).
    #[inline]
    pub const fn size(&self) -> GridSize {
        GridSize::new(
            // Two’s complement arithmetic trick: If the subtraction overflows and wraps, the
            // following conversion to u32 will give us the right answer anyway.
            i32::wrapping_sub(self.upper_bounds.x, self.lower_bounds.x).cast_unsigned(),
            i32::wrapping_sub(self.upper_bounds.y, self.lower_bounds.y).cast_unsigned(),
        )
    }

    /// The range of X coordinates for cells within the rectangle.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.x..self.upper_bounds.x
    }

    /// The range of Y coordinates for cells within the rectangle.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.y..self.upper_bounds.y
    }

    /// Iterate over all cells that this contains, in row-major order
    /// (the X coordinate varies fastest).
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::{GridRect, Cell};
    ///
    /// let r = GridRect::from_lower_size([10, 20], [2, 2]);
    /// assert_eq!(
    ///     r.interior_iter().collect::<Vec<Cell>>(),
    ///     &[
    ///         Cell::new(10, 20),
    ///         Cell::new(11, 20),
    ///         Cell::new(10, 21),
    ///         Cell::new(11, 21),
    ///     ])
    /// ```
    #[inline]
    pub fn interior_iter(self) -> GridIter {
        GridIter::new(self)
    }

    /// Returns whether the rectangle includes the given cell.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::{GridRect, Cell};
    ///
    /// let r = GridRect::from_lower_size([4, 4], [6, 6]);
    /// assert!(!r.contains_cell(Cell::new(3, 5)));
    /// assert!(r.contains_cell(Cell::new(4, 5)));
    /// assert!(r.contains_cell(Cell::new(9, 9)));
    /// assert!(!r.contains_cell(Cell::new(10, 5)));
    /// ```
    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.x_range().contains(&cell.x) && self.y_range().contains(&cell.y)
    }

    /// Returns whether this rectangle includes every cell in the other rectangle.
    ///
    /// An empty `other` is contained if its position lies within or on the edge of `self`.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::GridRect;
    ///
    /// let r = GridRect::from_lower_size([0, 0], [10, 10]);
    /// assert!(r.contains_rect(r));
    /// assert!(r.contains_rect(GridRect::from_lower_size([8, 8], [2, 2])));
    /// assert!(!r.contains_rect(GridRect::from_lower_size([9, 9], [2, 2])));
    /// ```
    #[inline]
    pub fn contains_rect(&self, other: GridRect) -> bool {
        other.lower_bounds.x >= self.lower_bounds.x
            && other.lower_bounds.y >= self.lower_bounds.y
            && other.upper_bounds.x <= self.upper_bounds.x
            && other.upper_bounds.y <= self.upper_bounds.y
    }

    /// Returns the intersection of `self` and `other`, defined as the rectangle which
    /// contains every cell that both `self` and `other` do, and no others.
    ///
    /// Returns [`None`] if there are no such cells.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::GridRect;
    ///
    /// assert_eq!(
    ///     GridRect::from_lower_size([0, 0], [2, 2])
    ///         .intersection(GridRect::from_lower_size([1, 0], [2, 1])),
    ///     Some(GridRect::from_lower_size([1, 0], [1, 1])),
    /// );
    ///
    /// // Rectangles which only touch on their edges are not considered to intersect.
    /// assert_eq!(
    ///     GridRect::from_lower_size([0, 0], [2, 2])
    ///         .intersection(GridRect::from_lower_size([2, 0], [2, 1])),
    ///     None,
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn intersection(self, other: GridRect) -> Option<GridRect> {
        let lower = GridPoint::new(
            self.lower_bounds.x.max(other.lower_bounds.x),
            self.lower_bounds.y.max(other.lower_bounds.y),
        );
        let upper = GridPoint::new(
            self.upper_bounds.x.min(other.upper_bounds.x),
            self.upper_bounds.y.min(other.upper_bounds.y),
        );
        if upper.x <= lower.x || upper.y <= lower.y {
            return None;
        }
        Some(GridRect {
            lower_bounds: lower,
            upper_bounds: upper,
        })
    }
}

impl fmt::Debug for GridRect {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridRect")
            .field(&RangeWithLength(self.x_range()))
            .field(&RangeWithLength(self.y_range()))
            .finish()
    }
}

impl From<GridRect> for euclid::Box2D<GridCoordinate, Cell> {
    #[inline]
    fn from(rect: GridRect) -> Self {
        Self {
            min: rect.lower_bounds(),
            max: rect.upper_bounds(),
        }
    }
}

/// Error when a [`GridRect`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("{0}")]
pub struct GridOverflowError(OverflowKind);

/// Error details for [`GridOverflowError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OverflowKind {
    Inverted {
        lower_bounds: GridPoint,
        upper_bounds: GridPoint,
    },
    OverflowedSize {
        lower_bounds: GridPoint,
        size: GridSize,
    },
}

impl fmt::Display for OverflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            } => write!(
                f,
                "GridRect's lower bounds ({}, {}) were greater than upper bounds ({}, {})",
                lower_bounds.x, lower_bounds.y, upper_bounds.x, upper_bounds.y,
            ),
            OverflowKind::OverflowedSize { lower_bounds, size } => write!(
                f,
                "GridRect's size {}×{} plus lower bounds ({}, {}) overflows",
                size.width, size.height, lower_bounds.x, lower_bounds.y,
            ),
        }
    }
}

impl core::error::Error for GridOverflowError {}

/// `Debug`-formatting helper
struct RangeWithLength(Range<GridCoordinate>);
impl fmt::Debug for RangeWithLength {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = &self.0;
        if f.alternate() {
            write!(
                f,
                "{range:?} ({len})",
                len = i64::from(range.end) - i64::from(range.start)
            )
        } else {
            range.fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_is_valid() {
        let r = GridRect::from_lower_size([1, 2], [0, 1]);
        assert_eq!(r, GridRect::from_lower_upper([1, 2], [1, 3]));
        assert_eq!(r.area(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn with_size_is_at_origin() {
        assert_eq!(
            GridRect::with_size([10, 4]),
            GridRect::from_lower_size([0, 0], [10, 4])
        );
        assert_eq!(GridRect::with_size([1, 1]), GridRect::ORIGIN_CELL);
    }

    #[test]
    fn overflow_error() {
        let error =
            GridRect::checked_from_lower_size([GridCoordinate::MAX - 1, 0], [2, 1]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "GridRect's size 2×1 plus lower bounds (2147483646, 0) overflows"
        );
    }

    #[test]
    fn inverted_error() {
        let error = GridRect::checked_from_lower_upper([5, 0], [4, 1]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "GridRect's lower bounds (5, 0) were greater than upper bounds (4, 1)"
        );
    }

    #[test]
    fn contains_empty_rect_on_edge() {
        let r = GridRect::with_size([3, 3]);
        assert!(r.contains_rect(GridRect::from_lower_size([3, 3], [0, 0])));
        assert!(!r.contains_rect(GridRect::from_lower_size([4, 3], [0, 0])));
    }

    /// Test `Debug` formatting.
    #[test]
    fn debug() {
        let r = GridRect::from_lower_size([1, 2], [10, 20]);
        assert_eq!(format!("{r:?}"), "GridRect(1..11, 2..22)");
        assert_eq!(
            format!("{r:#?}\n"),
            indoc! {"
                GridRect(
                    1..11 (10),
                    2..22 (20),
                )
            "}
        );
    }
}

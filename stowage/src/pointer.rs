//! Mapping between pointer positions in the presentation layer and grid cells.
//!
//! Every mapping here is clamped to the grid, so the result of [`CellMetrics::to_cell()`]
//! always satisfies [`GridSurface::in_bounds()`](crate::GridSurface::in_bounds). Pointer
//! edge cases therefore never reach placement validation.

use euclid::{Point2D, Vector2D};

use crate::math::{Cell, GridCoordinate, GridSize, GridSizeCoord, UiCoordinate, UiPoint};

/// Which way the presentation layer’s Y axis points.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_enums)]
pub enum YAxis {
    /// Y increases downward, as in most 2D UI toolkits. Grid row 0 is nearest the origin.
    #[default]
    Down,
    /// Y increases upward, as in most world or canvas spaces.
    /// The origin is still the grid's top-left corner, so rows extend toward negative Y.
    Up,
}

/// Placement of a grid in the presentation layer, used to convert pointer positions to
/// cells and back.
///
/// The grid's own dimensions are not part of this; they are passed to each conversion so
/// that one `CellMetrics` may describe any surface drawn at that position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    /// Position of the top-left corner of cell `(0, 0)`.
    origin: UiPoint,
    /// Unscaled side length of one cell.
    cell_size: UiCoordinate,
    /// Scale factor applied by the container's transform.
    scale: UiCoordinate,
    y_axis: YAxis,
}

impl CellMetrics {
    /// Constructs a `CellMetrics` with [`YAxis::Down`].
    ///
    /// Returns an error if `cell_size` or `scale` is not finite and positive,
    /// or if `origin` is not finite.
    pub fn new(
        origin: impl Into<UiPoint>,
        cell_size: UiCoordinate,
        scale: UiCoordinate,
    ) -> Result<Self, MetricsError> {
        let origin = origin.into();
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return Err(MetricsError::Origin(origin));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(MetricsError::CellSize(cell_size));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MetricsError::Scale(scale));
        }
        // The product may still overflow to infinity.
        if !(cell_size * scale).is_finite() {
            return Err(MetricsError::Scale(scale));
        }
        Ok(Self {
            origin,
            cell_size,
            scale,
            y_axis: YAxis::Down,
        })
    }

    /// Returns a copy of `self` using the given Y axis orientation.
    #[must_use]
    #[inline]
    pub fn with_y_axis(mut self, y_axis: YAxis) -> Self {
        self.y_axis = y_axis;
        self
    }

    /// Returns the position of the top-left corner of cell `(0, 0)`.
    #[inline]
    pub fn origin(&self) -> UiPoint {
        self.origin
    }

    /// Returns the unscaled side length of one cell.
    #[inline]
    pub fn cell_size(&self) -> UiCoordinate {
        self.cell_size
    }

    /// Returns the container scale factor.
    #[inline]
    pub fn scale(&self) -> UiCoordinate {
        self.scale
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    /// Returns the side length of one cell as drawn, `cell_size * scale`.
    #[inline]
    pub fn cell_extent(&self) -> UiCoordinate {
        self.cell_size * self.scale
    }

    /// Returns the cell under `pointer`, clamped into a grid of the given dimensions.
    ///
    /// Cells include their top and left edges; the bottom and right edges of the whole
    /// grid map to the last row and column.
    ///
    /// ```
    /// use stowage::pointer::CellMetrics;
    /// use stowage::math::{Cell, GridSize};
    ///
    /// let metrics = CellMetrics::new([100.0, 50.0], 32.0, 1.0).unwrap();
    /// let dimensions = GridSize::new(10, 10);
    /// assert_eq!(metrics.to_cell([100.0, 50.0], dimensions), Cell::new(0, 0));
    /// assert_eq!(metrics.to_cell([140.0, 120.0], dimensions), Cell::new(1, 2));
    /// assert_eq!(metrics.to_cell([420.0, 370.0], dimensions), Cell::new(9, 9));
    /// assert_eq!(metrics.to_cell([-5.0, 9000.0], dimensions), Cell::new(0, 9));
    /// ```
    pub fn to_cell(&self, pointer: impl Into<UiPoint>, dimensions: GridSize) -> Cell {
        let pointer = pointer.into();
        let cell = clamp_cell(
            self.cell_position(pointer),
            dimensions.width.saturating_sub(1),
            dimensions.height.saturating_sub(1),
        );
        log::trace!("pointer {pointer:?} -> {cell:?}");
        cell
    }

    /// Returns the anchor at which an item of size `held` should be placed so that its
    /// center tracks `pointer`.
    ///
    /// The sampled point is shifted toward the top-left by `(held - 1) / 2` cells on each
    /// axis before finding the cell that contains it, so an even-sized item moves to its
    /// next anchor when the pointer crosses the middle of a cell. The anchor is then
    /// clamped so that the footprint stays inside the grid whenever the item is no larger
    /// than the grid.
    ///
    /// ```
    /// use stowage::pointer::CellMetrics;
    /// use stowage::math::{Cell, GridSize};
    ///
    /// let metrics = CellMetrics::new([0.0, 0.0], 10.0, 1.0).unwrap();
    /// let dimensions = GridSize::new(10, 10);
    /// // A 3×3 item centered on cell (5, 5).
    /// assert_eq!(metrics.to_anchor([55.0, 55.0], dimensions, GridSize::new(3, 3)), Cell::new(4, 4));
    /// // A 2×2 item whose center is nearest the pointer at (51, 58).
    /// assert_eq!(metrics.to_anchor([51.0, 58.0], dimensions, GridSize::new(2, 2)), Cell::new(4, 5));
    /// // Pushed back inside at the corner.
    /// assert_eq!(metrics.to_anchor([99.0, 0.0], dimensions, GridSize::new(3, 3)), Cell::new(7, 0));
    /// ```
    pub fn to_anchor(
        &self,
        pointer: impl Into<UiPoint>,
        dimensions: GridSize,
        held: GridSize,
    ) -> Cell {
        let pointer = pointer.into();
        let shift = Vector2D::new(half_span(held.width), half_span(held.height));
        let anchor = clamp_cell(
            self.cell_position(pointer) - shift,
            dimensions.width.saturating_sub(held.width),
            dimensions.height.saturating_sub(held.height),
        );
        log::trace!("anchor for {held:?} at {pointer:?} -> {anchor:?}");
        anchor
    }

    /// Position of `pointer` in units of cells, relative to the top-left corner of the
    /// grid, with Y increasing down the rows.
    fn cell_position(&self, pointer: UiPoint) -> Point2D<UiCoordinate, Cell> {
        let extent = self.cell_extent();
        let offset = pointer - self.origin;
        let rows = match self.y_axis {
            YAxis::Down => offset.y,
            YAxis::Up => -offset.y,
        };
        Point2D::new(offset.x / extent, rows / extent)
    }

    /// Returns the position of the top-left corner of `cell`, the inverse of
    /// [`Self::to_cell()`] for cells inside the grid.
    ///
    /// With [`YAxis::Up`] this is still the corner nearest row 0 and column 0 of the cell,
    /// which has the greatest Y coordinate.
    pub fn cell_origin(&self, cell: Cell) -> UiPoint {
        let extent = self.cell_extent();
        #[allow(clippy::cast_precision_loss)]
        let (x, y) = (cell.x as UiCoordinate * extent, cell.y as UiCoordinate * extent);
        match self.y_axis {
            YAxis::Down => UiPoint::new(self.origin.x + x, self.origin.y + y),
            YAxis::Up => UiPoint::new(self.origin.x + x, self.origin.y - y),
        }
    }
}

/// Distance in cells from the first cell of a span of `cells` cells to its middle.
fn half_span(cells: GridSizeCoord) -> UiCoordinate {
    cells.saturating_sub(1) as UiCoordinate / 2.0
}

/// Clamps the cell containing `position` (in cell units) to `0..=max_x` and `0..=max_y`.
fn clamp_cell(
    position: Point2D<UiCoordinate, Cell>,
    max_x: GridSizeCoord,
    max_y: GridSizeCoord,
) -> Cell {
    // NaN and positions beyond the coordinate range have no containing cell;
    // float-to-int `as` saturates them (NaN to 0) before clamping.
    #[allow(clippy::cast_possible_truncation)]
    let cell = Cell::containing(position).unwrap_or_else(|| {
        Cell::new(
            libm::floorf(position.x) as GridCoordinate,
            libm::floorf(position.y) as GridCoordinate,
        )
    });
    let limit = |max: GridSizeCoord| GridCoordinate::try_from(max).unwrap_or(GridCoordinate::MAX);
    Cell::new(cell.x.clamp(0, limit(max_x)), cell.y.clamp(0, limit(max_y)))
}

/// Error from [`CellMetrics::new()`].
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[non_exhaustive]
pub enum MetricsError {
    /// cell size must be finite and positive, not {0}
    CellSize(UiCoordinate),
    /// container scale must be finite and positive, not {0}
    Scale(UiCoordinate),
    /// grid origin must be finite, not {0:?}
    Origin(UiPoint),
}

impl core::error::Error for MetricsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metrics(y_axis: YAxis) -> CellMetrics {
        CellMetrics::new([10.0, 20.0], 16.0, 2.0)
            .unwrap()
            .with_y_axis(y_axis)
    }

    #[test]
    fn bottom_right_pixel_maps_to_last_cell() {
        let dimensions = GridSize::new(10, 6);
        let m = metrics(YAxis::Down);
        let extent = m.cell_extent();
        let corner = UiPoint::new(10.0 + 10.0 * extent, 20.0 + 6.0 * extent);
        assert_eq!(m.to_cell(corner, dimensions), Cell::new(9, 5));
        // One pixel inside.
        assert_eq!(
            m.to_cell([corner.x - 1.0, corner.y - 1.0], dimensions),
            Cell::new(9, 5)
        );
    }

    #[test]
    fn cell_edges_belong_to_the_following_cell() {
        let m = metrics(YAxis::Down);
        let dimensions = GridSize::new(10, 10);
        assert_eq!(m.to_cell([10.0 + 32.0, 20.0], dimensions), Cell::new(1, 0));
        assert_eq!(
            m.to_cell([10.0 + 31.99, 20.0 + 64.0], dimensions),
            Cell::new(0, 2)
        );
    }

    #[rstest]
    fn outside_or_nan_is_clamped(
        #[values(YAxis::Down, YAxis::Up)] y_axis: YAxis,
        #[values(
            [-1e30, -1e30],
            [1e30, 1e30],
            [f32::NAN, f32::NAN],
            [f32::INFINITY, f32::NEG_INFINITY]
        )]
        pointer: [f32; 2],
    ) {
        let dimensions = GridSize::new(4, 3);
        let cell = metrics(y_axis).to_cell(pointer, dimensions);
        assert!(
            crate::math::GridRect::with_size(dimensions).contains_cell(cell),
            "{cell:?}"
        );
    }

    #[test]
    fn y_up_mirrors_rows() {
        let m = metrics(YAxis::Up);
        let dimensions = GridSize::new(4, 4);
        // Just below the origin in a Y-up space is the top row.
        assert_eq!(m.to_cell([11.0, 19.0], dimensions), Cell::new(0, 0));
        assert_eq!(m.to_cell([11.0, 20.0 - 33.0], dimensions), Cell::new(0, 1));
        assert_eq!(m.cell_origin(Cell::new(1, 1)), UiPoint::new(42.0, -12.0));
    }

    #[rstest]
    fn cell_origin_inverts_to_cell(#[values(YAxis::Down, YAxis::Up)] y_axis: YAxis) {
        let m = metrics(y_axis);
        let dimensions = GridSize::new(5, 5);
        for cell in crate::math::GridRect::with_size(dimensions).interior_iter() {
            let corner = m.cell_origin(cell);
            // Sample the middle of the cell to be robust against the Y-up edge convention.
            let center = match y_axis {
                YAxis::Down => UiPoint::new(corner.x + 16.0, corner.y + 16.0),
                YAxis::Up => UiPoint::new(corner.x + 16.0, corner.y - 16.0),
            };
            assert_eq!(m.to_cell(center, dimensions), cell);
        }
    }

    #[rstest]
    #[case::single([1, 1], [5, 5], [5, 5])]
    #[case::odd([3, 3], [5, 5], [4, 4])]
    #[case::even([2, 2], [5, 5], [5, 5])]
    #[case::wide([4, 1], [5, 5], [4, 5])]
    #[case::clamped_low([3, 3], [0, 0], [0, 0])]
    #[case::clamped_high([3, 3], [9, 9], [7, 7])]
    #[case::larger_than_grid([12, 1], [5, 5], [0, 5])]
    fn anchor_adjustment(
        #[case] held: [u32; 2],
        #[case] under: [i32; 2],
        #[case] expected: [i32; 2],
    ) {
        let m = CellMetrics::new([0.0, 0.0], 10.0, 1.0).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let pointer = [under[0] as f32 * 10.0 + 5.0, under[1] as f32 * 10.0 + 5.0];
        assert_eq!(
            m.to_anchor(pointer, GridSize::new(10, 10), held.into()),
            Cell::from(expected)
        );
    }

    /// Even-sized items change anchor where the pointer crosses the middle of a cell, so
    /// the footprint's center is never more than half a cell from the pointer.
    #[rstest]
    #[case::two_left_half([2, 2], [51.0, 51.0], [4, 4])]
    #[case::two_middle([2, 2], [55.0, 55.0], [5, 5])]
    #[case::two_right_half([2, 2], [59.0, 59.0], [5, 5])]
    #[case::two_mixed([2, 2], [54.0, 56.0], [4, 5])]
    #[case::four_left_half([4, 1], [51.0, 51.0], [3, 5])]
    #[case::four_right_half([4, 1], [59.0, 51.0], [4, 5])]
    #[case::odd_left_half([3, 3], [51.0, 51.0], [4, 4])]
    #[case::odd_right_half([3, 3], [59.0, 59.0], [4, 4])]
    fn anchor_adjustment_within_cell(
        #[case] held: [u32; 2],
        #[case] pointer: [f32; 2],
        #[case] expected: [i32; 2],
    ) {
        let m = CellMetrics::new([0.0, 0.0], 10.0, 1.0).unwrap();
        let held = GridSize::from(held);
        let anchor = m.to_anchor(pointer, GridSize::new(10, 10), held);
        assert_eq!(anchor, Cell::from(expected));

        let center = m.cell_origin(anchor)
            + crate::math::UiVector::new(held.width as f32 * 5.0, held.height as f32 * 5.0);
        assert!(
            libm::fabsf(center.x - pointer[0]) <= 5.0 && libm::fabsf(center.y - pointer[1]) <= 5.0,
            "center {center:?} is too far from pointer {pointer:?}"
        );
    }

    #[test]
    fn anchor_clamps_nan() {
        let m = CellMetrics::new([0.0, 0.0], 10.0, 1.0).unwrap();
        assert_eq!(
            m.to_anchor([f32::NAN, 1e30], GridSize::new(10, 10), GridSize::new(2, 2)),
            Cell::new(0, 8)
        );
    }

    #[rstest]
    #[case(0.0, 1.0, MetricsError::CellSize(0.0))]
    #[case(-4.0, 1.0, MetricsError::CellSize(-4.0))]
    #[case(f32::INFINITY, 1.0, MetricsError::CellSize(f32::INFINITY))]
    #[case(4.0, 0.0, MetricsError::Scale(0.0))]
    #[case(1e30, 1e30, MetricsError::Scale(1e30))]
    fn invalid_metrics(#[case] cell_size: f32, #[case] scale: f32, #[case] expected: MetricsError) {
        assert_eq!(CellMetrics::new([0.0, 0.0], cell_size, scale), Err(expected));
    }

    #[test]
    fn nan_rejected() {
        assert!(CellMetrics::new([0.0, 0.0], f32::NAN, 1.0).is_err());
        assert!(CellMetrics::new([f32::NAN, 0.0], 1.0, 1.0).is_err());
        assert_eq!(
            MetricsError::Scale(-1.0).to_string(),
            "container scale must be finite and positive, not -1"
        );
    }
}

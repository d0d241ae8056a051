//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Size2D, Vector2D};

use crate::math::Cell;

/// Coordinates that are locked to the cell grid.
pub type GridCoordinate = i32;

/// Numeric type in a [`GridSize`].
pub type GridSizeCoord = u32;

/// Positions that are locked to the cell grid.
pub type GridPoint = Point2D<GridCoordinate, Cell>;

/// Vectors that are locked to the cell grid.
pub type GridVector = Vector2D<GridCoordinate, Cell>;

/// Sizes of grid-aligned objects, such as item footprints and grid dimensions.
pub type GridSize = Size2D<GridSizeCoord, Cell>;

/// Unit type for positions in the presentation layer’s coordinate space
/// (pixels, canvas units, or whatever the host uses for pointer input).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Ui {}

/// Scalar type of pointer and layout positions.
pub type UiCoordinate = f32;

/// Positions in the presentation layer, e.g. a pointer position.
pub type UiPoint = Point2D<UiCoordinate, Ui>;

/// Vectors in the presentation layer.
pub type UiVector = Vector2D<UiCoordinate, Ui>;

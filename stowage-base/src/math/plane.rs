use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::math::{Cell, GridCoordinate, GridPoint, GridRect};

/// Type for planar data stored in a slice, or for generating linear indexing.
///
/// `C` is some slice container type, e.g. `&[T]` or `Box<[T]>`.
///
/// Elements are stored in row-major order: linearly adjacent elements have adjacent
/// X coordinates, and this is the same order produced by [`GridRect::interior_iter()`].
///
/// In addition to the data, each [`Plane`] stores the [`GridRect`] defining its size;
/// the container's length must be equal to the area of that rectangle.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Plane<C> {
    /// Invariant: `bounds` has an area that is at most [`usize::MAX`].
    bounds: GridRect,
    /// Invariant: `contents.deref().len()` equals `bounds.area()`.
    contents: C,
}

/// Constructors from elements not already stored linearly.
#[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
impl<C, V> Plane<C>
where
    // Note that the Deref bound is necessary to give this a unique `V`.
    C: Deref<Target = [V]> + FromIterator<V>,
{
    /// Constructs a `Plane<C>` by cloning the provided value for each cell.
    #[inline]
    pub fn repeat(bounds: GridRect, value: V) -> Self
    where
        V: Clone,
    {
        Plane {
            bounds,
            contents: core::iter::repeat_n(value, bounds.area()).collect(),
        }
    }
}

impl<C> Plane<C> {
    /// Returns the [`GridRect`] specifying the bounds of this planar data.
    #[inline]
    pub fn bounds(&self) -> GridRect {
        self.bounds
    }

    /// Returns the area, also known as the number of elements.
    #[inline]
    pub fn area(&self) -> usize {
        self.bounds.area()
    }

    /// Determines whether a cell lies within this plane and, if it does, returns the
    /// linearized slice index into it.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::{Cell, GridRect, Plane};
    ///
    /// let plane = Plane::<Box<[()]>>::repeat(GridRect::with_size([10, 10]), ());
    ///
    /// assert_eq!(plane.index(Cell::new(0, 0)), Some(0));
    /// assert_eq!(plane.index(Cell::new(3, 2)), Some(23));
    /// assert_eq!(plane.index(Cell::new(9, 9)), Some(99));
    /// assert_eq!(plane.index(Cell::new(-1, 0)), None);
    /// assert_eq!(plane.index(Cell::new(0, 10)), None);
    /// ```
    #[inline(always)] // hot in occupancy scans
    pub fn index(&self, cell: Cell) -> Option<usize> {
        let sizes = self.bounds.size();

        // This might overflow and wrap, but if it does, the result will still be out
        // of bounds, just in the other direction, because wrapping subtraction is an
        // injective mapping of integers, and every in-bounds maps to in-bounds, so
        // every out-of-bounds must also map to out-of-bounds.
        let lower = self.bounds.lower_bounds();
        let deoffsetted = GridPoint::new(
            GridCoordinate::wrapping_sub(cell.x, lower.x),
            GridCoordinate::wrapping_sub(cell.y, lower.y),
        );

        // Bounds check, expressed as a single unsigned comparison per axis.
        if (deoffsetted.x.cast_unsigned() >= sizes.width)
            | (deoffsetted.y.cast_unsigned() >= sizes.height)
        {
            return None;
        }

        // Cannot overflow: both components are nonnegative and the product is at most the
        // area, which is an invariant of this type.
        Some(
            (deoffsetted.y as usize)
                .wrapping_mul(sizes.width as usize)
                .wrapping_add(deoffsetted.x as usize),
        )
    }
}

/// Linear data access.
#[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
impl<C, V> Plane<C>
where
    C: Deref<Target = [V]>,
{
    /// Returns the linear contents viewed as a slice.
    pub fn as_linear(&self) -> &[V] {
        let s = &*self.contents;
        debug_assert_eq!(s.len(), self.area());
        s
    }

    /// Returns the linear contents viewed as a mutable slice.
    pub fn as_linear_mut(&mut self) -> &mut [V]
    where
        C: DerefMut,
    {
        let area = self.area();
        let s = &mut *self.contents;
        debug_assert_eq!(s.len(), area);
        s
    }

    /// Returns the element at `position` of this planar data, or [`None`] if `position` is
    /// out of bounds.
    #[inline]
    pub fn get(&self, position: impl Into<Cell>) -> Option<&V> {
        let index = self.index(position.into())?;
        Some(&self.as_linear()[index])
    }

    /// Iterates over all the cells and values in this planar data, in row-major order.
    pub fn iter<'s>(&'s self) -> impl Iterator<Item = (Cell, &'s V)> + Clone
    where
        V: 's,
    {
        self.bounds.interior_iter().zip(self.as_linear().iter())
    }

    /// Sets every element whose cell lies within `rect` to a clone of `value`.
    ///
    /// The part of `rect` outside of [`Self::bounds()`] is ignored.
    /// Each affected row is written as one contiguous slice.
    pub fn fill_rect(&mut self, rect: GridRect, value: V)
    where
        C: DerefMut,
        V: Clone,
    {
        let Some(rect) = rect.intersection(self.bounds) else {
            return;
        };
        let lower = rect.lower_bounds();
        let width = rect.size().width as usize;
        for y in rect.y_range() {
            // In bounds because `rect` was clipped to `self.bounds`.
            let Some(start) = self.index(Cell::new(lower.x, y)) else {
                continue;
            };
            self.as_linear_mut()[start..start + width].fill(value.clone());
        }
    }
}

#[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
impl<C: fmt::Debug> fmt::Debug for Plane<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { bounds, contents } = self;
        let area = self.area();
        let mut ds = f.debug_struct("Plane");
        ds.field("bounds", &bounds);
        if area > 32 {
            ds.field("contents", &format_args!("[...{area} elements]"));
        } else {
            ds.field("contents", &contents);
        }
        ds.finish()
    }
}

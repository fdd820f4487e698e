//! Geometry in character-cell units.
//!
//! Everything in the UI is measured in terminal cells: a [`Point`] is a cell
//! coordinate and a [`Rect`] is a block of cells. We use the usual terminal
//! convention: x increases to the right, y increases downwards, and rectangles
//! are half-open, so a rectangle's right and bottom edges are *not* part of it.

use std::ops::Range;

use num::Integer;
use num::Zero;

mod impls;

/// A two-dimensional point.
///
/// `Point<T>` values may be added and subtracted componentwise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct Point<T = i32>([T; 2]);

impl<T> Point<T> {
  /// Creates a new `Point` with the given coordinates.
  #[inline]
  pub const fn new(x: T, y: T) -> Self {
    Self([x, y])
  }

  /// Creates a new `Point` representing the origin.
  #[inline]
  pub fn zero() -> Self
  where
    T: Zero + Copy,
  {
    Zero::zero()
  }

  /// Returns this `Point`'s coordinates as an array.
  #[inline]
  pub fn coords(self) -> [T; 2] {
    self.0
  }

  /// Returns the `x` coordinate.
  #[inline]
  pub fn x(self) -> T
  where
    T: Copy,
  {
    self.0[0]
  }

  /// Returns the `y` coordinate.
  #[inline]
  pub fn y(self) -> T
  where
    T: Copy,
  {
    self.0[1]
  }
}

/// A rectangle of cells, stored as an origin and a size.
///
/// The right and bottom edges are derived: `right == left + width` and
/// `bottom == top + height`. Setting either edge translates the rectangle
/// rather than resizing it.
///
/// Width and height are expected to be non-negative; a negative size is
/// accepted, but such a rectangle contains no points and renders as nothing.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Rect {
  left: i32,
  top: i32,
  width: i32,
  height: i32,
}

impl Rect {
  /// Creates a new `Rect` with the given origin and size.
  #[inline]
  pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
    Self {
      left,
      top,
      width,
      height,
    }
  }

  /// Creates a new `Rect` of the given dimensions with its origin at the
  /// origin.
  #[inline]
  pub const fn with_dims(width: i32, height: i32) -> Self {
    Self::new(0, 0, width, height)
  }

  /// Returns the left edge.
  #[inline]
  pub fn left(self) -> i32 {
    self.left
  }

  /// Returns the top edge.
  #[inline]
  pub fn top(self) -> i32 {
    self.top
  }

  /// Returns the width.
  #[inline]
  pub fn width(self) -> i32 {
    self.width
  }

  /// Returns the height.
  #[inline]
  pub fn height(self) -> i32 {
    self.height
  }

  /// Returns the (exclusive) right edge.
  #[inline]
  pub fn right(self) -> i32 {
    self.left + self.width
  }

  /// Returns the (exclusive) bottom edge.
  #[inline]
  pub fn bottom(self) -> i32 {
    self.top + self.height
  }

  /// Moves this `Rect` horizontally so that its right edge lies at `right`.
  ///
  /// The width is unchanged.
  #[inline]
  pub fn set_right(&mut self, right: i32) {
    self.left = right - self.width;
  }

  /// Moves this `Rect` vertically so that its bottom edge lies at `bottom`.
  ///
  /// The height is unchanged.
  #[inline]
  pub fn set_bottom(&mut self, bottom: i32) {
    self.top = bottom - self.height;
  }

  /// Returns the upper-left corner.
  #[inline]
  pub fn origin(self) -> Point {
    Point::new(self.left, self.top)
  }

  /// Returns the size as a `(width, height)` pair.
  #[inline]
  pub fn size(self) -> (i32, i32) {
    (self.width, self.height)
  }

  /// Returns the center of this `Rect`, rounding towards the upper-left.
  #[inline]
  pub fn center(self) -> Point {
    Point::new(
      self.left + Integer::div_floor(&self.width, &2),
      self.top + Integer::div_floor(&self.height, &2),
    )
  }

  /// Returns the area of this `Rect`, or zero if it is degenerate.
  #[inline]
  pub fn area(self) -> i32 {
    if self.is_empty() {
      0
    } else {
      self.width * self.height
    }
  }

  /// Returns whether this `Rect` contains no cells.
  #[inline]
  pub fn is_empty(self) -> bool {
    self.width <= 0 || self.height <= 0
  }

  /// Moves the origin of this `Rect`; `None` keeps the current value for that
  /// axis.
  pub fn move_to(&mut self, x: Option<i32>, y: Option<i32>) {
    if let Some(x) = x {
      self.left = x;
    }
    if let Some(y) = y {
      self.top = y;
    }
  }

  /// Moves the origin of this `Rect` to `p`.
  #[inline]
  pub fn move_to_point(&mut self, p: Point) {
    self.move_to(Some(p.x()), Some(p.y()));
  }

  /// Resizes this `Rect` in place; `None` keeps the current value for that
  /// axis. The origin does not move.
  pub fn resize(&mut self, width: Option<i32>, height: Option<i32>) {
    if let Some(width) = width {
      self.width = width;
    }
    if let Some(height) = height {
      self.height = height;
    }
  }

  /// Returns a copy of this `Rect` translated by `offset`.
  #[inline]
  pub fn translated(self, offset: Point) -> Self {
    Self::new(
      self.left + offset.x(),
      self.top + offset.y(),
      self.width,
      self.height,
    )
  }

  /// Returns whether this `Rect` and `other` share at least one cell.
  #[inline]
  pub fn intersects(self, other: Rect) -> bool {
    self.left < other.right()
      && other.left < self.right()
      && self.top < other.bottom()
      && other.top < self.bottom()
  }

  /// Returns whether this `Rect` contains `p`.
  ///
  /// The test is half-open: a point on the left or top edge is inside, a
  /// point on the right or bottom edge is not.
  #[inline]
  pub fn contains(self, p: Point) -> bool {
    (self.left..self.right()).contains(&p.x())
      && (self.top..self.bottom()).contains(&p.y())
  }

  /// Computes the intersection of this `Rect` with `other`.
  ///
  /// Returns `None` if they do not intersect at all.
  pub fn intersect(self, other: Rect) -> Option<Rect> {
    if !self.intersects(other) {
      return None;
    }
    let left = self.left.max(other.left);
    let top = self.top.max(other.top);
    let right = self.right().min(other.right());
    let bottom = self.bottom().min(other.bottom());
    Some(Rect::new(left, top, right - left, bottom - top))
  }

  /// Returns the horizontal range of cells covered by this `Rect`.
  #[inline]
  pub fn xs(self) -> Range<i32> {
    self.left..self.right()
  }

  /// Returns the vertical range of cells covered by this `Rect`.
  #[inline]
  pub fn ys(self) -> Range<i32> {
    self.top..self.bottom()
  }

  /// Returns an iterator over all points in this rectangle.
  ///
  /// Points are traversed in row-major order.
  pub fn points(self) -> impl Iterator<Item = Point> {
    let xs = self.xs();
    self
      .ys()
      .flat_map(move |y| xs.clone().map(move |x| Point::new(x, y)))
  }
}

/// A rectangle with associated data at each point.
///
/// This is the backing store for drawing surfaces: one value per cell, stored
/// in row-major order.
// Invariant: self.1.len() == self.0.area()
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct RectVec<T>(Rect, Box<[T]>);

impl<T: Clone> RectVec<T> {
  /// Creates a new, empty `RectVec`.
  pub fn empty() -> Self {
    RectVec(Rect::with_dims(0, 0), Vec::new().into_boxed_slice())
  }

  /// Creates a new `RectVec` with the requested dimensions and filled with the
  /// given value.
  pub fn new(rect: Rect, val: T) -> Self {
    RectVec(rect, vec![val; rect.area() as usize].into_boxed_slice())
  }

  /// Returns this `RectVec`'s dimensions.
  pub fn dims(&self) -> Rect {
    self.0
  }

  /// Returns this `RectVec`'s data as a linear slice.
  pub fn data(&self) -> &[T] {
    &self.1
  }

  /// Returns this `RectVec`'s data as a mutable linear slice.
  pub fn data_mut(&mut self) -> &mut [T] {
    &mut self.1
  }

  /// Fills every cell with `val`.
  pub fn fill(&mut self, val: T) {
    for x in self.1.iter_mut() {
      *x = val.clone();
    }
  }

  /// Transforms this `RectVec`'s dimensions to the new rectangle, keeping the
  /// values of every cell present in both and filling new cells with `val`.
  pub fn resize(&mut self, new_rect: Rect, val: T) {
    if self.0 == new_rect {
      return;
    }
    let mut fresh = Self::new(new_rect, val);
    if let Some(common) = self.0.intersect(new_rect) {
      for p in common.points() {
        if let (Some(old), Some(new)) = (self.get(p), fresh.index_of(p)) {
          fresh.1[new] = old.clone();
        }
      }
    }
    *self = fresh;
  }

  fn index_of(&self, p: Point) -> Option<usize> {
    if !self.dims().contains(p) {
      return None;
    }
    let rel = p - self.dims().origin();
    Some((rel.x() + rel.y() * self.dims().width()) as usize)
  }

  /// Gets a reference to the data value associated with `p`.
  ///
  /// Returns `None` if `p` is out-of-bounds.
  pub fn get(&self, p: Point) -> Option<&T> {
    let index = self.index_of(p)?;
    self.1.get(index)
  }

  /// Gets a mutable reference to the data value associated with `p`.
  ///
  /// Returns `None` if `p` is out-of-bounds.
  pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
    let index = self.index_of(p)?;
    self.1.get_mut(index)
  }

  /// Returns an iterator over the points of this `RectVec` and their associated
  /// values.
  pub fn points(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
    let dims = self.dims();
    dims.points().zip(self.1.iter())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn edges_are_derived() {
    let mut r = Rect::new(3, 4, 10, 5);
    assert_eq!(r.right(), 13);
    assert_eq!(r.bottom(), 9);

    r.set_right(20);
    assert_eq!(r.left(), 10);
    assert_eq!(r.width(), 10);

    r.set_bottom(5);
    assert_eq!(r.top(), 0);
    assert_eq!(r.height(), 5);
  }

  #[test]
  fn move_and_resize_keep_omitted_axis() {
    let mut r = Rect::new(1, 2, 3, 4);
    r.move_to(Some(7), None);
    assert_eq!(r.origin(), Point::new(7, 2));
    r.resize(None, Some(9));
    assert_eq!(r.size(), (3, 9));
  }

  #[test]
  fn contains_is_half_open() {
    let r = Rect::new(2, 2, 4, 3);
    assert!(r.contains(Point::new(2, 2)));
    assert!(r.contains(Point::new(5, 4)));
    assert!(!r.contains(Point::new(6, 5)));
    assert!(!r.contains(Point::new(6, 3)));
    assert!(!r.contains(Point::new(3, 5)));
    assert!(!Rect::new(0, 0, 0, 0).contains(Point::zero()));
  }

  #[test]
  fn touching_rects_do_not_intersect() {
    let a = Rect::new(0, 0, 5, 5);
    assert!(!a.intersects(Rect::new(5, 0, 5, 5)));
    assert!(a.intersects(Rect::new(4, 4, 5, 5)));
    assert_eq!(
      a.intersect(Rect::new(3, 1, 5, 2)),
      Some(Rect::new(3, 1, 2, 2))
    );
  }

  #[test]
  fn center_floors() {
    assert_eq!(Rect::new(0, 0, 5, 4).center(), Point::new(2, 2));
    assert_eq!(Rect::new(10, 10, 1, 1).center(), Point::new(10, 10));
  }

  #[test]
  fn rect_vec_resize_keeps_overlap() {
    let mut v = RectVec::new(Rect::with_dims(2, 2), 0);
    *v.get_mut(Point::new(1, 1)).unwrap() = 7;
    v.resize(Rect::with_dims(3, 3), 1);
    assert_eq!(v.get(Point::new(1, 1)), Some(&7));
    assert_eq!(v.get(Point::new(2, 2)), Some(&1));
    assert_eq!(v.get(Point::new(3, 3)), None);
  }
}

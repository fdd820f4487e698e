//! Operator overloads.

use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use num::Zero;

use crate::geo::Point;

impl<T> From<(T, T)> for Point<T> {
  #[inline]
  fn from((x, y): (T, T)) -> Self {
    Self::new(x, y)
  }
}

impl<T> From<[T; 2]> for Point<T> {
  #[inline]
  fn from(xs: [T; 2]) -> Self {
    Self(xs)
  }
}

impl<T: Zero + Copy> Zero for Point<T> {
  #[inline]
  fn zero() -> Self {
    Self([T::zero(), T::zero()])
  }

  #[inline]
  fn is_zero(&self) -> bool {
    self.0.iter().all(|x| x.is_zero())
  }
}

impl<T: Neg> Neg for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn neg(self) -> Self::Output {
    let [x, y] = self.0;
    Point([-x, -y])
  }
}

impl<T: Add<U>, U> Add<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn add(self, other: Point<U>) -> Self::Output {
    let ([x1, y1], [x2, y2]) = (self.0, other.0);
    Point([x1 + x2, y1 + y2])
  }
}

impl<T: Sub<U>, U> Sub<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn sub(self, other: Point<U>) -> Self::Output {
    let ([x1, y1], [x2, y2]) = (self.0, other.0);
    Point([x1 - x2, y1 - y2])
  }
}

impl<T: AddAssign<U>, U> AddAssign<Point<U>> for Point<T> {
  #[inline]
  fn add_assign(&mut self, other: Point<U>) {
    let [x, y] = other.0;
    self.0[0] += x;
    self.0[1] += y;
  }
}

impl<T: SubAssign<U>, U> SubAssign<Point<U>> for Point<T> {
  #[inline]
  fn sub_assign(&mut self, other: Point<U>) {
    let [x, y] = other.0;
    self.0[0] -= x;
    self.0[1] -= y;
  }
}

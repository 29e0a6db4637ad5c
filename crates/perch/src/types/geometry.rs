/*! Geometry types for absolute desktop coordinates. */

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A 2D point (or displacement) in absolute desktop pixels.
///
/// Positions are fractional so that centering and resizing keep sub-pixel
/// precision; they are truncated only when handed to the window system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const ZERO: Self = Self::new(0.0, 0.0);

  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Squared length when this point is read as a displacement.
  pub fn sqr_magnitude(self) -> f64 {
    self.x * self.x + self.y * self.y
  }

  /// Euclidean distance to another point.
  pub fn distance(self, other: Self) -> f64 {
    (self - other).sqr_magnitude().sqrt()
  }
}

impl Add for Point {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y)
  }
}

impl Sub for Point {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y)
  }
}

impl AddAssign for Point {
  fn add_assign(&mut self, rhs: Self) {
    *self = *self + rhs;
  }
}

impl SubAssign for Point {
  fn sub_assign(&mut self, rhs: Self) {
    *self = *self - rhs;
  }
}

/// A 3D vector in scene space, used for ray casting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Vec3 {
  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }
}

/// Window rectangle as reported by the window system (edges, not size).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenRect {
  pub left: i32,
  pub top: i32,
  pub right: i32,
  pub bottom: i32,
}

impl ScreenRect {
  pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  pub const fn width(&self) -> i32 {
    self.right - self.left
  }

  pub const fn height(&self) -> i32 {
    self.bottom - self.top
  }

  /// Shift the rectangle by whole pixels.
  pub const fn offset(self, dx: i32, dy: i32) -> Self {
    Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
  }
}

/*! The overlay window's own geometry. */

use crate::platform::Placement;
use crate::types::Point;

/// Position and size of the overlay window.
///
/// Owned by the overlay's controllers; nothing else mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
  /// Top-left corner in absolute desktop pixels.
  pub position: Point,
  pub base_width: f64,
  pub base_height: f64,
  /// Size multiplier, kept inside the configured bounds.
  pub multiplier: f64,
  pub dragging: bool,
}

impl OverlayState {
  pub const fn new(position: Point, base_width: f64, base_height: f64) -> Self {
    Self {
      position,
      base_width,
      base_height,
      multiplier: 1.0,
      dragging: false,
    }
  }

  pub fn width(&self) -> f64 {
    self.base_width * self.multiplier
  }

  pub fn height(&self) -> f64 {
    self.base_height * self.multiplier
  }

  pub fn center(&self) -> Point {
    Point::new(
      self.position.x + self.width() / 2.0,
      self.position.y + self.height() / 2.0,
    )
  }

  /// Native placement; coordinates are truncated toward zero.
  #[allow(clippy::cast_possible_truncation)]
  pub fn placement(&self) -> Placement {
    Placement {
      x: self.position.x as i32,
      y: self.position.y as i32,
      width: self.width() as i32,
      height: self.height() as i32,
    }
  }
}

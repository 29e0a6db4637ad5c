/*! Foreign top-level window tracked by the registry. */

use super::{Point, ScreenRect, WindowHandle, WindowKey};
use serde::{Deserialize, Serialize};

/// How window rectangles are turned into corner points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryMode {
  /// Reproduces the historical corner capture: `top_right` ends up holding
  /// `(right, bottom)` and `bottom_right` is left at its default.
  #[default]
  Legacy,
  /// Every corner holds its real position.
  Corrected,
}

/// Another application's top-level window, tracked read-only.
///
/// Corners are stored independently rather than derived from one rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignWindow {
  pub key: WindowKey,
  pub handle: WindowHandle,
  /// Captured once, when the window is first seen.
  pub title: String,
  pub top_left: Point,
  pub top_right: Point,
  pub bottom_left: Point,
  pub bottom_right: Point,
  /// Set while a refresh is in progress; windows left unset are removed.
  pub alive: bool,
}

impl ForeignWindow {
  pub(crate) fn new(key: WindowKey, handle: WindowHandle, title: String) -> Self {
    Self {
      key,
      handle,
      title,
      top_left: Point::ZERO,
      top_right: Point::ZERO,
      bottom_left: Point::ZERO,
      bottom_right: Point::ZERO,
      alive: false,
    }
  }

  /// Store a freshly read rectangle into the corner points.
  pub(crate) fn apply_rect(&mut self, rect: ScreenRect, mode: GeometryMode) {
    let (left, top) = (f64::from(rect.left), f64::from(rect.top));
    let (right, bottom) = (f64::from(rect.right), f64::from(rect.bottom));

    self.top_left = Point::new(left, top);
    self.bottom_left = Point::new(left, bottom);
    match mode {
      GeometryMode::Legacy => {
        self.top_right = Point::new(right, top);
        self.top_right = Point::new(right, bottom);
      }
      GeometryMode::Corrected => {
        self.top_right = Point::new(right, top);
        self.bottom_right = Point::new(right, bottom);
      }
    }
  }
}

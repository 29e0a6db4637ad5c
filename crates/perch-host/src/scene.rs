/*!
Stand-in scene: the whole overlay rectangle counts as clickable content.

Hosts with a renderer implement [`Scene`] against their real colliders; this
one lets the core run against a bare native window.
*/

use perch::{GroundLine, Point, Ray, Scene, Vec3};

/// Rectangular scene sized to the overlay, with the cursor in viewport pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RectScene {
  cursor: Point,
  width: f64,
  height: f64,
}

impl RectScene {
  /// `desktop_cursor` and `origin` are absolute; the scene works relative to `origin`.
  pub(crate) fn new(desktop_cursor: Point, origin: Point, width: f64, height: f64) -> Self {
    Self {
      cursor: desktop_cursor - origin,
      width,
      height,
    }
  }
}

impl Scene for RectScene {
  fn cursor_position(&self) -> Point {
    self.cursor
  }

  fn screen_point_to_ray(&self, point: Point) -> Ray {
    Ray {
      origin: Vec3::new(point.x, point.y, -1.0),
      direction: Vec3::new(0.0, 0.0, 1.0),
    }
  }

  fn raycast_2d(&self, ray: &Ray) -> bool {
    (0.0..=self.width).contains(&ray.origin.x) && (0.0..=self.height).contains(&ray.origin.y)
  }

  fn raycast_3d(&self, _ray: &Ray, _max_distance: f64) -> bool {
    false
  }

  fn ground_indicator(&self) -> Option<GroundLine> {
    Some(GroundLine::bottom_edge(self.width))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use perch::HitTester;

  #[test]
  fn inside_the_rect_is_clickable() {
    let scene = RectScene::new(Point::new(150.0, 150.0), Point::new(128.0, 128.0), 200.0, 250.0);
    assert_eq!(scene.cursor_position(), Point::new(22.0, 22.0));
    assert!(HitTester::new(100.0).is_over_clickable(&scene, scene.cursor_position()));
  }

  #[test]
  fn outside_the_rect_is_not() {
    let scene = RectScene::new(Point::new(50.0, 150.0), Point::new(128.0, 128.0), 200.0, 250.0);
    assert!(!HitTester::new(100.0).is_over_clickable(&scene, scene.cursor_position()));
  }
}

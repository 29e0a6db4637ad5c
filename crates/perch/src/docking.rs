/*!
Docking - locking the overlay onto the top edge of a foreign window.

A lock is acquired after a cursor-driven placement when the overlay's ground
line sits within tolerance of a window's top edge and the ground line nests
horizontally inside that window. While locked (and not dragging) the overlay
follows the window's top-left corner every tick.

Candidates are scanned in registry insertion order; the last one that
qualifies wins.
*/

use crate::hit_test::GroundLine;
use crate::native::NativeGate;
use crate::passthrough::{self, PassthroughState};
use crate::platform::WindowManager;
use crate::registry::WindowRegistry;
use crate::state::OverlayState;
use crate::telemetry::MotionTelemetry;
use crate::types::{Point, WindowKey};

/// Relation between the overlay and the one window it is docked to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockLock {
  pub key: WindowKey,
  /// The locked window's top-left corner as of the previous tick.
  pub baseline: Point,
}

/// Result of one follow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
  /// No lock is held.
  Unlocked,
  /// The locked window did not move.
  Still,
  /// The overlay moved with the locked window.
  Moved,
  /// The locked window is gone; the lock was dropped.
  Released,
}

/// Acquires, holds and releases the dock lock.
#[derive(Debug, Clone)]
pub struct DockingController {
  tolerance_px: f64,
  follow_epsilon: f64,
  lock: Option<DockLock>,
}

impl DockingController {
  pub fn new(tolerance_px: u32, follow_epsilon: f64) -> Self {
    Self {
      tolerance_px: f64::from(tolerance_px),
      follow_epsilon,
      lock: None,
    }
  }

  pub const fn lock(&self) -> Option<DockLock> {
    self.lock
  }

  /// Drop the current lock, if any.
  pub fn release(&mut self) -> Option<DockLock> {
    let released = self.lock.take();
    if let Some(lock) = released {
      log::debug!("Undocked from window {}", lock.key);
    }
    released
  }

  /// Scan the registry for a window to dock onto, snapping the overlay's y.
  ///
  /// Any previous lock is replaced. Distances are truncated to whole pixels
  /// before comparison.
  pub fn try_lock(
    &mut self,
    registry: &WindowRegistry,
    overlay: &mut OverlayState,
    ground: GroundLine,
  ) -> Option<WindowKey> {
    self.lock = None;
    let height = overlay.height();

    for window in registry.windows() {
      let pos = overlay.position;
      let y_dist = (pos.y + height - ground.left.y - window.top_left.y).trunc();
      let l_dist = (pos.x + ground.left.x - window.top_left.x).trunc();
      let r_dist = (pos.x + ground.right.x - window.top_right.x).trunc();

      if y_dist.abs() < self.tolerance_px && l_dist > 0.0 && r_dist < 0.0 {
        overlay.position.y -= y_dist;
        self.lock = Some(DockLock {
          key: window.key,
          baseline: window.top_left,
        });
      }
    }

    if let Some(lock) = self.lock {
      log::debug!("Docked to window {}", lock.key);
    }
    self.lock.map(|lock| lock.key)
  }

  /// Move the overlay along with the locked window.
  ///
  /// Docked movement is passive, so the window is re-placed click-transparent.
  pub fn follow<W: WindowManager + ?Sized>(
    &mut self,
    registry: &WindowRegistry,
    overlay: &mut OverlayState,
    gate: &NativeGate<'_, W>,
    telemetry: &mut MotionTelemetry,
  ) -> FollowOutcome {
    let Some(lock) = self.lock.as_mut() else {
      return FollowOutcome::Unlocked;
    };
    let Some(window) = registry.get(lock.key) else {
      log::debug!("Docked window {} disappeared, releasing lock", lock.key);
      self.lock = None;
      return FollowOutcome::Released;
    };

    let delta = lock.baseline - window.top_left;
    if delta.sqr_magnitude() <= self.follow_epsilon {
      return FollowOutcome::Still;
    }
    overlay.position -= delta;
    lock.baseline = window.top_left;
    passthrough::place(PassthroughState::Inactive, overlay, gate, telemetry);
    FollowOutcome::Moved
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::{FakeWindow, FakeWindowManager, NativeCall, Placement};
  use crate::shutdown::ShutdownSignal;
  use crate::types::{ScreenRect, WindowHandle};
  use std::time::Duration;

  const OVERLAY: WindowHandle = WindowHandle(1);
  const EDITOR: WindowHandle = WindowHandle(10);
  const HEIGHT: f64 = 250.0;

  /// Ground line along the overlay's top edge, spanning its full width.
  fn top_ground(width: f64) -> GroundLine {
    GroundLine {
      left: Point::new(0.0, HEIGHT),
      right: Point::new(width, HEIGHT),
    }
  }

  fn desktop() -> (FakeWindowManager, WindowRegistry) {
    let wm = FakeWindowManager::new();
    wm.open(FakeWindow::new(10, "Editor", ScreenRect::new(100, 300, 500, 700)));
    let mut registry = WindowRegistry::default();
    registry.refresh(&wm);
    (wm, registry)
  }

  fn telemetry() -> MotionTelemetry {
    MotionTelemetry::new(2850.0, Duration::from_secs(2), Point::ZERO)
  }

  mod acquisition {
    use super::*;

    #[test]
    fn locks_within_tolerance_and_snaps_y() {
      let (_wm, registry) = desktop();
      let mut overlay = OverlayState::new(Point::new(200.0, 314.0), 200.0, HEIGHT);
      let mut docking = DockingController::new(17, 0.0001);

      let key = docking.try_lock(&registry, &mut overlay, top_ground(200.0));
      assert_eq!(key, Some(WindowKey(1)));
      assert_eq!(overlay.position.y, 300.0, "residual distance is removed exactly");
      assert_eq!(
        docking.lock().map(|l| l.baseline),
        Some(Point::new(100.0, 300.0))
      );
    }

    #[test]
    fn bottom_edge_docks_onto_top_edge() {
      let (_wm, registry) = desktop();
      let mut overlay = OverlayState::new(Point::new(200.0, 300.0 - HEIGHT + 9.0), 200.0, HEIGHT);
      let mut docking = DockingController::new(17, 0.0001);

      assert!(docking
        .try_lock(&registry, &mut overlay, GroundLine::bottom_edge(200.0))
        .is_some());
      assert_eq!(overlay.position.y + overlay.height(), 300.0);
    }

    #[test]
    fn distance_at_tolerance_does_not_lock() {
      let (_wm, registry) = desktop();
      let mut overlay = OverlayState::new(Point::new(200.0, 317.0), 200.0, HEIGHT);
      let mut docking = DockingController::new(17, 0.0001);

      assert_eq!(docking.try_lock(&registry, &mut overlay, top_ground(200.0)), None);
      assert_eq!(overlay.position.y, 317.0, "no snap without a lock");
    }

    #[test]
    fn overlay_must_nest_horizontally() {
      let (_wm, registry) = desktop();
      let mut docking = DockingController::new(17, 0.0001);

      let mut past_left = OverlayState::new(Point::new(100.0, 305.0), 200.0, HEIGHT);
      assert_eq!(docking.try_lock(&registry, &mut past_left, top_ground(200.0)), None);

      let mut past_right = OverlayState::new(Point::new(300.0, 305.0), 200.0, HEIGHT);
      assert_eq!(docking.try_lock(&registry, &mut past_right, top_ground(200.0)), None);
    }

    #[test]
    fn last_qualifying_window_wins() {
      let wm = FakeWindowManager::new();
      wm.open(FakeWindow::new(10, "First", ScreenRect::new(100, 300, 500, 700)));
      wm.open(FakeWindow::new(20, "Second", ScreenRect::new(50, 305, 600, 900)));
      let mut registry = WindowRegistry::default();
      registry.refresh(&wm);

      let mut overlay = OverlayState::new(Point::new(200.0, 310.0), 200.0, HEIGHT);
      let mut docking = DockingController::new(17, 0.0001);
      assert_eq!(
        docking.try_lock(&registry, &mut overlay, top_ground(200.0)),
        Some(WindowKey(2))
      );
      assert_eq!(overlay.position.y, 305.0);
    }

    #[test]
    fn failed_scan_clears_previous_lock() {
      let (_wm, registry) = desktop();
      let mut docking = DockingController::new(17, 0.0001);
      let mut overlay = OverlayState::new(Point::new(200.0, 314.0), 200.0, HEIGHT);
      docking.try_lock(&registry, &mut overlay, top_ground(200.0));

      overlay.position = Point::new(900.0, 900.0);
      assert_eq!(docking.try_lock(&registry, &mut overlay, top_ground(200.0)), None);
      assert!(docking.lock().is_none());
    }
  }

  mod following {
    use super::*;

    fn docked() -> (FakeWindowManager, WindowRegistry, OverlayState, DockingController) {
      let (wm, registry) = desktop();
      let mut overlay = OverlayState::new(Point::new(200.0, 314.0), 200.0, HEIGHT);
      let mut docking = DockingController::new(17, 0.0001);
      docking.try_lock(&registry, &mut overlay, top_ground(200.0));
      (wm, registry, overlay, docking)
    }

    #[test]
    fn follows_window_movement_click_transparent() {
      let (wm, mut registry, mut overlay, mut docking) = docked();
      let shutdown = ShutdownSignal::new();
      let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
      let mut telemetry = telemetry();

      wm.move_by(EDITOR, 40, -20);
      registry.refresh(&wm);
      assert_eq!(
        docking.follow(&registry, &mut overlay, &gate, &mut telemetry),
        FollowOutcome::Moved
      );
      assert_eq!(overlay.position, Point::new(240.0, 280.0));
      assert_eq!(
        wm.last_placement(OVERLAY),
        Some(Placement {
          x: 240,
          y: 280,
          width: 200,
          height: 250
        })
      );
      assert!(wm
        .calls()
        .iter()
        .any(|c| matches!(c, NativeCall::SetLayeredAlpha(..))), "placed inactive");
      assert_eq!(docking.lock().map(|l| l.baseline), Some(Point::new(140.0, 280.0)));
    }

    #[test]
    fn still_window_makes_no_calls() {
      let (wm, mut registry, mut overlay, mut docking) = docked();
      let shutdown = ShutdownSignal::new();
      let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
      let mut telemetry = telemetry();

      registry.refresh(&wm);
      assert_eq!(
        docking.follow(&registry, &mut overlay, &gate, &mut telemetry),
        FollowOutcome::Still
      );
      assert_eq!(wm.mutation_count(), 0);
    }

    #[test]
    fn closed_window_releases_silently() {
      let (wm, mut registry, mut overlay, mut docking) = docked();
      let shutdown = ShutdownSignal::new();
      let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
      let mut telemetry = telemetry();
      let before = overlay.position;

      wm.close(EDITOR);
      registry.refresh(&wm);
      assert_eq!(
        docking.follow(&registry, &mut overlay, &gate, &mut telemetry),
        FollowOutcome::Released
      );
      assert_eq!(overlay.position, before, "no further correction");
      assert!(docking.lock().is_none());
      assert_eq!(
        docking.follow(&registry, &mut overlay, &gate, &mut telemetry),
        FollowOutcome::Unlocked
      );
      assert_eq!(wm.mutation_count(), 0);
    }

    #[test]
    fn no_native_calls_after_shutdown() {
      let (wm, mut registry, mut overlay, mut docking) = docked();
      let shutdown = ShutdownSignal::new();
      let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
      let mut telemetry = telemetry();

      shutdown.request();
      wm.move_by(EDITOR, 10, 10);
      registry.refresh(&wm);
      assert_eq!(
        docking.follow(&registry, &mut overlay, &gate, &mut telemetry),
        FollowOutcome::Moved
      );
      assert_eq!(wm.mutation_count(), 0, "movement is tracked but never applied");
    }
  }
}

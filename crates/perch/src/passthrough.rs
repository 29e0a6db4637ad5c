/*!
Click-passthrough state machine.

`Active`: the overlay consumes clicks. `Inactive`: the overlay is click
transparent and input reaches whatever window lies beneath it.

Transitions fire only on edges of the hit-test result, so a steady hover (or
a steady miss) makes no native calls at all.
*/

use crate::native::{self, NativeGate};
use crate::platform::WindowManager;
use crate::state::OverlayState;
use crate::telemetry::MotionTelemetry;

/// Whether the overlay currently consumes clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassthroughState {
  /// Consumes clicks.
  #[default]
  Active,
  /// Transparent to clicks.
  Inactive,
}

/// Edge-triggered controller over [`PassthroughState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughController {
  state: PassthroughState,
}

impl PassthroughController {
  pub const fn new() -> Self {
    Self {
      state: PassthroughState::Active,
    }
  }

  pub const fn state(&self) -> PassthroughState {
    self.state
  }

  pub fn is_clickable(&self) -> bool {
    self.state == PassthroughState::Active
  }

  /// Feed this tick's hit-test result. Returns the new state if an edge fired.
  pub fn update<W: WindowManager + ?Sized>(
    &mut self,
    hit: bool,
    overlay: &OverlayState,
    gate: &NativeGate<'_, W>,
    telemetry: &mut MotionTelemetry,
  ) -> Option<PassthroughState> {
    let next = match (self.state, hit) {
      (PassthroughState::Active, false) => PassthroughState::Inactive,
      (PassthroughState::Inactive, true) => PassthroughState::Active,
      (PassthroughState::Active, true) | (PassthroughState::Inactive, false) => return None,
    };
    self.state = next;
    place(next, overlay, gate, telemetry);
    Some(next)
  }
}

/// Apply a placement in the given mode without changing the controller's state.
///
/// Used by the edge transitions above and by drag, resize and docking, which
/// must re-place the window whenever they move it. Every placement is a
/// telemetry sample.
pub(crate) fn place<W: WindowManager + ?Sized>(
  mode: PassthroughState,
  overlay: &OverlayState,
  gate: &NativeGate<'_, W>,
  telemetry: &mut MotionTelemetry,
) {
  telemetry.record(overlay.position);
  native::report(
    "Overlay placement",
    gate.apply(mode, overlay.placement()),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::{FakeWindowManager, NativeCall};
  use crate::shutdown::ShutdownSignal;
  use crate::types::{Point, WindowHandle};
  use std::time::Duration;

  const OVERLAY: WindowHandle = WindowHandle(1);

  fn fixtures() -> (OverlayState, MotionTelemetry) {
    let origin = Point::new(128.0, 128.0);
    (
      OverlayState::new(origin, 300.0, 400.0),
      MotionTelemetry::new(2850.0, Duration::from_secs(2), origin),
    )
  }

  #[test]
  fn starts_active() {
    let controller = PassthroughController::new();
    assert_eq!(controller.state(), PassthroughState::Active);
    assert!(controller.is_clickable());
  }

  #[test]
  fn equal_results_make_no_native_calls() {
    let wm = FakeWindowManager::new();
    let shutdown = ShutdownSignal::new();
    let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
    let (overlay, mut telemetry) = fixtures();
    let mut controller = PassthroughController::new();

    for _ in 0..5 {
      assert_eq!(controller.update(true, &overlay, &gate, &mut telemetry), None);
    }
    assert_eq!(wm.mutation_count(), 0, "steady hover is silent");
  }

  #[test]
  fn miss_then_hit_fires_both_edges() {
    let wm = FakeWindowManager::new();
    let shutdown = ShutdownSignal::new();
    let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
    let (overlay, mut telemetry) = fixtures();
    let mut controller = PassthroughController::new();

    assert_eq!(
      controller.update(false, &overlay, &gate, &mut telemetry),
      Some(PassthroughState::Inactive)
    );
    assert!(wm
      .calls()
      .iter()
      .any(|c| matches!(c, NativeCall::SetLayeredAlpha(_, 255))));
    assert_eq!(controller.update(false, &overlay, &gate, &mut telemetry), None);

    wm.clear_calls();
    assert_eq!(
      controller.update(true, &overlay, &gate, &mut telemetry),
      Some(PassthroughState::Active)
    );
    assert_eq!(wm.mutation_count(), 2, "active placement is style + position");
  }

  #[test]
  fn placement_samples_telemetry() {
    let wm = FakeWindowManager::new();
    let shutdown = ShutdownSignal::new();
    let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
    let (mut overlay, mut telemetry) = fixtures();
    let mut controller = PassthroughController::new();

    overlay.position = Point::new(228.0, 128.0);
    controller.update(false, &overlay, &gate, &mut telemetry);
    assert_eq!(telemetry.distance_traveled(), 100.0);
    assert_eq!(telemetry.x_speed(), -100.0);
  }

  #[test]
  fn no_native_calls_after_shutdown() {
    let wm = FakeWindowManager::new();
    let shutdown = ShutdownSignal::new();
    let gate = NativeGate::new(&wm, &shutdown, OVERLAY);
    let (overlay, mut telemetry) = fixtures();
    let mut controller = PassthroughController::new();

    shutdown.request();
    assert_eq!(
      controller.update(false, &overlay, &gate, &mut telemetry),
      Some(PassthroughState::Inactive),
      "the edge still fires internally"
    );
    controller.update(true, &overlay, &gate, &mut telemetry);
    assert_eq!(wm.mutation_count(), 0);
  }
}

#[cfg(test)]
mod proptests {
  use super::*;
  use crate::platform::{FakeWindowManager, NativeCall};
  use crate::shutdown::ShutdownSignal;
  use crate::types::{Point, WindowHandle};
  use proptest::prelude::*;
  use std::time::Duration;

  proptest! {
    /// One placement per edge, never more.
    #[test]
    fn placements_match_edges(hits in proptest::collection::vec(any::<bool>(), 0..64)) {
      let wm = FakeWindowManager::new();
      let shutdown = ShutdownSignal::new();
      let gate = NativeGate::new(&wm, &shutdown, WindowHandle(1));
      let overlay = OverlayState::new(Point::ZERO, 100.0, 100.0);
      let mut telemetry = MotionTelemetry::new(2850.0, Duration::from_secs(2), Point::ZERO);
      let mut controller = PassthroughController::new();

      let mut previous = true;
      let mut edges = 0;
      for hit in hits {
        let fired = controller.update(hit, &overlay, &gate, &mut telemetry).is_some();
        prop_assert_eq!(fired, hit != previous);
        if fired {
          edges += 1;
        }
        prop_assert_eq!(controller.is_clickable(), hit);
        previous = hit;
      }

      let placements = wm
        .calls()
        .iter()
        .filter(|c| matches!(c, NativeCall::SetTopmostPlacement(..)))
        .count();
      prop_assert_eq!(placements, edges);
    }
  }
}

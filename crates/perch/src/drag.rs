/*!
Drag and resize.

A drag starts when the primary button goes down while the modifier key is
held and the cursor is over clickable content; it ends as soon as either the
button or the modifier is released. While hovering with the modifier held,
each scroll tick changes the size multiplier by a fixed step, keeping the
window's center in place.
*/

use crate::state::OverlayState;
use crate::types::Point;

/// Pointer and keyboard input for one tick, supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
  /// Primary button went down this tick.
  pub primary_pressed: bool,
  /// Primary button is currently down.
  pub primary_held: bool,
  /// Drag/resize modifier key is currently down.
  pub modifier_held: bool,
  /// Scroll direction this tick; only the sign matters.
  pub scroll: f64,
}

/// Drag start/stop and stepwise resize.
#[derive(Debug, Clone, Copy)]
pub struct DragController {
  resize_step: f64,
  lower: f64,
  upper: f64,
}

impl DragController {
  pub const fn new(resize_step: f64, lower: f64, upper: f64) -> Self {
    Self {
      resize_step,
      lower,
      upper,
    }
  }

  /// Update the dragging flag. Returns true while a drag is in progress.
  pub fn update(&self, input: &PointerInput, hit: bool, overlay: &mut OverlayState) -> bool {
    if input.primary_pressed && input.modifier_held {
      if hit && !overlay.dragging {
        log::debug!("Drag started");
        overlay.dragging = true;
      }
    } else if (!input.primary_held || !input.modifier_held) && overlay.dragging {
      log::debug!("Drag ended");
      overlay.dragging = false;
    }
    overlay.dragging
  }

  /// Move the overlay so the cursor sits at its geometric middle.
  pub fn center_on(overlay: &mut OverlayState, cursor: Point) {
    overlay.position = Point::new(
      cursor.x - overlay.width() / 2.0,
      cursor.y - overlay.height() / 2.0,
    );
  }

  /// Apply one resize step if the input asks for it. Returns true if the size changed.
  ///
  /// The multiplier never leaves `[lower, upper]`, and the window's center stays put.
  pub fn resize(&self, input: &PointerInput, hit: bool, overlay: &mut OverlayState) -> bool {
    if !hit || !input.modifier_held {
      return false;
    }

    let old = overlay.multiplier;
    let new = if input.scroll > 0.0 && old < self.upper {
      (old + self.resize_step).min(self.upper)
    } else if input.scroll < 0.0 && old > self.lower {
      (old - self.resize_step).max(self.lower)
    } else {
      return false;
    };

    overlay.multiplier = new;
    overlay.position.x += (old * overlay.base_width - new * overlay.base_width) / 2.0;
    overlay.position.y += (old * overlay.base_height - new * overlay.base_height) / 2.0;
    true
  }
}


#[cfg(test)]
mod proptests {
  use super::*;
  use proptest::prelude::*;

  proptest! {
    /// Any scroll sequence keeps the multiplier in bounds and the center fixed.
    #[test]
    fn resize_sequence_invariants(
      scrolls in proptest::collection::vec(prop_oneof![Just(-1.0), Just(1.0), Just(0.0)], 0..300),
      x in -2000.0..2000.0f64,
      y in -2000.0..2000.0f64,
    ) {
      let controller = DragController::new(0.013, 0.3, 1.2);
      let mut state = OverlayState::new(Point::new(x, y), 320.0, 480.0);
      let center = state.center();
      for direction in scrolls {
        let input = PointerInput { modifier_held: true, scroll: direction, ..PointerInput::default() };
        controller.resize(&input, true, &mut state);
        prop_assert!((0.3..=1.2).contains(&state.multiplier));
        let now = state.center();
        prop_assert!((now.x - center.x).abs() < 1e-6 && (now.y - center.y).abs() < 1e-6);
      }
    }
  }
}

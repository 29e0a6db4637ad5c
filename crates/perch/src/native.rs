/*!
Guarded access to the overlay's native window.

Every native call made on behalf of the overlay goes through [`NativeGate`],
which checks the shutdown flag immediately before each call. After shutdown
has been requested the gate returns [`PerchError::ShutdownRequested`] without
touching the window manager.

The gate also remembers the last passthrough state the window system
rejected, so the overlay can re-apply it on the next tick.
*/

use std::cell::Cell;

use crate::passthrough::PassthroughState;
use crate::platform::{ExStyle, Placement, WindowManager, WindowStyle};
use crate::shutdown::ShutdownSignal;
use crate::types::{PerchError, PerchResult, Point, WindowHandle};

const OPAQUE: u8 = 255;

/// The overlay window, reachable only while shutdown has not been requested.
pub struct NativeGate<'a, W: ?Sized> {
  wm: &'a W,
  shutdown: &'a ShutdownSignal,
  overlay: WindowHandle,
  stale: Cell<Option<PassthroughState>>,
}

impl<W: ?Sized> std::fmt::Debug for NativeGate<'_, W> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NativeGate")
      .field("overlay", &self.overlay)
      .field("stale", &self.stale.get())
      .finish_non_exhaustive()
  }
}

impl<'a, W: WindowManager + ?Sized> NativeGate<'a, W> {
  pub fn new(wm: &'a W, shutdown: &'a ShutdownSignal, overlay: WindowHandle) -> Self {
    Self {
      wm,
      shutdown,
      overlay,
      stale: Cell::new(None),
    }
  }

  pub const fn overlay(&self) -> WindowHandle {
    self.overlay
  }

  fn live(&self) -> PerchResult<&'a W> {
    if self.shutdown.is_requested() {
      return Err(PerchError::ShutdownRequested);
    }
    Ok(self.wm)
  }

  /// Global cursor position.
  pub fn cursor_position(&self) -> PerchResult<Point> {
    self.live()?.cursor_position()
  }

  /// One-time styling: borderless popup, hidden from the taskbar, topmost,
  /// with the compositor drawing the transparent background.
  pub fn attach(&self, placement: Placement) -> PerchResult<()> {
    self
      .live()?
      .set_window_style(self.overlay, WindowStyle::POPUP | WindowStyle::VISIBLE)?;
    self
      .live()?
      .set_extended_style(self.overlay, ExStyle::TOOLWINDOW)?;
    self.live()?.set_topmost_placement(self.overlay, placement)?;
    self.live()?.extend_frame_into_client_area(self.overlay)
  }

  /// Realize a passthrough state on the native window.
  ///
  /// The first failing step aborts the rest of the sequence.
  pub fn apply(&self, state: PassthroughState, placement: Placement) -> PerchResult<()> {
    let result = match state {
      PassthroughState::Active => self.apply_active(placement),
      PassthroughState::Inactive => self.apply_inactive(placement),
    };
    match &result {
      Ok(()) => self.stale.set(None),
      Err(PerchError::ShutdownRequested) => {}
      Err(_) => self.stale.set(Some(state)),
    }
    result
  }

  /// The state whose most recent [`apply`](Self::apply) was rejected by the
  /// window system, if no later apply has succeeded.
  pub fn stale(&self) -> Option<PassthroughState> {
    self.stale.get()
  }

  fn apply_active(&self, placement: Placement) -> PerchResult<()> {
    let current = self.live()?.extended_style(self.overlay)?;
    let style = current.without(ExStyle::LAYERED | ExStyle::TRANSPARENT) | ExStyle::TOOLWINDOW;
    self.live()?.set_extended_style(self.overlay, style)?;
    self.live()?.set_topmost_placement(self.overlay, placement)
  }

  fn apply_inactive(&self, placement: Placement) -> PerchResult<()> {
    self
      .live()?
      .set_window_style(self.overlay, WindowStyle::POPUP | WindowStyle::VISIBLE)?;
    self.live()?.set_extended_style(
      self.overlay,
      ExStyle::TOOLWINDOW | ExStyle::LAYERED | ExStyle::TRANSPARENT,
    )?;
    self.live()?.set_layered_alpha(self.overlay, OPAQUE)?;
    self.live()?.set_topmost_placement(self.overlay, placement)
  }
}

/// Log a failed native call. Rejected placements are retried next tick.
pub(crate) fn report(context: &str, result: PerchResult<()>) {
  match result {
    Ok(()) => {}
    Err(PerchError::ShutdownRequested) => {
      log::debug!("{context}: skipped, shutdown requested");
    }
    Err(e) => log::warn!("{context}: {e}"),
  }
}

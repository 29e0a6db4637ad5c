/*!
The overlay - one window, one ordered tick.

[`Overlay`] owns every controller and the injected [`WindowManager`]. The host
calls [`Overlay::tick`] once per rendered frame; each tick runs, in order:

1. window registry refresh
2. hit test
3. click-passthrough transition check
4. drag and resize
5. dock follow (skipped while dragging)
6. motion telemetry timer

A placement the window system rejected is re-applied at the start of the
next tick, before the registry refresh.

After [`Overlay::request_shutdown`] a tick does nothing at all, and every
native call made from inside a tick is additionally guarded by
[`NativeGate`].
*/

use std::time::Instant;

use crate::config::OverlayConfig;
use crate::docking::{DockingController, FollowOutcome};
use crate::drag::{DragController, PointerInput};
use crate::hit_test::{GroundLine, HitTester, Scene};
use crate::native::{self, NativeGate};
use crate::passthrough::{self, PassthroughController, PassthroughState};
use crate::platform::WindowManager;
use crate::registry::{RefreshSummary, WindowRegistry};
use crate::shutdown::ShutdownSignal;
use crate::state::OverlayState;
use crate::telemetry::MotionTelemetry;
use crate::types::{ForeignWindow, GeometryMode, PerchResult, Point, WindowHandle, WindowKey};

/// What happened during one tick.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
  /// Placement re-applied after a rejection on the previous tick.
  pub retried: Option<PassthroughState>,
  pub refresh: RefreshSummary,
  pub hit: bool,
  /// Passthrough edge that fired, if any.
  pub transition: Option<PassthroughState>,
  pub dragging: bool,
  pub resized: bool,
  /// `None` while dragging.
  pub follow: Option<FollowOutcome>,
  /// Dock lock acquired by this tick's drag placement.
  pub docked: Option<WindowKey>,
  pub dizzy_checked: bool,
}

/// Builder for an [`Overlay`].
///
/// # Example
///
/// ```ignore
/// let overlay = OverlayBuilder::new()
///     .base_size(320.0, 480.0)
///     .multiplier_bounds(0.3, 1.2)
///     .build(wm, handle)?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct OverlayBuilder {
  config: OverlayConfig,
}

impl OverlayBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start from a complete configuration, e.g. one loaded from JSON.
  pub const fn config(mut self, config: OverlayConfig) -> Self {
    self.config = config;
    self
  }

  /// Initial top-left corner. Default: (128, 128).
  pub const fn initial_position(mut self, x: f64, y: f64) -> Self {
    self.config.initial_position = Point::new(x, y);
    self
  }

  /// Unscaled window size.
  pub const fn base_size(mut self, width: f64, height: f64) -> Self {
    self.config.base_width = width;
    self.config.base_height = height;
    self
  }

  /// Multiplier change per scroll tick. Default: 0.013.
  pub const fn resize_step(mut self, step: f64) -> Self {
    self.config.resize_step = step;
    self
  }

  /// Default: [0.3, 1.2].
  pub const fn multiplier_bounds(mut self, lower: f64, upper: f64) -> Self {
    self.config.multiplier_lower = lower;
    self.config.multiplier_upper = upper;
    self
  }

  /// Default: 17px.
  pub const fn dock_tolerance_px(mut self, px: u32) -> Self {
    self.config.dock_tolerance_px = px;
    self
  }

  /// Default: 2850 per 2000ms.
  pub const fn dizziness(mut self, threshold: f64, interval_ms: u64) -> Self {
    self.config.dizzy_threshold = threshold;
    self.config.dizzy_interval_ms = interval_ms;
    self
  }

  /// Default: 100.
  pub const fn ray_max_distance(mut self, distance: f64) -> Self {
    self.config.ray_max_distance = distance;
    self
  }

  /// Default: [`GeometryMode::Legacy`].
  pub const fn geometry_mode(mut self, mode: GeometryMode) -> Self {
    self.config.geometry_mode = mode;
    self
  }

  /// Validate the configuration and create the overlay for `handle`.
  ///
  /// No native call is made until [`Overlay::attach`] or the first tick.
  pub fn build<W: WindowManager>(self, wm: W, handle: WindowHandle) -> PerchResult<Overlay<W>> {
    self.config.validate()?;
    Ok(Overlay::create(wm, handle, self.config))
  }
}

/// The overlay window and all of its controllers.
#[derive(Debug)]
pub struct Overlay<W: WindowManager> {
  wm: W,
  handle: WindowHandle,
  shutdown: ShutdownSignal,
  registry: WindowRegistry,
  hit_tester: HitTester,
  passthrough: PassthroughController,
  drag: DragController,
  docking: DockingController,
  telemetry: MotionTelemetry,
  state: OverlayState,
  /// Passthrough state the window system last rejected.
  stale: Option<PassthroughState>,
}

impl<W: WindowManager> Overlay<W> {
  fn create(wm: W, handle: WindowHandle, config: OverlayConfig) -> Self {
    let state = OverlayState::new(
      config.initial_position,
      config.base_width,
      config.base_height,
    );
    Self {
      wm,
      handle,
      shutdown: ShutdownSignal::new(),
      registry: WindowRegistry::new(config.geometry_mode).excluding(handle),
      hit_tester: HitTester::new(config.ray_max_distance),
      passthrough: PassthroughController::new(),
      drag: DragController::new(
        config.resize_step,
        config.multiplier_lower,
        config.multiplier_upper,
      ),
      docking: DockingController::new(config.dock_tolerance_px, config.dock_follow_epsilon),
      telemetry: MotionTelemetry::new(
        config.dizzy_threshold,
        config.dizzy_interval(),
        config.initial_position,
      ),
      state,
      stale: None,
    }
  }

  fn gate(&self) -> NativeGate<'_, W> {
    NativeGate::new(&self.wm, &self.shutdown, self.handle)
  }

  /// Style the overlay window and put it at its initial placement.
  ///
  /// Call once before the first tick.
  pub fn attach(&self) -> PerchResult<()> {
    log::info!("Attaching overlay window {}", self.handle);
    self.gate().attach(self.state.placement())
  }

  /// Run one frame. Returns `None` once shutdown has been requested.
  pub fn tick<S: Scene + ?Sized>(
    &mut self,
    scene: &S,
    input: &PointerInput,
    now: Instant,
  ) -> Option<TickReport> {
    if self.shutdown.is_requested() {
      self.telemetry.cancel();
      return None;
    }

    let gate = NativeGate::new(&self.wm, &self.shutdown, self.handle);
    let retried = self.stale.take();
    if let Some(mode) = retried {
      log::debug!("Re-applying rejected {mode:?} placement");
      native::report("Overlay placement retry", gate.apply(mode, self.state.placement()));
    }

    let refresh = self.registry.refresh(&self.wm);

    let hit = self
      .hit_tester
      .is_over_clickable(scene, scene.cursor_position());
    let transition = self
      .passthrough
      .update(hit, &self.state, &gate, &mut self.telemetry);

    let dragging = self.drag.update(input, hit, &mut self.state);
    let mut docked = None;
    if dragging {
      match gate.cursor_position() {
        Ok(cursor) => {
          DragController::center_on(&mut self.state, cursor);
          let ground = scene
            .ground_indicator()
            .unwrap_or_else(|| GroundLine::bottom_edge(self.state.width()));
          docked = self.docking.try_lock(&self.registry, &mut self.state, ground);
          passthrough::place(
            PassthroughState::Active,
            &self.state,
            &gate,
            &mut self.telemetry,
          );
        }
        Err(e) => native::report("Cursor query", Err(e)),
      }
    }

    let resized = self.drag.resize(input, hit, &mut self.state);
    if resized {
      passthrough::place(
        PassthroughState::Active,
        &self.state,
        &gate,
        &mut self.telemetry,
      );
    }

    let follow = (!dragging).then(|| {
      self
        .docking
        .follow(&self.registry, &mut self.state, &gate, &mut self.telemetry)
    });

    let dizzy_checked = self.telemetry.check(now);
    self.stale = gate.stale();

    Some(TickReport {
      retried,
      refresh,
      hit,
      transition,
      dragging,
      resized,
      follow,
      docked,
      dizzy_checked,
    })
  }

  /// Disable every further native call. Safe to call from any thread through
  /// [`Overlay::shutdown_signal`]; calling it here also stops the dizzy timer.
  pub fn request_shutdown(&mut self) {
    self.shutdown.request();
    self.telemetry.cancel();
  }

  /// A handle to the shutdown flag for other threads (e.g. a tray menu).
  pub fn shutdown_signal(&self) -> ShutdownSignal {
    self.shutdown.clone()
  }

  /// True once the quit delay has passed since shutdown was requested.
  pub fn ready_to_exit(&self, now: Instant) -> bool {
    self.shutdown.ready_to_exit(now)
  }

  pub fn is_overlay_clickable(&self) -> bool {
    self.passthrough.is_clickable()
  }

  pub const fn is_dizzy(&self) -> bool {
    self.telemetry.is_dizzy()
  }

  pub const fn x_speed(&self) -> f64 {
    self.telemetry.x_speed()
  }

  /// Tracked foreign windows, in registry insertion order.
  pub fn windows(&self) -> &[ForeignWindow] {
    self.registry.windows()
  }

  /// The window the overlay is docked to, if it is still tracked.
  pub fn docked_window(&self) -> Option<&ForeignWindow> {
    self
      .docking
      .lock()
      .and_then(|lock| self.registry.get(lock.key))
  }

  pub const fn multiplier(&self) -> f64 {
    self.state.multiplier
  }

  /// Top-left corner in desktop pixels.
  pub const fn position(&self) -> Point {
    self.state.position
  }

  pub const fn is_dragging(&self) -> bool {
    self.state.dragging
  }

  pub const fn handle(&self) -> WindowHandle {
    self.handle
  }

  pub const fn window_manager(&self) -> &W {
    &self.wm
  }
}

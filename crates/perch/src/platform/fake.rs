/*!
In-memory window system.

Holds a scripted desktop (foreign windows, cursor, the overlay's own styles)
and records every mutating call, so tests can assert exactly which native
calls were made. Also usable by hosts that want to run the core headless.
*/

use parking_lot::Mutex;

use super::traits::{ExStyle, Placement, WindowManager, WindowProbe, WindowStyle};
use crate::hit_test::{GroundLine, Ray, Scene};
use crate::types::{PerchError, PerchResult, Point, ScreenRect, Vec3, WindowHandle};

/// A mutating call observed by [`FakeWindowManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeCall {
  SetWindowStyle(WindowHandle, WindowStyle),
  SetExtendedStyle(WindowHandle, ExStyle),
  SetLayeredAlpha(WindowHandle, u8),
  SetTopmostPlacement(WindowHandle, Placement),
  ExtendFrame(WindowHandle),
}

/// A scripted top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWindow {
  pub handle: WindowHandle,
  pub title: String,
  pub visible: bool,
  pub rect: ScreenRect,
  /// Simulate the window system failing to report this window's title length.
  pub fail_title: bool,
  /// Simulate `window_rect` failing for this window.
  pub fail_rect: bool,
}

impl FakeWindow {
  pub fn new(handle: isize, title: &str, rect: ScreenRect) -> Self {
    Self {
      handle: WindowHandle(handle),
      title: title.to_string(),
      visible: true,
      rect,
      fail_title: false,
      fail_rect: false,
    }
  }
}

#[derive(Debug, Default)]
struct Desktop {
  windows: Vec<FakeWindow>,
  cursor: Point,
  ex_styles: Vec<(WindowHandle, ExStyle)>,
  fail_enumeration: bool,
  fail_placement: bool,
  fail_styles: bool,
  calls: Vec<NativeCall>,
  title_reads: usize,
}

impl Desktop {
  fn window(&self, handle: WindowHandle) -> PerchResult<&FakeWindow> {
    self
      .windows
      .iter()
      .find(|w| w.handle == handle)
      .ok_or(PerchError::WindowNotFound(handle))
  }

  fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut FakeWindow> {
    self.windows.iter_mut().find(|w| w.handle == handle)
  }
}

/// Scripted [`WindowManager`] with a call log.
#[derive(Debug, Default)]
pub struct FakeWindowManager {
  desktop: Mutex<Desktop>,
}

impl FakeWindowManager {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a window at the end of the enumeration order.
  pub fn open(&self, window: FakeWindow) {
    self.desktop.lock().windows.push(window);
  }

  /// Remove a window entirely, as if it was closed.
  pub fn close(&self, handle: WindowHandle) {
    self.desktop.lock().windows.retain(|w| w.handle != handle);
  }

  /// Move a window by whole pixels.
  pub fn move_by(&self, handle: WindowHandle, dx: i32, dy: i32) {
    if let Some(w) = self.desktop.lock().window_mut(handle) {
      w.rect = w.rect.offset(dx, dy);
    }
  }

  /// Apply an arbitrary edit to a scripted window.
  pub fn edit(&self, handle: WindowHandle, f: impl FnOnce(&mut FakeWindow)) {
    if let Some(w) = self.desktop.lock().window_mut(handle) {
      f(w);
    }
  }

  pub fn set_cursor(&self, cursor: Point) {
    self.desktop.lock().cursor = cursor;
  }

  pub fn fail_enumeration(&self, fail: bool) {
    self.desktop.lock().fail_enumeration = fail;
  }

  /// Fail `SetWindowPos` after recording the call.
  pub fn fail_placement(&self, fail: bool) {
    self.desktop.lock().fail_placement = fail;
  }

  /// Fail both style setters after recording the call.
  pub fn fail_styles(&self, fail: bool) {
    self.desktop.lock().fail_styles = fail;
  }

  /// Every mutating call so far, in order.
  pub fn calls(&self) -> Vec<NativeCall> {
    self.desktop.lock().calls.clone()
  }

  pub fn mutation_count(&self) -> usize {
    self.desktop.lock().calls.len()
  }

  pub fn clear_calls(&self) {
    self.desktop.lock().calls.clear();
  }

  /// The most recent placement applied to `handle`, if any.
  pub fn last_placement(&self, handle: WindowHandle) -> Option<Placement> {
    self.desktop.lock().calls.iter().rev().find_map(|call| match call {
      NativeCall::SetTopmostPlacement(h, p) if *h == handle => Some(*p),
      _ => None,
    })
  }

  /// How many times a title was read (titles are only read for new windows).
  pub fn title_reads(&self) -> usize {
    self.desktop.lock().title_reads
  }
}

impl WindowManager for FakeWindowManager {
  fn enumerate_windows(&self) -> PerchResult<Vec<WindowProbe>> {
    let desktop = self.desktop.lock();
    if desktop.fail_enumeration {
      return Err(PerchError::native("EnumWindows", "scripted failure"));
    }
    Ok(
      desktop
        .windows
        .iter()
        .map(|w| WindowProbe {
          handle: w.handle,
          title_len: (!w.fail_title).then(|| w.title.chars().count()),
          visible: Some(w.visible),
        })
        .collect(),
    )
  }

  fn window_title(&self, handle: WindowHandle) -> PerchResult<String> {
    let mut desktop = self.desktop.lock();
    desktop.title_reads += 1;
    desktop.window(handle).map(|w| w.title.clone())
  }

  fn window_rect(&self, handle: WindowHandle) -> PerchResult<ScreenRect> {
    let desktop = self.desktop.lock();
    let window = desktop.window(handle)?;
    if window.fail_rect {
      return Err(PerchError::native("GetWindowRect", "scripted failure"));
    }
    Ok(window.rect)
  }

  fn cursor_position(&self) -> PerchResult<Point> {
    Ok(self.desktop.lock().cursor)
  }

  fn extended_style(&self, handle: WindowHandle) -> PerchResult<ExStyle> {
    let desktop = self.desktop.lock();
    Ok(
      desktop
        .ex_styles
        .iter()
        .rev()
        .find(|(h, _)| *h == handle)
        .map_or_else(ExStyle::default, |(_, style)| *style),
    )
  }

  fn set_window_style(&self, handle: WindowHandle, style: WindowStyle) -> PerchResult<()> {
    let mut desktop = self.desktop.lock();
    desktop.calls.push(NativeCall::SetWindowStyle(handle, style));
    if desktop.fail_styles {
      return Err(PerchError::native("SetWindowLongPtrW", "scripted failure"));
    }
    Ok(())
  }

  fn set_extended_style(&self, handle: WindowHandle, style: ExStyle) -> PerchResult<()> {
    let mut desktop = self.desktop.lock();
    desktop.calls.push(NativeCall::SetExtendedStyle(handle, style));
    if desktop.fail_styles {
      return Err(PerchError::native("SetWindowLongPtrW", "scripted failure"));
    }
    desktop.ex_styles.push((handle, style));
    Ok(())
  }

  fn set_layered_alpha(&self, handle: WindowHandle, alpha: u8) -> PerchResult<()> {
    self
      .desktop
      .lock()
      .calls
      .push(NativeCall::SetLayeredAlpha(handle, alpha));
    Ok(())
  }

  fn set_topmost_placement(&self, handle: WindowHandle, placement: Placement) -> PerchResult<()> {
    let mut desktop = self.desktop.lock();
    desktop
      .calls
      .push(NativeCall::SetTopmostPlacement(handle, placement));
    if desktop.fail_placement {
      return Err(PerchError::native("SetWindowPos", "scripted failure"));
    }
    Ok(())
  }

  fn extend_frame_into_client_area(&self, handle: WindowHandle) -> PerchResult<()> {
    self.desktop.lock().calls.push(NativeCall::ExtendFrame(handle));
    Ok(())
  }
}

/// Fixed-answer scene for driving the hit-test engine without a renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScene {
  pub cursor: Point,
  pub hit_2d: bool,
  pub hit_3d: bool,
  pub ground: Option<GroundLine>,
}

impl StaticScene {
  /// A scene where the cursor is (or is not) over clickable 2D content.
  pub const fn hovering(hit: bool) -> Self {
    Self {
      cursor: Point::ZERO,
      hit_2d: hit,
      hit_3d: false,
      ground: None,
    }
  }
}

impl Scene for StaticScene {
  fn cursor_position(&self) -> Point {
    self.cursor
  }

  fn screen_point_to_ray(&self, point: Point) -> Ray {
    Ray {
      origin: Vec3::new(point.x, point.y, -10.0),
      direction: Vec3::new(0.0, 0.0, 1.0),
    }
  }

  fn raycast_2d(&self, _ray: &Ray) -> bool {
    self.hit_2d
  }

  fn raycast_3d(&self, _ray: &Ray, _max_distance: f64) -> bool {
    self.hit_3d
  }

  fn ground_indicator(&self) -> Option<GroundLine> {
    self.ground
  }
}

/*!
Platform abstraction traits.

These traits define the contract between core code and the window system.
Platform-specific code (e.g., Win32) implements `WindowManager`.
Core code only uses this trait - never platform-specific types directly.

Mutating methods must only be reached through `NativeGate`, which refuses
them once shutdown has been requested.
*/

use std::ops::BitOr;

use crate::types::{PerchResult, Point, ScreenRect, WindowHandle};

/// One entry of a top-level window enumeration.
///
/// `None` means the window system failed to answer for this window; such a
/// window is treated as not trackable for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProbe {
  pub handle: WindowHandle,
  pub title_len: Option<usize>,
  pub visible: Option<bool>,
}

impl WindowProbe {
  /// Visible and carrying a non-empty title.
  pub fn is_trackable(&self) -> bool {
    self.title_len.is_some_and(|len| len > 0) && self.visible == Some(true)
  }
}

/// Basic window style bits (`GWL_STYLE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowStyle(pub u32);

impl WindowStyle {
  pub const POPUP: Self = Self(0x8000_0000);
  pub const VISIBLE: Self = Self(0x1000_0000);
}

impl BitOr for WindowStyle {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}

/// Extended window style bits (`GWL_EXSTYLE`) controlling layering and click transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExStyle(pub u32);

impl ExStyle {
  pub const TRANSPARENT: Self = Self(0x0000_0020);
  pub const TOOLWINDOW: Self = Self(0x0000_0080);
  pub const LAYERED: Self = Self(0x0008_0000);

  pub const fn contains(self, other: Self) -> bool {
    self.0 & other.0 == other.0
  }

  pub const fn without(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }
}

impl BitOr for ExStyle {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}

/// Position and size for a topmost, shown, frame-refreshed window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
}

/// Window-system operations needed by the overlay core.
///
/// Takes `&self` throughout: mutation happens on the OS side via the handle.
pub trait WindowManager {
  /// Enumerate all top-level windows in the window system's order.
  fn enumerate_windows(&self) -> PerchResult<Vec<WindowProbe>>;

  /// Read a window's title text.
  fn window_title(&self, handle: WindowHandle) -> PerchResult<String>;

  /// Read a window's rectangle in absolute desktop pixels.
  fn window_rect(&self, handle: WindowHandle) -> PerchResult<ScreenRect>;

  /// Global cursor position in absolute desktop pixels (valid across monitors).
  fn cursor_position(&self) -> PerchResult<Point>;

  /// Read the extended style bits.
  fn extended_style(&self, handle: WindowHandle) -> PerchResult<ExStyle>;

  /// Replace the basic style bits.
  fn set_window_style(&self, handle: WindowHandle, style: WindowStyle) -> PerchResult<()>;

  /// Replace the extended style bits.
  fn set_extended_style(&self, handle: WindowHandle, style: ExStyle) -> PerchResult<()>;

  /// Set the constant alpha of a layered window.
  fn set_layered_alpha(&self, handle: WindowHandle, alpha: u8) -> PerchResult<()>;

  /// Move and resize, placing the window topmost and showing it.
  fn set_topmost_placement(&self, handle: WindowHandle, placement: Placement) -> PerchResult<()>;

  /// Let the compositor draw the transparent background over the whole client area.
  fn extend_frame_into_client_area(&self, handle: WindowHandle) -> PerchResult<()>;
}

impl<W: WindowManager + ?Sized> WindowManager for &W {
  fn enumerate_windows(&self) -> PerchResult<Vec<WindowProbe>> {
    (**self).enumerate_windows()
  }

  fn window_title(&self, handle: WindowHandle) -> PerchResult<String> {
    (**self).window_title(handle)
  }

  fn window_rect(&self, handle: WindowHandle) -> PerchResult<ScreenRect> {
    (**self).window_rect(handle)
  }

  fn cursor_position(&self) -> PerchResult<Point> {
    (**self).cursor_position()
  }

  fn extended_style(&self, handle: WindowHandle) -> PerchResult<ExStyle> {
    (**self).extended_style(handle)
  }

  fn set_window_style(&self, handle: WindowHandle, style: WindowStyle) -> PerchResult<()> {
    (**self).set_window_style(handle, style)
  }

  fn set_extended_style(&self, handle: WindowHandle, style: ExStyle) -> PerchResult<()> {
    (**self).set_extended_style(handle, style)
  }

  fn set_layered_alpha(&self, handle: WindowHandle, alpha: u8) -> PerchResult<()> {
    (**self).set_layered_alpha(handle, alpha)
  }

  fn set_topmost_placement(&self, handle: WindowHandle, placement: Placement) -> PerchResult<()> {
    (**self).set_topmost_placement(handle, placement)
  }

  fn extend_frame_into_client_area(&self, handle: WindowHandle) -> PerchResult<()> {
    (**self).extend_frame_into_client_area(handle)
  }
}

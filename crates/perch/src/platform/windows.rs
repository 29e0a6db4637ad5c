/*!
Win32 window manager.

Thin wrappers over user32 and dwmapi. Every call is synchronous; failures are
mapped to [`PerchError::Native`] with the failing call's name.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use std::ffi::c_void;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{SetLastError, BOOL, COLORREF, HWND, LPARAM, POINT, RECT, WIN32_ERROR};
use windows::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::WindowsAndMessaging::{
  EnumWindows, FindWindowW, GetCursorPos, GetWindowLongPtrW, GetWindowRect,
  GetWindowTextLengthW, GetWindowTextW, IsWindowVisible, SetLayeredWindowAttributes,
  SetWindowLongPtrW, SetWindowPos, GWL_EXSTYLE, GWL_STYLE, HWND_TOPMOST, LWA_ALPHA,
  SWP_FRAMECHANGED, SWP_SHOWWINDOW, WINDOW_LONG_PTR_INDEX,
};

use super::traits::{ExStyle, Placement, WindowManager, WindowProbe, WindowStyle};
use crate::types::{PerchError, PerchResult, Point, ScreenRect, WindowHandle};

fn hwnd(handle: WindowHandle) -> HWND {
  HWND(handle.0 as *mut c_void)
}

fn handle(hwnd: HWND) -> WindowHandle {
  WindowHandle(hwnd.0 as isize)
}

fn wide(text: &str) -> Vec<u16> {
  text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// [`WindowManager`] backed by the Win32 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowManager;

impl Win32WindowManager {
  pub const fn new() -> Self {
    Self
  }

  /// Find a top-level window by its exact title.
  pub fn find_window(title: &str) -> PerchResult<WindowHandle> {
    let wide_title = wide(title);
    let found = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(wide_title.as_ptr())) };
    match found {
      Ok(hwnd) if !hwnd.0.is_null() => Ok(handle(hwnd)),
      Ok(_) => Err(PerchError::native("FindWindowW", format!("no window titled {title:?}"))),
      Err(e) => Err(PerchError::native("FindWindowW", e)),
    }
  }

  /// `SetWindowLongPtrW` returns the previous value, which may legitimately be
  /// zero, so failure is only detectable through the thread's last error.
  fn set_long(handle: WindowHandle, index: WINDOW_LONG_PTR_INDEX, value: isize) -> PerchResult<()> {
    unsafe {
      SetLastError(WIN32_ERROR(0));
      if SetWindowLongPtrW(hwnd(handle), index, value) == 0 {
        let error = windows::core::Error::from_win32();
        if error.code().is_err() {
          return Err(PerchError::native("SetWindowLongPtrW", error));
        }
      }
    }
    Ok(())
  }
}

unsafe extern "system" fn collect_probe(hwnd: HWND, lparam: LPARAM) -> BOOL {
  let probes = &mut *(lparam.0 as *mut Vec<WindowProbe>);
  probes.push(WindowProbe {
    handle: handle(hwnd),
    title_len: usize::try_from(GetWindowTextLengthW(hwnd)).ok(),
    visible: Some(IsWindowVisible(hwnd).as_bool()),
  });
  BOOL(1)
}

impl WindowManager for Win32WindowManager {
  fn enumerate_windows(&self) -> PerchResult<Vec<WindowProbe>> {
    let mut probes: Vec<WindowProbe> = Vec::new();
    unsafe {
      let ctx = std::ptr::addr_of_mut!(probes);
      EnumWindows(Some(collect_probe), LPARAM(ctx as isize))
        .map_err(|e| PerchError::native("EnumWindows", e))?;
    }
    Ok(probes)
  }

  fn window_title(&self, handle: WindowHandle) -> PerchResult<String> {
    let hwnd = hwnd(handle);
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    let len = usize::try_from(len).map_err(|e| PerchError::native("GetWindowTextLengthW", e))?;
    let mut buf = vec![0u16; len + 1];
    let read = unsafe { GetWindowTextW(hwnd, &mut buf) };
    let read = usize::try_from(read).map_err(|e| PerchError::native("GetWindowTextW", e))?;
    Ok(String::from_utf16_lossy(buf.get(..read).unwrap_or_default()))
  }

  fn window_rect(&self, handle: WindowHandle) -> PerchResult<ScreenRect> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd(handle), &mut rect) }
      .map_err(|e| PerchError::native("GetWindowRect", e))?;
    Ok(ScreenRect::new(rect.left, rect.top, rect.right, rect.bottom))
  }

  fn cursor_position(&self) -> PerchResult<Point> {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }.map_err(|e| PerchError::native("GetCursorPos", e))?;
    Ok(Point::new(f64::from(point.x), f64::from(point.y)))
  }

  fn extended_style(&self, handle: WindowHandle) -> PerchResult<ExStyle> {
    let bits = unsafe { GetWindowLongPtrW(hwnd(handle), GWL_EXSTYLE) };
    Ok(ExStyle(bits as u32))
  }

  fn set_window_style(&self, handle: WindowHandle, style: WindowStyle) -> PerchResult<()> {
    Self::set_long(handle, GWL_STYLE, style.0 as isize)
  }

  fn set_extended_style(&self, handle: WindowHandle, style: ExStyle) -> PerchResult<()> {
    Self::set_long(handle, GWL_EXSTYLE, style.0 as isize)
  }

  fn set_layered_alpha(&self, handle: WindowHandle, alpha: u8) -> PerchResult<()> {
    unsafe { SetLayeredWindowAttributes(hwnd(handle), COLORREF(0), alpha, LWA_ALPHA) }
      .map_err(|e| PerchError::native("SetLayeredWindowAttributes", e))
  }

  fn set_topmost_placement(&self, handle: WindowHandle, placement: Placement) -> PerchResult<()> {
    unsafe {
      SetWindowPos(
        hwnd(handle),
        HWND_TOPMOST,
        placement.x,
        placement.y,
        placement.width,
        placement.height,
        SWP_FRAMECHANGED | SWP_SHOWWINDOW,
      )
    }
    .map_err(|e| PerchError::native("SetWindowPos", e))
  }

  fn extend_frame_into_client_area(&self, handle: WindowHandle) -> PerchResult<()> {
    let margins = MARGINS {
      cxLeftWidth: -1,
      cxRightWidth: 0,
      cyTopHeight: 0,
      cyBottomHeight: 0,
    };
    unsafe { DwmExtendFrameIntoClientArea(hwnd(handle), &margins) }
      .map_err(|e| PerchError::native("DwmExtendFrameIntoClientArea", e))
  }
}

/*!
Window registry - the live set of foreign top-level windows.

Refreshed once per tick by enumerating every top-level window:
- windows that are hidden or untitled are excluded;
- excluded or vanished windows are removed in the same tick;
- new windows get a fresh [`WindowKey`], their title and their geometry;
- known windows only get their geometry refreshed (the title is never re-read).

Iteration order is registry insertion order. Docking tie-breaks rely on it.

Failures are per-window: a window the OS cannot describe is simply excluded.
*/

use std::collections::HashSet;

use crate::platform::{WindowManager, WindowProbe};
use crate::types::{ForeignWindow, GeometryMode, WindowHandle, WindowKey};

/// What a refresh changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
  pub added: Vec<WindowKey>,
  pub removed: Vec<WindowKey>,
  /// The enumeration itself failed; the registry was left untouched.
  pub skipped_removal: bool,
}

/// Tracked foreign windows in insertion order.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
  windows: Vec<ForeignWindow>,
  mode: GeometryMode,
  next_key: u64,
  exclude: Option<WindowHandle>,
}

impl WindowRegistry {
  pub const fn new(mode: GeometryMode) -> Self {
    Self {
      windows: Vec::new(),
      mode,
      next_key: 1,
      exclude: None,
    }
  }

  /// Never track this handle (the overlay's own window).
  #[must_use]
  pub const fn excluding(mut self, handle: WindowHandle) -> Self {
    self.exclude = Some(handle);
    self
  }

  pub const fn geometry_mode(&self) -> GeometryMode {
    self.mode
  }

  /// All tracked windows, in registry insertion order.
  pub fn windows(&self) -> &[ForeignWindow] {
    &self.windows
  }

  pub fn get(&self, key: WindowKey) -> Option<&ForeignWindow> {
    self.windows.iter().find(|w| w.key == key)
  }

  pub fn len(&self) -> usize {
    self.windows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.windows.is_empty()
  }

  /// Re-prove every window's liveness and refresh geometry.
  pub fn refresh<W: WindowManager + ?Sized>(&mut self, wm: &W) -> RefreshSummary {
    let probes = match wm.enumerate_windows() {
      Ok(probes) => probes,
      Err(e) => {
        log::warn!("Window enumeration failed, keeping previous window set: {e}");
        return RefreshSummary {
          skipped_removal: true,
          ..RefreshSummary::default()
        };
      }
    };

    for window in &mut self.windows {
      window.alive = false;
    }

    let mut added = Vec::new();
    let mut seen = HashSet::new();
    for probe in probes {
      if !probe.is_trackable() || Some(probe.handle) == self.exclude || !seen.insert(probe.handle) {
        continue;
      }
      if let Some(key) = self.observe(wm, probe) {
        added.push(key);
      }
    }

    let mut removed = Vec::new();
    self.windows.retain(|w| {
      if !w.alive {
        removed.push(w.key);
      }
      w.alive
    });

    for key in &added {
      log::debug!("Tracking window {key}");
    }
    for key in &removed {
      log::debug!("Window {key} gone");
    }

    RefreshSummary {
      added,
      removed,
      skipped_removal: false,
    }
  }

  /// Update or create the entry for one trackable window. Returns the key if created.
  fn observe<W: WindowManager + ?Sized>(&mut self, wm: &W, probe: WindowProbe) -> Option<WindowKey> {
    let mode = self.mode;

    if let Some(existing) = self.windows.iter_mut().find(|w| w.handle == probe.handle) {
      match wm.window_rect(probe.handle) {
        Ok(rect) => {
          existing.apply_rect(rect, mode);
          existing.alive = true;
        }
        Err(e) => log::debug!("Dropping window {}: {e}", probe.handle),
      }
      return None;
    }

    let title = match wm.window_title(probe.handle) {
      Ok(title) => title,
      Err(e) => {
        log::debug!("Skipping window {}: {e}", probe.handle);
        return None;
      }
    };
    let rect = match wm.window_rect(probe.handle) {
      Ok(rect) => rect,
      Err(e) => {
        log::debug!("Skipping window {}: {e}", probe.handle);
        return None;
      }
    };

    let key = WindowKey(self.next_key);
    self.next_key += 1;
    let mut window = ForeignWindow::new(key, probe.handle, title);
    window.apply_rect(rect, mode);
    window.alive = true;
    self.windows.push(window);
    Some(key)
  }
}

impl Default for WindowRegistry {
  fn default() -> Self {
    Self::new(GeometryMode::default())
  }
}

/*! Branded ID types for native and logical window identity. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Raw native window handle (`HWND` on Windows).
///
/// The window system may hand the same numeric value to a different window
/// after the original closes, so this is not a stable identity on its own.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct WindowHandle(pub isize);

/// Logical window identity, assigned by the registry when a window is first seen.
///
/// Never reused within a registry: a handle that vanishes and comes back gets a new key.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Into,
)]
pub struct WindowKey(pub u64);

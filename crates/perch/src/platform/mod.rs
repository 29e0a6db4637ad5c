/*!
Platform abstraction layer.

[`WindowManager`] is the only seam between the core and the window system.
`windows` implements it on Win32; `fake` implements it in memory for tests
and headless hosts.
*/

mod fake;
mod traits;

#[cfg(target_os = "windows")]
mod windows;

pub use fake::{FakeWindow, FakeWindowManager, NativeCall, StaticScene};
pub use traits::{ExStyle, Placement, WindowManager, WindowProbe, WindowStyle};

#[cfg(target_os = "windows")]
pub use self::windows::Win32WindowManager;

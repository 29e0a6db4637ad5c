/*!
Perch - window interaction core for desktop mascot overlays

```ignore
use perch::{OverlayBuilder, PointerInput, Win32WindowManager};

let handle = Win32WindowManager::find_window("Perch")?;
let mut overlay = OverlayBuilder::new()
    .base_size(320.0, 480.0)
    .build(Win32WindowManager::new(), handle)?;
overlay.attach()?;

// Once per rendered frame
overlay.tick(&scene, &input, Instant::now());
let clickable = overlay.is_overlay_clickable();
let dizzy = overlay.is_dizzy();

// From the tray thread
let signal = overlay.shutdown_signal();
signal.request();
```
*/

mod config;
mod docking;
mod drag;
mod native;
mod overlay;
mod passthrough;
mod platform;
mod registry;
mod shutdown;
mod state;
mod telemetry;

mod types;
pub use types::*;

pub use crate::config::OverlayConfig;
pub use crate::docking::{DockLock, DockingController, FollowOutcome};
pub use crate::drag::{DragController, PointerInput};
pub use crate::hit_test::{GroundLine, HitTester, Ray, Scene};
pub use crate::native::NativeGate;
pub use crate::overlay::{Overlay, OverlayBuilder, TickReport};
pub use crate::passthrough::{PassthroughController, PassthroughState};
pub use crate::platform::{
  ExStyle, FakeWindow, FakeWindowManager, NativeCall, Placement, StaticScene, WindowManager,
  WindowProbe, WindowStyle,
};
#[cfg(target_os = "windows")]
pub use crate::platform::Win32WindowManager;
pub use crate::registry::{RefreshSummary, WindowRegistry};
pub use crate::shutdown::{ShutdownSignal, QUIT_DELAY};
pub use crate::state::OverlayState;
pub use crate::telemetry::MotionTelemetry;

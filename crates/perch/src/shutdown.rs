/*!
Shutdown signalling.

Once shutdown is requested no native window mutation may happen: mutating
the overlay window while the process tears down crashes it. The flag is
shared with whoever requests the shutdown (usually a tray menu on another
thread), so it is an atomic behind an `Arc`.
*/

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time between the shutdown request and the process being allowed to exit.
///
/// Exiting in the same frame the request arrives is not safe.
pub const QUIT_DELAY: Duration = Duration::from_secs(1);

/// Cloneable shutdown flag. Clone is cheap (Arc bumps).
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
  requested: Arc<AtomicBool>,
  requested_at: Arc<Mutex<Option<Instant>>>,
}

impl ShutdownSignal {
  pub fn new() -> Self {
    Self::default()
  }

  /// Request shutdown. Idempotent; the first request's time is kept.
  pub fn request(&self) {
    self.request_at(Instant::now());
  }

  pub(crate) fn request_at(&self, now: Instant) {
    let mut at = self.requested_at.lock();
    if at.is_none() {
      *at = Some(now);
      log::info!("Shutdown requested, native window calls disabled");
    }
    self.requested.store(true, Ordering::SeqCst);
  }

  pub fn is_requested(&self) -> bool {
    self.requested.load(Ordering::SeqCst)
  }

  /// True once [`QUIT_DELAY`] has passed since the request.
  pub fn ready_to_exit(&self, now: Instant) -> bool {
    self
      .requested_at
      .lock()
      .is_some_and(|at| now.saturating_duration_since(at) >= QUIT_DELAY)
  }
}

/*! Error types for perch operations. */

use super::WindowHandle;

/// Errors that can occur while talking to the window system.
#[derive(Debug, thiserror::Error)]
pub enum PerchError {
  #[error("Shutdown requested, native window mutation refused")]
  ShutdownRequested,

  #[error("Window not found: {0}")]
  WindowNotFound(WindowHandle),

  #[error("{call} failed: {reason}")]
  Native { call: &'static str, reason: String },

  #[error("Invalid configuration: {0}")]
  Config(#[from] serde_json::Error),

  #[error("Invalid configuration value: {0}")]
  InvalidConfig(String),

  #[error("Operation not supported: {0}")]
  NotSupported(String),
}

impl PerchError {
  pub(crate) fn native(call: &'static str, reason: impl ToString) -> Self {
    Self::Native {
      call,
      reason: reason.to_string(),
    }
  }
}

/// Result type for perch operations.
pub type PerchResult<T> = Result<T, PerchError>;

/*! Core types for perch. */

#![allow(missing_docs)]

mod error;
mod geometry;
mod ids;
mod window;

pub use error::{PerchError, PerchResult};
pub use geometry::{Point, ScreenRect, Vec3};
pub use ids::{WindowHandle, WindowKey};
pub use window::{ForeignWindow, GeometryMode};

//! 2D Mathematics Library
//!
//! Small value types shared by the splash cursor crates.
//!
//! - [`Vec2`] - 2D vector in surface pixel space
//! - [`Rgba`] - Straight-alpha color
//! - [`SurfaceSize`] - Integer pixel dimensions of a drawing surface

mod vec2;
mod color;
mod size;

pub use vec2::Vec2;
pub use color::Rgba;
pub use size::SurfaceSize;

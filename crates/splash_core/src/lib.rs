//! Core types for the splash cursor effect
//!
//! This crate holds the particle model and the per-frame simulation:
//!
//! - [`Particle`] - A short-lived point with position, velocity, life, size and color
//! - [`Palette`] - Fixed set of colors a particle may be spawned with
//! - [`FieldConfig`] - Tunables shared by every particle in a field
//! - [`ParticleField`] - The live particle set: spawns batches and steps frames
//! - [`DrawContext`] - Where a field draws its surviving particles

mod particle;
mod palette;
mod config;
mod draw;
mod field;

pub use particle::Particle;
pub use palette::Palette;
pub use config::{FieldConfig, FieldConfigError, OverflowPolicy};
pub use draw::DrawContext;
pub use field::{FrameStats, ParticleField};

// Re-export commonly used types from splash_math for convenience
pub use splash_math::{Rgba, SurfaceSize, Vec2};

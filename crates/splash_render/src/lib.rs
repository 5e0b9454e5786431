//! Splash Rendering Library
//!
//! This crate owns the particle field animator and the wgpu-backed surface it
//! draws into.
//!
//! ## Key Components
//!
//! - [`animator::Animator`] - Attached/detached lifecycle, event handling and the frame loop
//! - [`surface::Surface`] - Drawing surface the animator binds to
//! - [`scheduler::FrameScheduler`] - Animation frame requests and cancellation
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::CirclePipeline`] - Instanced filled-circle rendering
//! - [`window_surface::WindowSurface`] - [`surface::Surface`] for a winit window

pub mod animator;
pub mod surface;
pub mod scheduler;
pub mod context;
pub mod pipeline;
pub mod window_surface;

pub use animator::{Animator, AnimatorError, AttachOutcome};
pub use surface::Surface;
pub use scheduler::{FrameQueue, FrameScheduler, FrameToken};
pub use window_surface::{RenderError, WindowSurface};

// Re-export core types for convenience
pub use splash_core::{DrawContext, FieldConfig, FrameStats, Particle, ParticleField};
pub use splash_core::{Rgba, SurfaceSize, Vec2};

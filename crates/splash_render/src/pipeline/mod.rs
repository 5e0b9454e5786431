//! Render pipelines
//!
//! - [`CirclePipeline`] - Draws a batch of filled, alpha-blended circles
//! - [`CircleBatch`] - CPU-side batch the animator draws into

mod types;
mod batch;
mod circle_pipeline;

pub use types::{CircleInstance, ViewportUniforms};
pub use batch::CircleBatch;
pub use circle_pipeline::CirclePipeline;

//! CPU-side circle batch

use splash_core::{DrawContext, Rgba, SurfaceSize, Vec2};

use super::types::CircleInstance;

/// Collects the circles drawn during one frame
///
/// `clear` starts a new frame; the GPU surface clears its target when the
/// batch is presented, so clearing here only discards queued circles.
#[derive(Debug, Default)]
pub struct CircleBatch {
    instances: Vec<CircleInstance>,
    /// Convert colors to linear for sRGB targets
    linear_output: bool,
}

impl CircleBatch {
    pub fn new(linear_output: bool) -> Self {
        Self {
            instances: Vec::new(),
            linear_output,
        }
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl DrawContext for CircleBatch {
    fn clear(&mut self, _size: SurfaceSize) {
        self.instances.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let color = if self.linear_output { color.to_linear() } else { color };
        self.instances.push(CircleInstance::new(
            center.to_f32_array(),
            radius as f32,
            color.to_array(),
        ));
    }
}

//! GPU-compatible data types for the circle pipeline
//!
//! These types match the layouts in `circle.wgsl`.

use bytemuck::{Pod, Zeroable};

/// One filled circle, uploaded as per-instance vertex data
///
/// Layout: 32 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// Center in surface pixels
    pub center: [f32; 2],
    /// Radius in pixels
    pub radius: f32,
    pub _padding: f32,
    /// Straight-alpha RGBA
    pub color: [f32; 4],
}

impl CircleInstance {
    pub fn new(center: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            _padding: 0.0,
            color,
        }
    }
}

/// Viewport uniforms
///
/// Layout: 16 bytes (uniform buffers need 16-byte alignment)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ViewportUniforms {
    /// Surface size in pixels
    pub size: [f32; 2],
    pub _padding: [f32; 2],
}

impl ViewportUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width as f32, height as f32],
            _padding: [0.0; 2],
        }
    }
}

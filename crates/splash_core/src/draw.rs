//! Drawing sink for particles

use splash_math::{Rgba, SurfaceSize, Vec2};

/// A 2D drawing context a particle field can render into
///
/// Mirrors the two canvas operations the effect needs: wiping the whole
/// surface and filling a circle.
pub trait DrawContext {
    /// Clear the rectangle `(0, 0)..(size.width, size.height)`
    fn clear(&mut self, size: SurfaceSize);

    /// Fill a circle at `center` with straight-alpha `color`
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);
}

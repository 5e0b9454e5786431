//! Drawing surface abstraction

use splash_core::{DrawContext, SurfaceSize, Vec2};

/// A bounded 2D drawing area
///
/// A surface has two sizes: the size it is displayed at (owned by the host
/// layout) and the size of its pixel buffer (owned by whoever draws into
/// it). The animator keeps the second in sync with the first.
pub trait Surface {
    type Context: DrawContext;

    /// Size the host currently displays the surface at
    fn displayed_size(&self) -> SurfaceSize;

    /// Size of the pixel buffer
    fn pixel_size(&self) -> SurfaceSize;

    fn set_pixel_size(&mut self, size: SurfaceSize);

    /// Top-left corner in client coordinates
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// The drawing context, if one can be obtained
    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// Resize the pixel buffer to the displayed size
///
/// Returns true if the size changed. Matching sizes are left untouched.
pub fn sync_pixel_size<S: Surface + ?Sized>(surface: &mut S) -> bool {
    let displayed = surface.displayed_size();
    if surface.pixel_size() == displayed {
        return false;
    }
    surface.set_pixel_size(displayed);
    true
}

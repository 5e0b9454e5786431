//! A single trail particle

use splash_math::{Rgba, Vec2};

/// A short-lived, independently animated point
///
/// `life` starts at 1.0 and only ever decreases. The owning field drops the
/// particle on the first frame that takes `life` to zero or below, so a live
/// particle always has `life > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f64,
    /// Base radius; the drawn radius is `size * life`
    pub size: f64,
    /// Opaque palette color; the drawn alpha is `life`
    pub color: Rgba,
}

impl Particle {
    /// Create a fresh particle with full life
    pub fn new(position: Vec2, velocity: Vec2, size: f64, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            size,
            color,
        }
    }

    /// Advance one frame: move, then accelerate downward, then age
    #[inline]
    pub fn advance(&mut self, gravity: f64, life_decay: f64) {
        self.position += self.velocity;
        self.velocity.y += gravity;
        self.life -= life_decay;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Radius to draw at the current life
    #[inline]
    pub fn radius(&self) -> f64 {
        self.size * self.life
    }

    /// Fill color to draw at the current life
    #[inline]
    pub fn fill_color(&self) -> Rgba {
        self.color.with_alpha(self.life as f32)
    }
}

//! Particle color palette

use rand::Rng;
use splash_math::Rgba;

/// Fixed set of colors a particle is spawned with, picked uniformly
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Default for Palette {
    /// Purple, blue, pink, indigo
    fn default() -> Self {
        Self::new(vec![
            Rgba::from_rgb8(139, 92, 246),
            Rgba::from_rgb8(59, 130, 246),
            Rgba::from_rgb8(236, 72, 153),
            Rgba::from_rgb8(99, 102, 241),
        ])
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pick a color uniformly at random
    ///
    /// Returns `None` for an empty palette.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<Rgba> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[rng.gen_range(0..self.colors.len())])
    }
}

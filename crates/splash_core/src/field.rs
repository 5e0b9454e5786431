//! The live particle set
//!
//! A [`ParticleField`] spawns batches of particles at pointer positions and
//! advances every live particle once per frame, drawing the survivors.

use std::f64::consts::TAU;

use rand::Rng;
use splash_math::Vec2;

use crate::{DrawContext, FieldConfig, FieldConfigError, OverflowPolicy, Particle};

/// What one frame did to the field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles drawn this frame (equals the live count afterwards)
    pub drawn: usize,
    /// Particles whose life ran out this frame
    pub removed: usize,
}

/// Owns the live particles and the constants they share
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    /// Live particles, oldest first
    particles: Vec<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            config: FieldConfig::default(),
            particles: Vec::new(),
        }
    }
}

impl ParticleField {
    /// Create an empty field, rejecting configs that cannot be sampled or
    /// would let particles live forever
    pub fn new(config: FieldConfig) -> Result<Self, FieldConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            particles: Vec::new(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every live particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn one batch of particles at `position`
    ///
    /// Each particle gets an independent angle in `[0, 2π)`, a speed and a
    /// size from the configured ranges, and a palette color. Returns how many
    /// particles were added. Under [`OverflowPolicy::DropOldest`] the cap
    /// only ever evicts older particles, since a valid cap holds at least one
    /// batch.
    pub fn spawn_batch<R: Rng>(&mut self, rng: &mut R, position: Vec2) -> usize {
        let batch = self.config.batch_size;

        if let Some(max) = self.config.max_particles {
            if self.config.overflow == OverflowPolicy::SkipSpawn
                && self.particles.len() + batch > max
            {
                log::trace!("Particle cap {} reached, skipping batch", max);
                return 0;
            }
        }

        let mut spawned = 0;
        for _ in 0..batch {
            let Some(color) = self.config.palette.pick(rng) else {
                break;
            };
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(self.config.speed.clone());
            let size = rng.gen_range(self.config.size.clone());
            self.particles.push(Particle::new(
                position,
                Vec2::from_angle(angle, speed),
                size,
                color,
            ));
            spawned += 1;
        }

        if let Some(max) = self.config.max_particles {
            if self.particles.len() > max {
                let excess = self.particles.len() - max;
                self.particles.drain(..excess);
            }
        }

        spawned
    }

    /// Advance every particle one frame and draw the survivors
    ///
    /// Particles are processed in insertion order. Each one is moved, aged,
    /// and either removed (life <= 0) or drawn with radius `size * life` and
    /// alpha `life`. The caller is responsible for clearing the surface first.
    pub fn step<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> FrameStats {
        let gravity = self.config.gravity;
        let life_decay = self.config.life_decay;
        let before = self.particles.len();

        self.particles.retain_mut(|particle| {
            particle.advance(gravity, life_decay);
            if !particle.is_alive() {
                return false;
            }
            ctx.fill_circle(particle.position, particle.radius(), particle.fill_color());
            true
        });

        FrameStats {
            drawn: self.particles.len(),
            removed: before - self.particles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use splash_math::{Rgba, SurfaceSize};

    /// Records every circle drawn
    #[derive(Default)]
    struct CircleLog {
        circles: Vec<(Vec2, f64, Rgba)>,
    }

    impl DrawContext for CircleLog {
        fn clear(&mut self, _size: SurfaceSize) {
            self.circles.clear();
        }

        fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
            self.circles.push((center, radius, color));
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_spawn_batch_adds_four() {
        let mut field = ParticleField::default();
        let mut rng = rng();

        assert_eq!(field.spawn_batch(&mut rng, Vec2::new(5.0, 5.0)), 4);
        assert_eq!(field.len(), 4);
        assert_eq!(field.spawn_batch(&mut rng, Vec2::new(6.0, 6.0)), 4);
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn test_spawned_particles_respect_ranges() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        for _ in 0..50 {
            field.spawn_batch(&mut rng, Vec2::new(100.0, 100.0));
        }

        let palette = field.config().palette.clone();
        for p in field.particles() {
            assert_eq!(p.position, Vec2::new(100.0, 100.0));
            assert_eq!(p.life, 1.0);
            let speed = p.velocity.length();
            assert!(speed >= 0.5 - 1e-9 && speed < 2.5 + 1e-9, "speed {}", speed);
            assert!(p.size >= 4.0 && p.size < 12.0, "size {}", p.size);
            assert!(palette.colors().contains(&p.color));
        }
    }

    #[test]
    fn test_step_draws_survivors_only() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        field.spawn_batch(&mut rng, Vec2::new(50.0, 50.0));

        let mut log = CircleLog::default();
        let stats = field.step(&mut log);
        assert_eq!(stats, FrameStats { drawn: 4, removed: 0 });
        assert_eq!(log.circles.len(), 4);

        for ((center, radius, color), p) in log.circles.iter().zip(field.particles()) {
            assert_eq!(*center, p.position);
            assert!((radius - p.size * 0.975).abs() < 1e-9);
            assert!((color.a - 0.975).abs() < 1e-6);
        }
    }

    #[test]
    fn test_particles_expire_after_forty_frames() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        field.spawn_batch(&mut rng, Vec2::new(0.0, 0.0));

        let mut log = CircleLog::default();
        for _ in 0..39 {
            log.clear(SurfaceSize::ZERO);
            field.step(&mut log);
        }
        assert_eq!(field.len(), 4);

        log.clear(SurfaceSize::ZERO);
        let stats = field.step(&mut log);
        assert_eq!(stats, FrameStats { drawn: 0, removed: 4 });
        assert!(field.is_empty());
        assert!(log.circles.is_empty());
    }

    #[test]
    fn test_life_strictly_decreases() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        field.spawn_batch(&mut rng, Vec2::ZERO);

        let mut log = CircleLog::default();
        let mut previous: Vec<f64> = field.particles().iter().map(|p| p.life).collect();
        while !field.is_empty() {
            field.step(&mut log);
            for (p, prev) in field.particles().iter().zip(&previous) {
                assert!(p.life < *prev);
                assert!(p.life > 0.0);
            }
            previous = field.particles().iter().map(|p| p.life).collect();
        }
    }

    #[test]
    fn test_older_particles_expire_first() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        let mut log = CircleLog::default();

        field.spawn_batch(&mut rng, Vec2::new(1.0, 1.0));
        for _ in 0..10 {
            field.step(&mut log);
        }
        field.spawn_batch(&mut rng, Vec2::new(2.0, 2.0));
        for _ in 0..30 {
            field.step(&mut log);
        }

        // First batch is gone, second batch has 10 frames left
        assert_eq!(field.len(), 4);
        assert!(field.particles().iter().all(|p| (p.life - 0.25).abs() < 1e-9));
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut field = ParticleField::default();
        let mut rng = rng();
        field.spawn_batch(&mut rng, Vec2::ZERO);
        let initial: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();

        let mut log = CircleLog::default();
        for _ in 0..10 {
            field.step(&mut log);
        }

        for (p, v0) in field.particles().iter().zip(initial) {
            assert_eq!(p.velocity.x, v0.x);
            assert!((p.velocity.y - (v0.y + 0.5)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_drop_oldest_keeps_newest() {
        let config = FieldConfig {
            max_particles: Some(6),
            overflow: OverflowPolicy::DropOldest,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config).unwrap();
        let mut rng = rng();

        field.spawn_batch(&mut rng, Vec2::new(1.0, 1.0));
        assert_eq!(field.spawn_batch(&mut rng, Vec2::new(2.0, 2.0)), 4);

        assert_eq!(field.len(), 6);
        let from_first = field
            .particles()
            .iter()
            .filter(|p| p.position == Vec2::new(1.0, 1.0))
            .count();
        assert_eq!(from_first, 2);
        assert_eq!(field.particles()[5].position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_skip_spawn_refuses_overflowing_batch() {
        let config = FieldConfig {
            max_particles: Some(6),
            overflow: OverflowPolicy::SkipSpawn,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config).unwrap();
        let mut rng = rng();

        assert_eq!(field.spawn_batch(&mut rng, Vec2::ZERO), 4);
        assert_eq!(field.spawn_batch(&mut rng, Vec2::ZERO), 0);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn test_drop_oldest_at_one_batch_cap_returns_net_count() {
        let config = FieldConfig {
            max_particles: Some(4),
            overflow: OverflowPolicy::DropOldest,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::new(config).unwrap();
        let mut rng = rng();

        for i in 0..3 {
            let position = Vec2::new(i as f64, 0.0);
            assert_eq!(field.spawn_batch(&mut rng, position), 4);
            assert_eq!(field.len(), 4);
            assert!(field.particles().iter().all(|p| p.position == position));
        }
    }

    #[test]
    fn test_new_rejects_unusable_config() {
        let config = FieldConfig { speed: 1.0..1.0, ..FieldConfig::default() };
        assert_eq!(
            ParticleField::new(config).unwrap_err(),
            FieldConfigError::InvalidRange { field: "speed" }
        );

        let config = FieldConfig { life_decay: 0.0, ..FieldConfig::default() };
        assert_eq!(
            ParticleField::new(config).unwrap_err(),
            FieldConfigError::NonPositiveDecay(0.0)
        );

        let config = FieldConfig {
            max_particles: Some(2),
            overflow: OverflowPolicy::SkipSpawn,
            ..FieldConfig::default()
        };
        assert!(ParticleField::new(config).is_err());
    }

    #[test]
    fn test_clear() {
        let mut field = ParticleField::default();
        field.spawn_batch(&mut rng(), Vec2::ZERO);
        field.clear();
        assert!(field.is_empty());
    }
}

//! Particle field tunables

use std::fmt;
use std::ops::Range;

use crate::Palette;

/// What a capped field does when a batch would exceed `max_particles`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Spawn the batch, then drop the oldest particles down to the cap
    #[default]
    DropOldest,
    /// Refuse the whole batch
    SkipSpawn,
}

/// Constants shared by every particle in a field
///
/// Velocities, gravity and decay are per frame, not per second.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Added to `velocity.y` each frame
    pub gravity: f64,
    /// Subtracted from `life` each frame
    pub life_decay: f64,
    /// Particles spawned per pointer-move event
    pub batch_size: usize,
    /// Spawn speed, sampled uniformly
    pub speed: Range<f64>,
    /// Spawn base radius, sampled uniformly
    pub size: Range<f64>,
    pub palette: Palette,
    /// Live particle cap; `None` means unbounded
    pub max_particles: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            life_decay: 0.025,
            batch_size: 4,
            speed: 0.5..2.5,
            size: 4.0..12.0,
            palette: Palette::default(),
            max_particles: None,
            overflow: OverflowPolicy::DropOldest,
        }
    }
}

impl FieldConfig {
    /// Check that every tunable can be sampled and keeps `life` decreasing
    pub fn validate(&self) -> Result<(), FieldConfigError> {
        if !(self.life_decay.is_finite() && self.life_decay > 0.0) {
            return Err(FieldConfigError::NonPositiveDecay(self.life_decay));
        }
        if !self.gravity.is_finite() {
            return Err(FieldConfigError::InvalidRange { field: "gravity" });
        }
        if self.batch_size == 0 {
            return Err(FieldConfigError::EmptyBatch);
        }
        check_range("speed", &self.speed)?;
        check_range("size", &self.size)?;
        if self.palette.is_empty() {
            return Err(FieldConfigError::EmptyPalette);
        }
        if let Some(max) = self.max_particles {
            if max < self.batch_size {
                return Err(FieldConfigError::CapacityBelowBatch {
                    max,
                    batch: self.batch_size,
                });
            }
        }
        Ok(())
    }

    /// Frames a particle survives before removal
    ///
    /// Only meaningful on a config that passed [`FieldConfig::validate`].
    pub fn lifetime_frames(&self) -> u32 {
        let mut life = 1.0_f64;
        let mut frames = 0;
        while life > 0.0 {
            life -= self.life_decay;
            frames += 1;
        }
        frames
    }
}

fn check_range(field: &'static str, range: &Range<f64>) -> Result<(), FieldConfigError> {
    let valid = range.start.is_finite()
        && range.end.is_finite()
        && range.start >= 0.0
        && range.start < range.end;
    if valid {
        Ok(())
    } else {
        Err(FieldConfigError::InvalidRange { field })
    }
}

/// Rejected field configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConfigError {
    /// Life decay must be a positive finite number
    NonPositiveDecay(f64),
    /// Batch size must be at least one
    EmptyBatch,
    /// A sampled range is empty, inverted, negative or not finite
    InvalidRange { field: &'static str },
    /// Palette has no colors to pick from
    EmptyPalette,
    /// The cap cannot hold a single batch
    CapacityBelowBatch { max: usize, batch: usize },
}

impl fmt::Display for FieldConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConfigError::NonPositiveDecay(decay) => {
                write!(f, "life decay must be positive, got {}", decay)
            }
            FieldConfigError::EmptyBatch => write!(f, "batch size must be at least 1"),
            FieldConfigError::InvalidRange { field } => {
                write!(f, "invalid range for '{}'", field)
            }
            FieldConfigError::EmptyPalette => write!(f, "palette must contain at least one color"),
            FieldConfigError::CapacityBelowBatch { max, batch } => write!(
                f,
                "max_particles ({}) must be at least the batch size ({})",
                max, batch
            ),
        }
    }
}

impl std::error::Error for FieldConfigError {}

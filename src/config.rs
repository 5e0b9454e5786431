//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SPLASH_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use splash_core::{FieldConfig, OverflowPolicy, Palette, Rgba};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle effect configuration
    #[serde(default)]
    pub particles: ParticleConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SPLASH_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPLASH_PARTICLES__GRAVITY=0.1 -> particles.gravity = 0.1
        figment = figment.merge(Env::prefixed("SPLASH_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Splash Cursor".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Overflow behavior when `max_particles` is set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowSetting {
    #[default]
    DropOldest,
    SkipSpawn,
}

impl From<OverflowSetting> for OverflowPolicy {
    fn from(setting: OverflowSetting) -> Self {
        match setting {
            OverflowSetting::DropOldest => OverflowPolicy::DropOldest,
            OverflowSetting::SkipSpawn => OverflowPolicy::SkipSpawn,
        }
    }
}

/// Particle effect configuration
///
/// Motion values are per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Mount the effect at startup
    pub enabled: bool,
    /// Downward acceleration added to velocity each frame
    pub gravity: f64,
    /// Life lost each frame (life starts at 1.0)
    pub life_decay: f64,
    /// Particles spawned per pointer-move event
    pub batch_size: usize,
    /// Minimum spawn speed
    pub speed_min: f64,
    /// Maximum spawn speed (exclusive)
    pub speed_max: f64,
    /// Minimum base radius
    pub size_min: f64,
    /// Maximum base radius (exclusive)
    pub size_max: f64,
    /// Colors as [r, g, b] bytes
    pub palette: Vec<[u8; 3]>,
    /// Live particle cap (unset = unbounded)
    pub max_particles: Option<usize>,
    /// What to do at the cap
    pub overflow: OverflowSetting,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gravity: 0.05,
            life_decay: 0.025,
            batch_size: 4,
            speed_min: 0.5,
            speed_max: 2.5,
            size_min: 4.0,
            size_max: 12.0,
            palette: vec![[139, 92, 246], [59, 130, 246], [236, 72, 153], [99, 102, 241]],
            max_particles: None,
            overflow: OverflowSetting::DropOldest,
        }
    }
}

impl ParticleConfig {
    /// Convert to the particle field's configuration
    pub fn to_field_config(&self) -> FieldConfig {
        FieldConfig {
            gravity: self.gravity,
            life_decay: self.life_decay,
            batch_size: self.batch_size,
            speed: self.speed_min..self.speed_max,
            size: self.size_min..self.size_max,
            palette: Palette::new(
                self.palette
                    .iter()
                    .map(|&[r, g, b]| Rgba::from_rgb8(r, g, b))
                    .collect(),
            ),
            max_particles: self.max_particles,
            overflow: self.overflow.into(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a] behind the trail
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.059, 0.09, 0.165, 1.0],
        }
    }
}

impl RenderingConfig {
    pub fn background(&self) -> Rgba {
        let [r, g, b, a] = self.background_color;
        Rgba::new(r, g, b, a)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the live particle count in the window title
    pub show_particle_count: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_particle_count: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

//! Application systems
//!
//! Modular systems kept out of main.rs for better organization and testability.

mod effect;
mod window;

pub use effect::{EffectSystem, RedrawScheduler};
pub use window::{WindowError, WindowSystem};

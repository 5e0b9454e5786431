//! Splash Cursor
//!
//! A full-window decorative particle trail that follows the pointer.

pub mod config;
pub mod input;
pub mod systems;

//! Input handling module
//!
//! Maps keys to application actions. Pointer and resize events are not
//! handled here; they go to the effect through `splash_input` ports.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};

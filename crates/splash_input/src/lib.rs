//! Surface input ports
//!
//! This crate provides the two narrow input ports the splash animator listens
//! on (pointer movement and resize), plus the mapping from raw window events
//! onto them.
//!
//! - [`EventPorts`] - Listener registry with explicit subscribe/unsubscribe
//! - [`SurfaceEvent`] - Pointer-move and resize events in surface terms
//! - [`EventMapper`] - Translates winit window events into [`SurfaceEvent`]s

mod ports;
mod event;

pub use ports::{EventPorts, ListenerId, PortKind};
pub use event::{EventMapper, SurfaceEvent};

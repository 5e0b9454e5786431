//! Surface events and the window event mapper

use splash_math::{SurfaceSize, Vec2};
use winit::event::WindowEvent;

use crate::PortKind;

/// Input delivered to a surface's ports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Pointer position in client (window) coordinates
    PointerMoved { position: Vec2 },
    /// New displayed size of the host window
    Resized { size: SurfaceSize },
}

impl SurfaceEvent {
    /// The port this event is delivered on
    pub fn kind(&self) -> PortKind {
        match self {
            SurfaceEvent::PointerMoved { .. } => PortKind::PointerMove,
            SurfaceEvent::Resized { .. } => PortKind::Resize,
        }
    }
}

/// Maps raw window events onto surface ports
///
/// Everything except cursor movement and resizing is left to the host.
pub struct EventMapper;

impl EventMapper {
    /// Map a window event to a surface event
    ///
    /// Returns `None` for events no port cares about
    pub fn map_window_event(event: &WindowEvent) -> Option<SurfaceEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(SurfaceEvent::PointerMoved {
                position: Vec2::new(position.x, position.y),
            }),
            WindowEvent::Resized(size) => Some(SurfaceEvent::Resized {
                size: SurfaceSize::new(size.width, size.height),
            }),
            _ => None,
        }
    }
}

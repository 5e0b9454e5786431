//! Listener registry for the surface input ports
//!
//! A listener is only a handle: the host dispatches an event to its owner only
//! while the handle is still registered for that port. Unsubscribing is what
//! makes a detached animator deaf, without any callback juggling.

/// The input ports a surface exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Pointer moved over the surface
    PointerMove,
    /// Host window was resized
    Resize,
}

/// Handle for one subscription to one port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    kind: PortKind,
}

/// Registry of active listeners
#[derive(Debug, Default)]
pub struct EventPorts {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener on `kind`
    pub fn subscribe(&mut self, kind: PortKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, kind });
        id
    }

    /// Remove a listener
    ///
    /// Returns false if it was not registered (already removed or never added).
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// Check whether a listener is still registered
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|listener| listener.id == id)
    }

    /// Number of listeners registered on `kind`
    pub fn listener_count(&self, kind: PortKind) -> usize {
        self.listeners.iter().filter(|listener| listener.kind == kind).count()
    }

    pub fn has_listeners(&self, kind: PortKind) -> bool {
        self.listeners.iter().any(|listener| listener.kind == kind)
    }

    /// Total registered listeners across all ports
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

//! Animation frame scheduling
//!
//! The animator never runs its own loop. It asks a [`FrameScheduler`] for the
//! next frame and is handed the token back when that frame is due. Tokens are
//! unique, so a frame requested before a `detach` can be told apart from any
//! frame requested afterwards.

/// Identifies one requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Something that can run a callback on the next display frame
pub trait FrameScheduler {
    /// Request a frame; the returned token is passed back when it is due
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a requested frame. Unknown or already-run tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Host-agnostic scheduler that hands out due frames on demand
///
/// Window hosts wrap this and trigger a redraw on every request; headless
/// hosts and tests call [`FrameQueue::take_due`] directly.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending frame, in request order
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|pending| *pending != token);
    }
}

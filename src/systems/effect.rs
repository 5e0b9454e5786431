//! Splash effect system
//!
//! Mounts the particle animator on the window surface and drives it from the
//! winit event loop: window events go through the input ports, and every
//! redraw runs the frames that have come due.

use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

use splash_core::{DrawContext, Rgba};
use splash_input::{EventMapper, EventPorts};
use splash_render::{
    Animator, AttachOutcome, FrameQueue, FrameScheduler, FrameToken, RenderError, Surface,
    WindowSurface,
};

/// Frame scheduler that turns each request into a window redraw
pub struct RedrawScheduler {
    queue: FrameQueue,
    window: Arc<Window>,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            queue: FrameQueue::new(),
            window,
        }
    }

    /// Frames due at this redraw
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        self.queue.take_due()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = self.queue.request_frame();
        self.window.request_redraw();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.queue.cancel_frame(token);
    }
}

/// Owns the animator and the host side of its ports and frame loop
pub struct EffectSystem {
    animator: Animator<WindowSurface>,
    ports: EventPorts,
    frames: RedrawScheduler,
    /// Surface held while the effect is unmounted
    parked: Option<WindowSurface>,
    background: Rgba,
}

impl EffectSystem {
    /// Create an unmounted effect for `surface`
    pub fn new(
        surface: WindowSurface,
        animator: Animator<WindowSurface>,
        background: Rgba,
    ) -> Self {
        let frames = RedrawScheduler::new(surface.window().clone());
        Self {
            animator,
            ports: EventPorts::new(),
            frames,
            parked: Some(surface),
            background,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.animator.is_attached()
    }

    pub fn particle_count(&self) -> usize {
        self.animator.particle_count()
    }

    /// Attach the animator to the window surface
    ///
    /// Returns true if the effect is running afterwards.
    pub fn mount(&mut self) -> bool {
        if self.is_mounted() {
            return true;
        }
        let Some(surface) = self.parked.take() else {
            log::debug!("No surface to mount the splash effect on");
            return false;
        };

        match self.animator.attach(surface, &mut self.ports, &mut self.frames) {
            Ok(AttachOutcome::Attached) => true,
            Ok(AttachOutcome::SurfaceUnavailable) => {
                log::info!("Splash effect disabled: no GPU surface");
                false
            }
            Err(e) => {
                log::warn!("Failed to mount splash effect: {}", e);
                false
            }
        }
    }

    /// Detach the animator and blank the window
    pub fn unmount(&mut self) {
        let Some(mut surface) = self.animator.detach(&mut self.ports, &mut self.frames) else {
            return;
        };

        let size = surface.pixel_size();
        if let Some(ctx) = surface.context() {
            ctx.clear(size);
        }
        if let Err(e) = surface.present(self.background) {
            log::warn!("Failed to clear window after unmount: {}", e);
        }
        self.parked = Some(surface);
    }

    /// Mount if unmounted, unmount if mounted
    pub fn toggle(&mut self) -> bool {
        if self.is_mounted() {
            self.unmount();
            false
        } else {
            self.mount()
        }
    }

    /// Offer a window event to the effect's ports
    ///
    /// Returns true if the animator consumed it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match EventMapper::map_window_event(event) {
            Some(surface_event) => self.animator.handle_event(&surface_event, &self.ports),
            None => false,
        }
    }

    /// Run due frames and present each one
    pub fn redraw(&mut self) -> Result<(), RenderError> {
        for token in self.frames.take_due() {
            if self.animator.run_frame(token, &mut self.frames).is_none() {
                continue;
            }
            if let Some(surface) = self.animator.surface_mut() {
                surface.present(self.background)?;
            }
        }
        Ok(())
    }
}

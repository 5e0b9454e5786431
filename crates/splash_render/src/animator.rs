//! Particle field animator
//!
//! The animator has two states:
//!
//! - **Detached**: no surface, no listeners, no pending frame.
//! - **Attached**: owns a surface and a [`ParticleField`], holds one listener
//!   on each input port, and always has exactly one animation frame pending.
//!
//! `attach` and `detach` are the only transitions. While attached, every
//! frame clears the surface, steps the field and requests the next frame,
//! whether or not any particles are alive.
//!
//! # Example
//! ```ignore
//! let mut animator = Animator::new(FieldConfig::default())?;
//! animator.attach(surface, &mut ports, &mut frames)?;
//!
//! // Host event dispatch
//! animator.handle_event(&event, &ports);
//!
//! // Host frame callback
//! for token in frames.take_due() {
//!     animator.run_frame(token, &mut frames);
//! }
//!
//! let surface = animator.detach(&mut ports, &mut frames);
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splash_core::{
    DrawContext, FieldConfig, FieldConfigError, FrameStats, Particle, ParticleField,
};
use splash_core::{Rgba, SurfaceSize, Vec2};
use splash_input::{EventPorts, ListenerId, PortKind, SurfaceEvent};

use crate::scheduler::{FrameScheduler, FrameToken};
use crate::surface::{sync_pixel_size, Surface};

/// Result of a successful `attach` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Listeners registered and the frame loop started
    Attached,
    /// The surface had no drawing context; nothing was registered and the
    /// animator stayed detached
    SurfaceUnavailable,
}

/// Lifecycle misuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorError {
    /// `attach` called without a `detach` since the previous `attach`
    AlreadyAttached,
}

impl fmt::Display for AnimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatorError::AlreadyAttached => {
                write!(f, "Animator is already attached; detach it first")
            }
        }
    }
}

impl std::error::Error for AnimatorError {}

/// Everything that only exists while attached
struct Attached<S> {
    surface: S,
    field: ParticleField,
    /// Last pointer position, surface-local
    pointer: Vec2,
    pointer_listener: ListenerId,
    resize_listener: ListenerId,
    pending_frame: FrameToken,
}

enum AnimatorState<S> {
    Detached,
    Attached(Attached<S>),
}

/// Draws nothing; used when a surface loses its context mid-run
struct Offscreen;

impl DrawContext for Offscreen {
    fn clear(&mut self, _size: SurfaceSize) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f64, _color: Rgba) {}
}

/// Renders a decorative particle trail following the pointer over a surface
pub struct Animator<S, R = StdRng> {
    /// Empty field with a validated config, cloned on every attach
    blank_field: ParticleField,
    rng: R,
    state: AnimatorState<S>,
}

impl<S: Surface> Default for Animator<S> {
    /// Detached animator with the reference tunables
    fn default() -> Self {
        Self {
            blank_field: ParticleField::default(),
            rng: StdRng::from_entropy(),
            state: AnimatorState::Detached,
        }
    }
}

impl<S: Surface> Animator<S> {
    /// Create a detached animator seeded from OS entropy
    pub fn new(config: FieldConfig) -> Result<Self, FieldConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> Animator<S, R> {
    /// Create a detached animator with a caller-supplied random source
    ///
    /// The config is validated here, so nothing reaches `attach` that could
    /// fail to sample or keep particles alive forever.
    pub fn with_rng(config: FieldConfig, rng: R) -> Result<Self, FieldConfigError> {
        Ok(Self {
            blank_field: ParticleField::new(config)?,
            rng,
            state: AnimatorState::Detached,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        self.blank_field.config()
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, AnimatorState::Attached(_))
    }

    /// Bind to `surface` and start the frame loop
    ///
    /// The pixel buffer is resized to the displayed size, one listener is
    /// registered on each port, and the first frame is requested. A surface
    /// without a drawing context is dropped and the call degrades to a no-op
    /// reported as [`AttachOutcome::SurfaceUnavailable`].
    pub fn attach<F: FrameScheduler + ?Sized>(
        &mut self,
        mut surface: S,
        ports: &mut EventPorts,
        frames: &mut F,
    ) -> Result<AttachOutcome, AnimatorError> {
        if self.is_attached() {
            return Err(AnimatorError::AlreadyAttached);
        }

        if surface.context().is_none() {
            log::debug!("No drawing context available, splash effect disabled");
            return Ok(AttachOutcome::SurfaceUnavailable);
        }

        sync_pixel_size(&mut surface);
        let size = surface.pixel_size();

        let pointer_listener = ports.subscribe(PortKind::PointerMove);
        let resize_listener = ports.subscribe(PortKind::Resize);
        let pending_frame = frames.request_frame();

        self.state = AnimatorState::Attached(Attached {
            surface,
            field: self.blank_field.clone(),
            pointer: Vec2::ZERO,
            pointer_listener,
            resize_listener,
            pending_frame,
        });

        log::info!("Splash animator attached ({}x{})", size.width, size.height);
        Ok(AttachOutcome::Attached)
    }

    /// Release listeners, cancel the pending frame and hand the surface back
    ///
    /// Live particles are discarded. Returns `None` if already detached, so
    /// repeated calls are harmless.
    pub fn detach<F: FrameScheduler + ?Sized>(
        &mut self,
        ports: &mut EventPorts,
        frames: &mut F,
    ) -> Option<S> {
        match std::mem::replace(&mut self.state, AnimatorState::Detached) {
            AnimatorState::Detached => None,
            AnimatorState::Attached(attached) => {
                ports.unsubscribe(attached.pointer_listener);
                ports.unsubscribe(attached.resize_listener);
                frames.cancel_frame(attached.pending_frame);
                log::info!(
                    "Splash animator detached ({} particles discarded)",
                    attached.field.len()
                );
                Some(attached.surface)
            }
        }
    }

    /// Route a port event to the matching handler
    ///
    /// The event is only handled if this animator's listener for the event's
    /// port is still registered in `ports`. Returns true if it was handled.
    pub fn handle_event(&mut self, event: &SurfaceEvent, ports: &EventPorts) -> bool {
        let AnimatorState::Attached(attached) = &self.state else {
            return false;
        };
        let listener = match event.kind() {
            PortKind::PointerMove => attached.pointer_listener,
            PortKind::Resize => attached.resize_listener,
        };
        if !ports.is_subscribed(listener) {
            return false;
        }

        match *event {
            SurfaceEvent::PointerMoved { position } => {
                self.on_pointer_move(position);
            }
            SurfaceEvent::Resized { .. } => {
                self.on_resize();
            }
        }
        true
    }

    /// Record the pointer and spawn one batch under it
    ///
    /// `client` is in host coordinates; the surface origin is subtracted.
    /// Every call spawns a batch. Returns how many particles were spawned
    /// (zero while detached).
    pub fn on_pointer_move(&mut self, client: Vec2) -> usize {
        let AnimatorState::Attached(attached) = &mut self.state else {
            return 0;
        };
        let local = client - attached.surface.origin();
        attached.pointer = local;
        attached.field.spawn_batch(&mut self.rng, local)
    }

    /// Resize the pixel buffer to the displayed size
    ///
    /// Returns true if the size changed.
    pub fn on_resize(&mut self) -> bool {
        let AnimatorState::Attached(attached) = &mut self.state else {
            return false;
        };
        let changed = sync_pixel_size(&mut attached.surface);
        if changed {
            let size = attached.surface.pixel_size();
            log::debug!("Splash surface resized to {}x{}", size.width, size.height);
        }
        changed
    }

    /// Run one animation frame
    ///
    /// Only the currently pending frame runs; any other token (canceled by a
    /// detach, from an earlier attachment, or already run) is ignored and
    /// returns `None`. A frame clears the surface, steps the field, and
    /// requests the next frame.
    pub fn run_frame<F: FrameScheduler + ?Sized>(
        &mut self,
        token: FrameToken,
        frames: &mut F,
    ) -> Option<FrameStats> {
        let AnimatorState::Attached(attached) = &mut self.state else {
            log::trace!("Ignoring frame {:?} while detached", token);
            return None;
        };
        if attached.pending_frame != token {
            log::trace!("Ignoring stale frame {:?}", token);
            return None;
        }

        let size = attached.surface.pixel_size();
        let stats = match attached.surface.context() {
            Some(ctx) => {
                ctx.clear(size);
                attached.field.step(ctx)
            }
            None => attached.field.step(&mut Offscreen),
        };

        attached.pending_frame = frames.request_frame();
        Some(stats)
    }

    /// Live particles, empty while detached
    pub fn particles(&self) -> &[Particle] {
        match &self.state {
            AnimatorState::Attached(attached) => attached.field.particles(),
            AnimatorState::Detached => &[],
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particles().len()
    }

    /// Last pointer position in surface coordinates
    pub fn pointer(&self) -> Option<Vec2> {
        match &self.state {
            AnimatorState::Attached(attached) => Some(attached.pointer),
            AnimatorState::Detached => None,
        }
    }

    /// The frame this animator is waiting for
    pub fn pending_frame(&self) -> Option<FrameToken> {
        match &self.state {
            AnimatorState::Attached(attached) => Some(attached.pending_frame),
            AnimatorState::Detached => None,
        }
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            AnimatorState::Attached(attached) => Some(&attached.surface),
            AnimatorState::Detached => None,
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        match &mut self.state {
            AnimatorState::Attached(attached) => Some(&mut attached.surface),
            AnimatorState::Detached => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameQueue;

    /// Canvas double that counts operations
    #[derive(Default)]
    struct Canvas {
        clears: Vec<SurfaceSize>,
        circles: usize,
    }

    impl DrawContext for Canvas {
        fn clear(&mut self, size: SurfaceSize) {
            self.clears.push(size);
        }

        fn fill_circle(&mut self, _center: Vec2, _radius: f64, _color: Rgba) {
            self.circles += 1;
        }
    }

    struct TestSurface {
        displayed: SurfaceSize,
        pixels: SurfaceSize,
        origin: Vec2,
        canvas: Option<Canvas>,
    }

    impl TestSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                displayed: SurfaceSize::new(width, height),
                pixels: SurfaceSize::ZERO,
                origin: Vec2::ZERO,
                canvas: Some(Canvas::default()),
            }
        }
    }

    impl Surface for TestSurface {
        type Context = Canvas;

        fn displayed_size(&self) -> SurfaceSize {
            self.displayed
        }

        fn pixel_size(&self) -> SurfaceSize {
            self.pixels
        }

        fn set_pixel_size(&mut self, size: SurfaceSize) {
            self.pixels = size;
        }

        fn origin(&self) -> Vec2 {
            self.origin
        }

        fn context(&mut self) -> Option<&mut Canvas> {
            self.canvas.as_mut()
        }
    }

    fn animator() -> Animator<TestSurface> {
        Animator::with_rng(FieldConfig::default(), StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_attach_syncs_size_and_registers() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();

        let outcome = animator.attach(TestSurface::new(640, 480), &mut ports, &mut frames);
        assert_eq!(outcome, Ok(AttachOutcome::Attached));
        assert!(animator.is_attached());
        assert_eq!(
            animator.surface().unwrap().pixel_size(),
            SurfaceSize::new(640, 480)
        );
        assert_eq!(ports.listener_count(PortKind::PointerMove), 1);
        assert_eq!(ports.listener_count(PortKind::Resize), 1);
        assert_eq!(frames.pending_count(), 1);
        assert_eq!(animator.pending_frame(), frames.take_due().first().copied());
    }

    #[test]
    fn test_attach_without_context_is_silent_noop() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        let mut surface = TestSurface::new(100, 100);
        surface.canvas = None;

        let outcome = animator.attach(surface, &mut ports, &mut frames);
        assert_eq!(outcome, Ok(AttachOutcome::SurfaceUnavailable));
        assert!(!animator.is_attached());
        assert!(ports.is_empty());
        assert_eq!(frames.pending_count(), 0);
        assert_eq!(animator.on_pointer_move(Vec2::new(1.0, 1.0)), 0);
    }

    #[test]
    fn test_double_attach_is_rejected() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();

        animator
            .attach(TestSurface::new(10, 10), &mut ports, &mut frames)
            .unwrap();
        let second = animator.attach(TestSurface::new(10, 10), &mut ports, &mut frames);

        assert_eq!(second, Err(AnimatorError::AlreadyAttached));
        assert_eq!(ports.len(), 2);
        assert_eq!(frames.pending_count(), 1);
    }

    #[test]
    fn test_pointer_move_is_surface_local() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        let mut surface = TestSurface::new(200, 200);
        surface.origin = Vec2::new(30.0, 40.0);
        animator.attach(surface, &mut ports, &mut frames).unwrap();

        assert_eq!(animator.on_pointer_move(Vec2::new(130.0, 140.0)), 4);
        assert_eq!(animator.pointer(), Some(Vec2::new(100.0, 100.0)));
        assert!(animator
            .particles()
            .iter()
            .all(|p| p.position == Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_frame_clears_draws_and_reschedules() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(200, 100), &mut ports, &mut frames)
            .unwrap();
        animator.on_pointer_move(Vec2::new(50.0, 50.0));

        let token = frames.take_due()[0];
        let stats = animator.run_frame(token, &mut frames).unwrap();
        assert_eq!(stats, FrameStats { drawn: 4, removed: 0 });

        let canvas = animator.surface().unwrap().canvas.as_ref().unwrap();
        assert_eq!(canvas.clears, vec![SurfaceSize::new(200, 100)]);
        assert_eq!(canvas.circles, 4);

        // Next frame already requested, and the spent token is dead
        assert_eq!(frames.pending_count(), 1);
        assert_eq!(animator.run_frame(token, &mut frames), None);
    }

    #[test]
    fn test_loop_runs_with_no_particles() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(20, 20), &mut ports, &mut frames)
            .unwrap();

        for _ in 0..5 {
            let due = frames.take_due();
            assert_eq!(due.len(), 1);
            let stats = animator.run_frame(due[0], &mut frames).unwrap();
            assert_eq!(stats.drawn, 0);
        }
        let canvas = animator.surface().unwrap().canvas.as_ref().unwrap();
        assert_eq!(canvas.clears.len(), 5);
    }

    #[test]
    fn test_frame_without_context_still_ages_particles() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(20, 20), &mut ports, &mut frames)
            .unwrap();
        animator.on_pointer_move(Vec2::new(5.0, 5.0));
        animator.surface_mut().unwrap().canvas = None;

        let token = frames.take_due()[0];
        let stats = animator.run_frame(token, &mut frames).unwrap();
        assert_eq!(stats.drawn, 4);
        assert!(animator.particles().iter().all(|p| p.life < 1.0));
        assert_eq!(frames.pending_count(), 1);
    }

    #[test]
    fn test_on_resize_tracks_displayed_size() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(100, 100), &mut ports, &mut frames)
            .unwrap();

        assert!(!animator.on_resize());

        animator.surface_mut().unwrap().displayed = SurfaceSize::new(300, 120);
        assert!(animator.on_resize());
        assert_eq!(
            animator.surface().unwrap().pixel_size(),
            SurfaceSize::new(300, 120)
        );
        assert!(!animator.on_resize());
    }

    #[test]
    fn test_handle_event_requires_live_listener() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(100, 100), &mut ports, &mut frames)
            .unwrap();

        let moved = SurfaceEvent::PointerMoved { position: Vec2::new(10.0, 10.0) };
        assert!(animator.handle_event(&moved, &ports));
        assert_eq!(animator.particle_count(), 4);

        // A foreign registry knows nothing of our listeners
        let foreign = EventPorts::new();
        assert!(!animator.handle_event(&moved, &foreign));
        assert_eq!(animator.particle_count(), 4);
    }

    #[test]
    fn test_handle_resize_event() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(100, 100), &mut ports, &mut frames)
            .unwrap();
        animator.surface_mut().unwrap().displayed = SurfaceSize::new(50, 60);

        let resized = SurfaceEvent::Resized { size: SurfaceSize::new(50, 60) };
        assert!(animator.handle_event(&resized, &ports));
        assert_eq!(
            animator.surface().unwrap().pixel_size(),
            SurfaceSize::new(50, 60)
        );
    }

    #[test]
    fn test_detach_releases_everything() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(100, 100), &mut ports, &mut frames)
            .unwrap();
        animator.on_pointer_move(Vec2::new(10.0, 10.0));

        let surface = animator.detach(&mut ports, &mut frames);
        assert!(surface.is_some());
        assert!(!animator.is_attached());
        assert!(ports.is_empty());
        assert_eq!(frames.pending_count(), 0);
        assert_eq!(animator.particle_count(), 0);
        assert_eq!(animator.pointer(), None);

        assert!(animator.detach(&mut ports, &mut frames).is_none());
    }

    #[test]
    fn test_reattach_after_detach() {
        let mut animator = animator();
        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();

        animator
            .attach(TestSurface::new(10, 10), &mut ports, &mut frames)
            .unwrap();
        let old_token = animator.pending_frame().unwrap();
        let surface = animator.detach(&mut ports, &mut frames).unwrap();

        let outcome = animator.attach(surface, &mut ports, &mut frames);
        assert_eq!(outcome, Ok(AttachOutcome::Attached));
        assert_eq!(ports.len(), 2);
        assert_eq!(frames.pending_count(), 1);

        // The frame from the first attachment must not run
        assert_eq!(animator.run_frame(old_token, &mut frames), None);
        assert_eq!(frames.pending_count(), 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_attach() {
        let empty_speed = FieldConfig { speed: 1.0..1.0, ..FieldConfig::default() };
        let result = Animator::<TestSurface>::with_rng(empty_speed, StdRng::seed_from_u64(1));
        assert_eq!(
            result.err(),
            Some(FieldConfigError::InvalidRange { field: "speed" })
        );

        let immortal = FieldConfig { life_decay: 0.0, ..FieldConfig::default() };
        let result = Animator::<TestSurface>::new(immortal);
        assert_eq!(result.err(), Some(FieldConfigError::NonPositiveDecay(0.0)));
    }

    #[test]
    fn test_default_uses_reference_config() {
        let animator = Animator::<TestSurface>::default();
        assert_eq!(animator.config(), &FieldConfig::default());
        assert!(!animator.is_attached());
    }

    #[test]
    fn test_attach_uses_validated_config() {
        let config = FieldConfig {
            batch_size: 2,
            max_particles: Some(3),
            ..FieldConfig::default()
        };
        let mut animator =
            Animator::with_rng(config.clone(), StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(animator.config(), &config);

        let mut ports = EventPorts::new();
        let mut frames = FrameQueue::new();
        animator
            .attach(TestSurface::new(10, 10), &mut ports, &mut frames)
            .unwrap();
        assert_eq!(animator.on_pointer_move(Vec2::new(1.0, 1.0)), 2);
        assert_eq!(animator.on_pointer_move(Vec2::new(2.0, 2.0)), 2);
        assert_eq!(animator.particle_count(), 3);
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", AnimatorError::AlreadyAttached);
        assert!(msg.contains("already attached"));
    }
}

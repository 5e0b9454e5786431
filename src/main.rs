//! Splash Cursor - pointer-following particle trail
//!
//! Opens a window, mounts the splash effect full-bleed and runs it until the
//! window closes.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use splash_render::{context::RenderContext, Animator, RenderError, WindowSurface};

use splash_cursor::config::AppConfig;
use splash_cursor::input::{InputAction, InputMapper};
use splash_cursor::systems::{EffectSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    effect: Option<EffectSystem>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            effect: None,
        }
    }

    /// Animator for the configured particles, falling back to defaults if invalid
    fn animator(&self) -> Animator<WindowSurface> {
        match Animator::new(self.config.particles.to_field_config()) {
            Ok(animator) => animator,
            Err(e) => {
                log::warn!("Invalid particle config: {}. Using defaults.", e);
                Animator::default()
            }
        }
    }

    fn refresh_title(&self) {
        if !self.config.debug.show_particle_count {
            return;
        }
        if let (Some(window), Some(effect)) = (&self.window, &self.effect) {
            window.update_title(effect.is_mounted(), effect.particle_count());
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(effect) = &mut self.effect {
            effect.unmount();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window_system) => window_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };
        let window = window_system.window().clone();

        // A missing GPU only disables the effect
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            self.config.window.vsync,
        )) {
            Ok(context) => Some(context),
            Err(e) => {
                log::debug!("GPU context unavailable: {}", e);
                None
            }
        };

        let surface = WindowSurface::new(window, context);
        let mut effect = EffectSystem::new(
            surface,
            self.animator(),
            self.config.rendering.background(),
        );
        if self.config.particles.enabled {
            effect.mount();
        }

        self.window = Some(window_system);
        self.effect = Some(effect);
        self.refresh_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state, event.repeat) {
                    Some(InputAction::Exit) => self.shutdown(event_loop),
                    Some(InputAction::ToggleEffect) => {
                        if let Some(effect) = &mut self.effect {
                            let mounted = effect.toggle();
                            log::info!("Splash effect {}", if mounted { "ON" } else { "OFF" });
                        }
                        self.refresh_title();
                    }
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    None => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(effect) = &mut self.effect else {
                    return;
                };
                match effect.redraw() {
                    Ok(()) => {}
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        self.shutdown(event_loop);
                        return;
                    }
                    Err(e) => log::warn!("{}", e),
                }
                self.refresh_title();
            }

            other => {
                if let Some(effect) = &mut self.effect {
                    effect.handle_window_event(&other);
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging; RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Splash Cursor");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

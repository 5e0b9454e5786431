//! Drawing surface backed by a winit window
//!
//! The animator draws into a [`CircleBatch`]; the host calls
//! [`WindowSurface::present`] after each frame to put the batch on screen.

use std::fmt;
use std::sync::Arc;

use splash_core::{Rgba, SurfaceSize};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::context::RenderContext;
use crate::pipeline::{CircleBatch, CirclePipeline, ViewportUniforms};
use crate::surface::Surface;

/// Present failure
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated; it has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

struct Gpu {
    context: RenderContext,
    pipeline: CirclePipeline,
}

/// Full-window drawing surface
///
/// Without a GPU context the surface reports no drawing context, so an
/// animator attached to it stays detached.
pub struct WindowSurface {
    window: Arc<Window>,
    gpu: Option<Gpu>,
    pixel_size: SurfaceSize,
    batch: CircleBatch,
}

impl WindowSurface {
    /// Wrap a window and (optionally) a GPU context created for it
    pub fn new(window: Arc<Window>, context: Option<RenderContext>) -> Self {
        let linear_output = context.as_ref().map_or(false, RenderContext::is_srgb);
        let gpu = context.map(|context| {
            let pipeline = CirclePipeline::new(&context.device, context.config.format);
            Gpu { context, pipeline }
        });
        let pixel_size = gpu
            .as_ref()
            .map(|gpu| SurfaceSize::new(gpu.context.config.width, gpu.context.config.height))
            .unwrap_or(SurfaceSize::ZERO);

        Self {
            window,
            gpu,
            pixel_size,
            batch: CircleBatch::new(linear_output),
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    /// Circles queued by the last frame
    pub fn batch(&self) -> &CircleBatch {
        &self.batch
    }

    /// Clear the window to `background` and draw the queued circles
    pub fn present(&mut self, background: Rgba) -> Result<(), RenderError> {
        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };
        if self.pixel_size.is_empty() {
            return Ok(());
        }

        let output = match gpu.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.pipeline.upload(
            &gpu.context.device,
            &gpu.context.queue,
            self.batch.instances(),
            ViewportUniforms::new(self.pixel_size.width, self.pixel_size.height),
        );

        let mut encoder = gpu
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Splash Encoder"),
            });

        let bg = if gpu.context.is_srgb() {
            background.to_linear()
        } else {
            background
        };
        gpu.pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: bg.r as f64,
                g: bg.g as f64,
                b: bg.b as f64,
                a: bg.a as f64,
            },
        );

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Surface for WindowSurface {
    type Context = CircleBatch;

    fn displayed_size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn pixel_size(&self) -> SurfaceSize {
        self.pixel_size
    }

    fn set_pixel_size(&mut self, size: SurfaceSize) {
        self.pixel_size = size;
        if let Some(gpu) = &mut self.gpu {
            gpu.context.resize(PhysicalSize::new(size.width, size.height));
        }
    }

    fn context(&mut self) -> Option<&mut CircleBatch> {
        if self.gpu.is_some() {
            Some(&mut self.batch)
        } else {
            None
        }
    }
}

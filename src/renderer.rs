use std::sync::Arc;

use anyhow::{anyhow, Context};
use winit::window::Window;

use crate::controller::Controller;
use crate::geometry::{GeometryBuffers, VertexColors};
use crate::math::m3;
use crate::shader::{ShaderProgram, ShaderSources};
use crate::ui;

type Result<T> = anyhow::Result<T>;

/// Draws the transformed rectangle and the slider overlay into a window.
pub struct RectRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    program: ShaderProgram,
    geometry: GeometryBuffers,
    overlay: Option<Overlay>,
}

impl RectRenderer {
    /// One-time setup: surface, device, shader program and vertex buffers.
    ///
    /// Fails if the shaders do not compile or link; nothing is drawn in that
    /// case.
    pub async fn new(
        window: Arc<Window>,
        sources: &ShaderSources,
        colors: &VertexColors,
        show_ui: bool,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &config);

        let program = ShaderProgram::build(&device, sources, config.format).await?;
        let geometry = GeometryBuffers::new(&device, colors);

        let overlay = show_ui.then(|| Overlay::new(&window, &device, config.format));

        log::info!(
            "Renderer initialized: {}x{} ({:?})",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            program,
            geometry,
            overlay,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find appropriate adapter: {:?}", e))
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Rectangle Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;

        let alpha_mode = choose_alpha_mode(&surface_caps.alpha_modes)?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    /// Matches the surface to the window's current size. Returns `false`
    /// when the window has no area and nothing should be drawn.
    pub fn resize_to_display(&mut self, size: winit::dpi::PhysicalSize<u32>) -> bool {
        if size.width == 0 || size.height == 0 {
            return false;
        }
        if size.width != self.config.width || size.height != self.config.height {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Surface resized to {}x{}", size.width, size.height);
        }
        true
    }

    /// Reconfigures the surface after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Routes a window event to the overlay.
    pub fn handle_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        match &mut self.overlay {
            Some(overlay) => overlay.state.on_window_event(window, event),
            None => egui_winit::EventResponse {
                consumed: false,
                repaint: false,
            },
        }
    }

    /// Draws one frame.
    ///
    /// Slider changes made in this frame's overlay are applied to the
    /// controller before the rectangle is drawn. Returns `true` when the
    /// overlay wants another frame right away (e.g. while animating).
    pub fn render(
        &mut self,
        window: &Window,
        controller: &mut Controller,
    ) -> std::result::Result<bool, wgpu::SurfaceError> {
        if !self.resize_to_display(window.inner_size()) {
            return Ok(false);
        }

        let canvas = window.inner_size().to_logical::<f32>(window.scale_factor());
        controller.set_canvas_size(canvas.width, canvas.height);

        let overlay_output = self
            .overlay
            .as_mut()
            .map(|overlay| overlay.run(window, controller));

        let matrix = m3::compose(canvas.width, canvas.height, controller.state());
        log::trace!("Matrix: {:?}", matrix.to_cols_array());
        self.program.set_matrix(&self.queue, &matrix);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Rectangle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.program.bind(&mut render_pass);
            self.geometry.bind(&mut render_pass);
            render_pass.draw(0..self.geometry.vertex_count(), 0..1);
        }

        let mut command_buffers = Vec::new();
        let mut wants_repaint = false;
        if let (Some(overlay), Some(full_output)) = (self.overlay.as_mut(), overlay_output) {
            wants_repaint = full_output
                .viewport_output
                .get(&egui::ViewportId::ROOT)
                .is_some_and(|viewport| viewport.repaint_delay.is_zero());
            command_buffers = overlay.paint(
                &self.device,
                &self.queue,
                &mut encoder,
                &view,
                window,
                [self.config.width, self.config.height],
                full_output,
            );
        }

        command_buffers.push(encoder.finish());
        self.queue.submit(command_buffers);
        output.present();

        Ok(wants_repaint)
    }
}

/// Prefers a mode that keeps the transparent clear color, falling back to
/// whatever the surface offers first.
fn choose_alpha_mode(supported: &[wgpu::CompositeAlphaMode]) -> Result<wgpu::CompositeAlphaMode> {
    [
        wgpu::CompositeAlphaMode::PreMultiplied,
        wgpu::CompositeAlphaMode::PostMultiplied,
    ]
    .into_iter()
    .find(|mode| supported.contains(mode))
    .or_else(|| supported.first().copied())
    .context("Surface reports no supported alpha modes")
}

/// egui state for the slider panel.
struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());
        Self {
            ctx,
            state,
            renderer,
        }
    }

    fn run(&mut self, window: &Window, controller: &mut Controller) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        self.ctx
            .run(raw_input, |ctx| ui::draw_controls(ctx, controller))
    }

    #[allow(clippy::too_many_arguments)]
    fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        size_in_pixels: [u32; 2],
        full_output: egui::FullOutput,
    ) -> Vec<wgpu::CommandBuffer> {
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.renderer
                .render(&mut render_pass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }
}

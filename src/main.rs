use std::sync::Arc;

use affine_rect::cli::Cli;
use affine_rect::config::Config;
use affine_rect::controller::Controller;
use affine_rect::geometry::{random_colors, VertexColors};
use affine_rect::renderer::RectRenderer;
use affine_rect::shader::ShaderSources;
use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

struct App {
    config: Config,
    sources: ShaderSources,
    colors: VertexColors,
    window: Option<Arc<Window>>,
    renderer: Option<RectRenderer>,
    controller: Controller,
    /// Set when setup failed; `main` turns it into the exit status.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, sources: ShaderSources) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let colors = random_colors(&mut rng);
        let controller = Controller::new(config.initial, config.width as f32, config.height as f32);

        Self {
            config,
            sources,
            colors,
            window: None,
            renderer: None,
            controller,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        match renderer.render(window, &mut self.controller) {
            Ok(wants_repaint) => {
                // The frame just drawn already reflects every pending change.
                self.controller.take_redraw();
                if wants_repaint {
                    window.request_redraw();
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
                window.request_redraw();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("Out of GPU memory"));
            }
            Err(e) => log::warn!("Frame skipped: {}", e),
        }
    }
}

/// The window is transparent so the cleared canvas shows what lies behind it.
fn window_attributes(config: &Config) -> WindowAttributes {
    Window::default_attributes()
        .with_title("Affine Rectangle")
        .with_transparent(true)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes(&self.config)) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("Failed to create window"));
                return;
            }
        };

        let renderer = match pollster::block_on(RectRenderer::new(
            window.clone(),
            &self.sources,
            &self.colors,
            self.config.show_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                self.fail(event_loop, e.context("Failed to initialize renderer"));
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.controller.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let response = renderer.handle_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.controller.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            if self.controller.take_redraw() {
                window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let sources =
        ShaderSources::with_overrides(config.vertex_shader.as_deref(), config.fragment_shader.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, sources);
    log::info!("Affine Rectangle - drag the sliders, Escape to quit");
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

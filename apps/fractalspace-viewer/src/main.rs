use anyhow::{Context, Result};
use clap::Parser;
use fractalspace_common::{AppConfig, SurfaceSize};
use fractalspace_input::{InputRouter, KeyBindings};
use fractalspace_navigation::NavigationController;
use fractalspace_render::{FrameDump, RenderLoop, ShaderSources};
use fractalspace_render_wgpu::{GpuContext, OFFSCREEN_FORMAT, OffscreenTarget, QuadRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "fractalspace-viewer", about = "Fly through a full-screen shader")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Offscreen copy of each frame for the PNG dump.
struct DumpTarget {
    target: OffscreenTarget,
    renderer: QuadRenderer,
    rgb: Vec<u8>,
}

/// GPU state that exists once the window has been created.
struct Gpu {
    window: Arc<Window>,
    context: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: QuadRenderer,
    dump_target: Option<DumpTarget>,
}

struct ViewerApp {
    config: AppConfig,
    sources: ShaderSources,
    router: InputRouter,
    navigation: NavigationController,
    render_loop: RenderLoop,
    dump: FrameDump,
    gpu: Option<Gpu>,
    startup_error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(config: AppConfig) -> Self {
        let sources = ShaderSources::load(&config.shaders);
        Self {
            router: InputRouter::new(KeyBindings::default(), &config.input),
            navigation: NavigationController::new(&config.navigation),
            render_loop: RenderLoop::new(&config),
            dump: FrameDump::new(&config.frame_dump),
            sources,
            config,
            gpu: None,
            startup_error: None,
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let size = self.config.window.surface_size();
        let attrs = Window::default_attributes()
            .with_title("fractalspace")
            .with_inner_size(PhysicalSize::new(size.width, size.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let (context, surface) =
            GpuContext::with_surface(window.clone()).context("failed to initialize GPU")?;
        let format = context.surface_format(&surface)?;
        let inner = window.inner_size();
        let surface_config = context.surface_config(&surface, format, inner.width, inner.height);
        surface.configure(&context.device, &surface_config);

        let renderer = QuadRenderer::new(&context.device, &self.sources, format);
        let dump_target = self.dump.is_enabled().then(|| {
            let target = OffscreenTarget::new(&context.device, size);
            DumpTarget {
                rgb: vec![0; target.size().pixel_count() * 3],
                renderer: QuadRenderer::new(&context.device, &self.sources, OFFSCREEN_FORMAT),
                target,
            }
        });

        tracing::info!(%size, ?format, dump = dump_target.is_some(), "viewer window ready");

        Ok(Gpu {
            window,
            context,
            surface,
            surface_config,
            renderer,
            dump_target,
        })
    }

    /// One loop iteration: sample input, move the camera, render, present.
    fn frame(&mut self) {
        let intent = self.router.sample();
        self.navigation.apply(&intent);
        self.render_loop.apply_input(&intent);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let viewport = SurfaceSize::new(gpu.surface_config.width, gpu.surface_config.height);
        let uniforms = self.render_loop.prepare(self.navigation.frame(), viewport);
        let device = &gpu.context.device;
        let queue = &gpu.context.queue;

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(device, &gpu.surface_config);
                gpu.window.request_redraw();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                gpu.window.request_redraw();
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        gpu.renderer.draw(device, queue, &view, &uniforms);

        if let Some(dump) = &mut gpu.dump_target {
            let size = dump.target.size();
            let mut dumped = uniforms;
            dumped.screen_size = [size.width as f32, size.height as f32];
            dump.renderer.draw(device, queue, dump.target.view(), &dumped);
            match dump.target.capture_into(device, queue, &mut dump.rgb) {
                Ok(()) => {
                    self.dump.write(&dump.rgb, size);
                }
                Err(e) => tracing::warn!("frame capture failed: {e}"),
            }
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.surface_config.width = new_size.width.max(1);
                    gpu.surface_config.height = new_size.height.max(1);
                    gpu.surface
                        .configure(&gpu.context.device, &gpu.surface_config);
                }
            }
            WindowEvent::Focused(false) => self.router.release_all(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.router.key(key, state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.router.cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.router.look_button(state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.router.scroll_lines(y),
                MouseScrollDelta::PixelDelta(pos) => self.router.scroll_pixels(pos.y as f32),
            },
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("fractalspace-viewer starting");

    let config = AppConfig::load(cli.config.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.startup_error.take() {
        return Err(e);
    }
    Ok(())
}

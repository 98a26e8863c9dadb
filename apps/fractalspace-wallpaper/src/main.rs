use anyhow::{Context, Result};
use clap::Parser;
use fractalspace_common::AppConfig;
use fractalspace_navigation::CameraFrame;
use fractalspace_render::{FrameDump, RenderLoop, ShaderSources};
use fractalspace_render_wgpu::{GpuContext, OFFSCREEN_FORMAT, OffscreenTarget, QuadRenderer};
use fractalspace_wallpaper::{RootSurface, WallpaperCompositor, X11RootSurface};
use rand::Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fractalspace-wallpaper",
    about = "Render a shader continuously as the X11 desktop background"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("fractalspace-wallpaper starting");

    let config = AppConfig::load(cli.config.as_deref())?;
    let surface =
        X11RootSurface::connect(&config.wallpaper).context("failed to open X11 root surface")?;
    let gpu = GpuContext::headless().context("failed to initialize GPU")?;

    let render_size = config.window.surface_size();
    let sources = ShaderSources::load(&config.shaders);
    let renderer = QuadRenderer::new(&gpu.device, &sources, OFFSCREEN_FORMAT);
    let target = OffscreenTarget::new(&gpu.device, render_size);

    let start = if config.wallpaper.random_start && config.wallpaper.random_start_max > 0.0 {
        rand::thread_rng().gen_range(0.0..config.wallpaper.random_start_max)
    } else {
        config.timing.start
    };
    let mut render_loop = RenderLoop::with_start(&config, start);
    let camera = CameraFrame::from_config(&config.navigation);
    let mut dump = FrameDump::new(&config.frame_dump);
    let mut compositor = WallpaperCompositor::new(surface, target.size(), &config.wallpaper);

    tracing::info!(
        %render_size,
        display_size = %compositor.surface().display_size(),
        start,
        "compositing wallpaper"
    );

    while frames_remaining(config.wallpaper.max_frames, render_loop.timer().frames()) {
        let uniforms = render_loop.prepare(&camera, target.size());
        renderer.draw(&gpu.device, &gpu.queue, target.view(), &uniforms);

        match target.capture_into(&gpu.device, &gpu.queue, compositor.capture_buffer_mut()) {
            Ok(()) => {
                dump.write(compositor.capture_buffer(), target.size());
                compositor.present();
            }
            Err(e) => tracing::warn!("frame capture failed: {e}"),
        }
    }

    tracing::info!(frames = render_loop.timer().frames(), "frame limit reached");
    Ok(())
}

/// Whether another frame may be rendered. `None` renders forever and
/// `Some(0)` renders nothing.
fn frames_remaining(max_frames: Option<u64>, rendered: u64) -> bool {
    max_frames.is_none_or(|max| rendered < max)
}

use crate::convert::{argb_to_bytes, rgb_to_argb_flipped};
use crate::error::WallpaperError;
use crate::scale::fit_frame;
use crate::surface::RootSurface;
use fractalspace_common::{FitMode, ScaleFilter, SurfaceSize, WallpaperConfig};

/// Turns captured frames into the published root-window wallpaper.
///
/// The capture, packed and staging buffers are allocated once for the render
/// size, and the surface pixmap is allocated once for the display size. Only
/// a resampled frame is allocated per cycle, and it is dropped before the
/// next one.
pub struct WallpaperCompositor<S: RootSurface> {
    surface: S,
    render_size: SurfaceSize,
    capture: Vec<u8>,
    argb: Vec<u32>,
    staging: Vec<u8>,
    fit: FitMode,
    filter: ScaleFilter,
    published: u64,
}

impl<S: RootSurface> WallpaperCompositor<S> {
    pub fn new(surface: S, render_size: SurfaceSize, config: &WallpaperConfig) -> Self {
        let render_size = render_size.at_least_one();
        let pixels = render_size.pixel_count();
        tracing::debug!(
            %render_size,
            display_size = %surface.display_size(),
            pixmap = surface.pixmap(),
            fit = ?config.fit,
            "wallpaper compositor created"
        );
        Self {
            surface,
            render_size,
            capture: vec![0; pixels * 3],
            argb: vec![0; pixels],
            staging: Vec::with_capacity(pixels * 4),
            fit: config.fit,
            filter: config.filter,
            published: 0,
        }
    }

    /// RGB buffer, bottom row first, that the next frame is captured into.
    pub fn capture_buffer_mut(&mut self) -> &mut [u8] {
        &mut self.capture
    }

    pub fn capture_buffer(&self) -> &[u8] {
        &self.capture
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn published(&self) -> u64 {
        self.published
    }

    /// Convert the captured frame, draw it into the surface and republish.
    pub fn publish(&mut self) -> Result<(), WallpaperError> {
        rgb_to_argb_flipped(&self.capture, self.render_size, &mut self.argb);
        argb_to_bytes(&self.argb, self.surface.byte_order(), &mut self.staging);

        let display = self.surface.display_size();
        let frame = fit_frame(&self.staging, self.render_size, display, self.fit, self.filter)?;
        self.surface.draw(&frame, display)?;
        drop(frame);

        self.surface.publish()?;
        self.published += 1;
        tracing::trace!(frame = self.published, "wallpaper published");
        Ok(())
    }

    /// [`Self::publish`], logging instead of returning a failure.
    pub fn present(&mut self) {
        if let Err(e) = self.publish() {
            tracing::warn!("wallpaper frame dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ByteOrder;

    use fractalspace_render::FrameTimer;

    struct RecordingSurface {
        size: SurfaceSize,
        pixmap: u32,
        frames: Vec<Vec<u8>>,
        published: Vec<u32>,
        fail_next_draw: bool,
    }

    impl RecordingSurface {
        fn new(size: SurfaceSize) -> Self {
            Self {
                size,
                pixmap: 0x0040_0001,
                frames: Vec::new(),
                published: Vec::new(),
                fail_next_draw: false,
            }
        }
    }

    impl RootSurface for RecordingSurface {
        fn display_size(&self) -> SurfaceSize {
            self.size
        }

        fn byte_order(&self) -> ByteOrder {
            ByteOrder::LsbFirst
        }

        fn pixmap(&self) -> u32 {
            self.pixmap
        }

        fn draw(&mut self, pixels: &[u8], size: SurfaceSize) -> Result<(), WallpaperError> {
            assert_eq!(size, self.size);
            if std::mem::take(&mut self.fail_next_draw) {
                return Err(WallpaperError::FrameSize {
                    expected: self.size,
                    actual_bytes: 0,
                });
            }
            self.frames.push(pixels.to_vec());
            Ok(())
        }

        fn publish(&mut self) -> Result<(), WallpaperError> {
            self.published.push(self.pixmap);
            Ok(())
        }
    }

    /// Stand-in for a rendered frame: a gradient that shifts with time.
    fn render_at(time: f32, rgb: &mut [u8]) {
        for (i, byte) in rgb.iter_mut().enumerate() {
            *byte = ((time * 1000.0).round() as usize + i) as u8;
        }
    }

    #[test]
    fn pixmap_is_reused_across_cycles() {
        let size = SurfaceSize::new(4, 3);
        let mut compositor =
            WallpaperCompositor::new(RecordingSurface::new(size), size, &WallpaperConfig::default());
        let mut timer = FrameTimer::new(0.0, 0.025);

        for _ in 0..50 {
            let time = timer.advance();
            render_at(time, compositor.capture_buffer_mut());
            compositor.publish().unwrap();
        }

        let surface = compositor.surface();
        let pixmap = surface.pixmap();
        assert_eq!(surface.published.len(), 50);
        assert!(surface.published.iter().all(|&p| p == pixmap));
        assert!(surface.frames.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(compositor.published(), 50);
    }

    #[test]
    fn failed_frame_is_skipped_and_next_one_publishes() {
        let size = SurfaceSize::new(2, 2);
        let mut compositor =
            WallpaperCompositor::new(RecordingSurface::new(size), size, &WallpaperConfig::default());

        compositor.present();
        compositor.surface.fail_next_draw = true;
        compositor.present();
        compositor.present();

        let surface = compositor.surface();
        assert_eq!(compositor.published(), 2);
        assert_eq!(surface.frames.len(), 2);
        assert_eq!(surface.published, [surface.pixmap(), surface.pixmap()]);
    }

    #[test]
    fn frame_reaches_surface_top_row_first() {
        let size = SurfaceSize::new(1, 2);
        let mut compositor =
            WallpaperCompositor::new(RecordingSurface::new(size), size, &WallpaperConfig::default());
        // bottom row red, top row blue
        compositor
            .capture_buffer_mut()
            .copy_from_slice(&[0xFF, 0, 0, 0, 0, 0xFF]);
        compositor.publish().unwrap();

        let frame = &compositor.surface().frames[0];
        // top row blue, then red; little-endian words
        assert_eq!(frame, &[0xFF, 0, 0, 0xFF, 0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn frames_are_scaled_to_display() {
        let render = SurfaceSize::new(16, 9);
        let display = SurfaceSize::new(8, 8);
        let config = WallpaperConfig {
            fit: FitMode::Fill,
            filter: ScaleFilter::Nearest,
            ..Default::default()
        };
        let mut compositor = WallpaperCompositor::new(RecordingSurface::new(display), render, &config);
        compositor.capture_buffer_mut().fill(0x80);
        compositor.present();

        let frame = &compositor.surface().frames[0];
        assert_eq!(frame.len(), display.pixel_count() * 4);
        assert!(frame.chunks_exact(4).all(|px| px == [0x80, 0x80, 0x80, 0xFF]));
    }

    #[test]
    fn capture_buffer_matches_render_size() {
        let compositor = WallpaperCompositor::new(
            RecordingSurface::new(SurfaceSize::new(2, 2)),
            SurfaceSize::new(16, 9),
            &WallpaperConfig::default(),
        );
        assert_eq!(compositor.capture_buffer().len(), 16 * 9 * 3);
    }
}

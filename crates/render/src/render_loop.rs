use fractalspace_common::{AppConfig, SurfaceSize};
use fractalspace_input::InputIntent;
use fractalspace_navigation::CameraFrame;

use crate::legacy::LegacyView;
use crate::timer::FrameTimer;
use crate::uniforms::Uniforms;

/// Per-iteration render state: the fixed-step clock and the legacy 2D view.
///
/// The camera is owned elsewhere and passed in by reference each frame.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    timer: FrameTimer,
    legacy: LegacyView,
}

impl RenderLoop {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_start(config, config.timing.start)
    }

    pub fn with_start(config: &AppConfig, start: f32) -> Self {
        Self {
            timer: FrameTimer::new(start, config.timing.step),
            legacy: LegacyView::new(config.input.zoom_sensitivity),
        }
    }

    /// Fold this frame's pan/zoom input into the legacy view.
    pub fn apply_input(&mut self, intent: &InputIntent) {
        self.legacy.apply(intent);
    }

    /// Advance the clock and pack the uniform block for this frame.
    pub fn prepare(&mut self, camera: &CameraFrame, viewport: SurfaceSize) -> Uniforms {
        let time = self.timer.advance();
        Uniforms::new(viewport, camera, &self.legacy, time)
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn prepare_advances_time_each_frame() {
        let config = AppConfig::default();
        let mut rl = RenderLoop::new(&config);
        let camera = CameraFrame::default();
        let size = SurfaceSize::new(64, 36);

        let first = rl.prepare(&camera, size);
        let second = rl.prepare(&camera, size);
        assert_eq!(first.time, config.timing.step);
        assert!((second.time - 2.0 * config.timing.step).abs() < 1e-7);
        assert_eq!(rl.timer().frames(), 2);
    }

    #[test]
    fn legacy_input_reaches_uniforms() {
        let config = AppConfig::default();
        let mut rl = RenderLoop::with_start(&config, 10.0);
        rl.apply_input(&InputIntent {
            cursor_delta: Vec2::new(4.0, 2.0),
            scroll: 1.0,
            ..InputIntent::default()
        });
        let u = rl.prepare(&CameraFrame::default(), SurfaceSize::new(8, 8));
        assert_eq!(u.offset, [4.0, 2.0]);
        assert_eq!(u.zoom, 0.75);
        assert!(u.time > 10.0);
    }
}

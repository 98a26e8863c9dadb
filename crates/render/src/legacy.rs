use fractalspace_input::InputIntent;
use glam::Vec2;

/// 2D pan/zoom state for shaders that still read `offset` and `zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyView {
    pub offset: Vec2,
    pub zoom: f32,
    zoom_sensitivity: f32,
}

impl LegacyView {
    pub fn new(zoom_sensitivity: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            zoom_sensitivity,
        }
    }

    /// Drag pans by the cursor delta scaled by the current zoom; scrolling
    /// away from the user zooms in.
    pub fn apply(&mut self, intent: &InputIntent) {
        self.offset += intent.cursor_delta * self.zoom;
        self.zoom -= intent.scroll * self.zoom_sensitivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_scales_with_zoom() {
        let mut view = LegacyView::new(0.25);
        view.zoom = 2.0;
        view.apply(&InputIntent {
            cursor_delta: Vec2::new(3.0, -1.0),
            ..InputIntent::default()
        });
        assert_eq!(view.offset, Vec2::new(6.0, -2.0));
    }

    #[test]
    fn scroll_adjusts_zoom() {
        let mut view = LegacyView::new(0.25);
        view.apply(&InputIntent {
            scroll: 2.0,
            ..InputIntent::default()
        });
        assert_eq!(view.zoom, 0.5);
    }
}

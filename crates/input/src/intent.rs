use glam::Vec2;
use std::collections::HashSet;

/// A movement direction relative to the camera's own axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Everything the navigation layer needs from one frame of input.
///
/// Rebuilt by [`crate::InputRouter::sample`] every frame and discarded after
/// it has been applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputIntent {
    /// Movement keys held at sample time.
    pub moves: HashSet<MoveKey>,
    /// Cursor travel in pixels since the previous sample, zero when not dragging.
    pub cursor_delta: Vec2,
    /// Reinterpret horizontal cursor travel as roll.
    pub roll: bool,
    /// Scroll travel in lines since the previous sample (positive = away from user).
    pub scroll: f32,
}

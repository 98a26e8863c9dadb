use crate::camera::CameraFrame;
use fractalspace_common::NavigationConfig;
use fractalspace_input::{InputIntent, MoveKey};
use glam::{Mat3, Vec3};
use std::collections::HashSet;

/// Owns the camera pose and applies per-frame intents to it.
#[derive(Debug, Clone)]
pub struct NavigationController {
    frame: CameraFrame,
    renormalize_every: u32,
    since_renormalize: u32,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}

impl NavigationController {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            frame: CameraFrame::from_config(config),
            renormalize_every: config.renormalize_every.max(1),
            since_renormalize: 0,
        }
    }

    pub fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    /// Apply one frame of input: rotation first, then movement.
    pub fn apply(&mut self, intent: &InputIntent) {
        self.apply_rotation(intent.cursor_delta.x, intent.cursor_delta.y, intent.roll);
        self.apply_movement(&intent.moves);
    }

    /// Rotate about the camera's own axes by a cursor delta in pixels.
    ///
    /// Without the roll modifier: pitch about the right axis by `-dy`, then
    /// yaw about the up axis by `-dx`. With it: roll about the view axis by
    /// `+dx`. All axes are taken from the orientation before this call.
    pub fn apply_rotation(&mut self, dx: f32, dy: f32, roll: bool) {
        let s = self.frame.angular_speed;
        let m = self.frame.orientation;

        self.frame.orientation = if roll {
            let roll = Mat3::from_axis_angle(m.z_axis.normalize(), dx * s);
            roll * m
        } else {
            let pitch = Mat3::from_axis_angle(m.x_axis.normalize(), -dy * s);
            let yaw = Mat3::from_axis_angle(m.y_axis.normalize(), -dx * s);
            yaw * (pitch * m)
        };

        self.since_renormalize += 1;
        if self.since_renormalize >= self.renormalize_every {
            tracing::trace!(
                drift = self.frame.orthonormality_error(),
                "renormalizing camera frame"
            );
            self.frame.renormalize();
            self.since_renormalize = 0;
        }
    }

    /// Translate by `linear_speed` along the current axis of every held key.
    pub fn apply_movement(&mut self, moves: &HashSet<MoveKey>) {
        let speed = self.frame.linear_speed;
        let mut step = Vec3::ZERO;
        for key in moves {
            step += match key {
                MoveKey::Forward => self.frame.forward(),
                MoveKey::Backward => -self.frame.forward(),
                MoveKey::Left => -self.frame.right(),
                MoveKey::Right => self.frame.right(),
                MoveKey::Up => self.frame.up(),
                MoveKey::Down => -self.frame.up(),
            } * speed;
        }
        self.frame.position += step;
    }
}

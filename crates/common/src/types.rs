use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a render surface or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `aspect_width * scale` by `aspect_height * scale`, or `None` when
    /// either dimension overflows.
    pub fn from_aspect(aspect_width: u32, aspect_height: u32, scale: u32) -> Option<Self> {
        Some(Self {
            width: aspect_width.checked_mul(scale)?,
            height: aspect_height.checked_mul(scale)?,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size clamped to at least 1x1, for GPU resources that reject zero extents.
    pub fn at_least_one(&self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

use bytemuck::{Pod, Zeroable};
use fractalspace_common::SurfaceSize;
use fractalspace_navigation::CameraFrame;

use crate::legacy::LegacyView;

/// Two triangles covering clip space, `(x, y)` per vertex.
#[rustfmt::skip]
pub const QUAD_VERTICES: [[f32; 2]; 6] = [
    [-1.0,  1.0], [-1.0, -1.0], [ 1.0, -1.0],
    [-1.0,  1.0], [ 1.0, -1.0], [ 1.0,  1.0],
];

/// Uniform block shared with the shaders.
///
/// Mirrors this WGSL declaration (96 bytes, uniform address space):
/// ```wgsl
/// struct Uniforms {
///     screen_size: vec2<f32>,
///     offset: vec2<f32>,
///     position: vec3<f32>,
///     time: f32,
///     rotation: mat3x3<f32>,
///     direction: vec3<f32>,
///     zoom: f32,
/// };
/// ```
/// `mat3x3` columns are padded to 16 bytes, hence `[[f32; 4]; 3]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub screen_size: [f32; 2],
    pub offset: [f32; 2],
    pub position: [f32; 3],
    pub time: f32,
    pub rotation: [[f32; 4]; 3],
    pub direction: [f32; 3],
    pub zoom: f32,
}

impl Uniforms {
    pub fn new(viewport: SurfaceSize, camera: &CameraFrame, legacy: &LegacyView, time: f32) -> Self {
        let m = camera.orientation;
        Self {
            screen_size: viewport.as_vec2().to_array(),
            offset: legacy.offset.to_array(),
            position: camera.position.to_array(),
            time,
            rotation: [
                m.x_axis.extend(0.0).to_array(),
                m.y_axis.extend(0.0).to_array(),
                m.z_axis.extend(0.0).to_array(),
            ],
            direction: camera.forward().to_array(),
            zoom: legacy.zoom,
        }
    }
}

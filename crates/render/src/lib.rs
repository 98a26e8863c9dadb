//! Render loop state that does not touch the GPU.
//!
//! One iteration advances the fixed-step timer, folds the legacy pan/zoom
//! input in, and packs the camera into the [`Uniforms`] block the shader
//! reads. The backend only uploads that block and draws the quad.
//!
//! # Invariants
//! - Simulation time advances by a constant step per frame, never wall-clock.
//! - The render loop reads the camera; it never mutates it.
//! - [`Uniforms`] is byte-compatible with the WGSL `Uniforms` struct.

mod dump;
mod legacy;
mod render_loop;
mod shader;
mod timer;
mod uniforms;

pub use dump::FrameDump;
pub use legacy::LegacyView;
pub use render_loop::RenderLoop;
pub use shader::ShaderSources;
pub use timer::FrameTimer;
pub use uniforms::{QUAD_VERTICES, Uniforms};

//! wgpu render backend.
//!
//! Draws the fixed full-viewport quad with the user's vertex/fragment pair
//! and, for the wallpaper and frame-dump paths, renders offscreen and reads
//! the frame back into a CPU buffer.
//!
//! # Invariants
//! - Shader compile and pipeline errors are logged, never fatal; the loop
//!   keeps drawing with whatever pipeline resulted.
//! - Validation errors after startup go to the log instead of panicking.
//! - Captured frames are RGB, rows bottom-to-top.

mod capture;
mod context;
mod gpu;
mod program;

pub use capture::{CaptureError, OFFSCREEN_FORMAT, OffscreenTarget};
pub use context::{GpuContext, GpuError};
pub use gpu::QuadRenderer;

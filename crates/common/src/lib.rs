//! Shared types for fractalspace: surface sizing and the typed configuration
//! every crate reads its knobs from.
//!
//! # Invariants
//! - Every config field has a default; a partial config file only overrides
//!   what it names.
//! - Window dimensions come from aspect-ratio constants times a scale factor,
//!   never from free-form width/height.

pub mod config;
pub mod types;

pub use config::{
    AppConfig, ConfigError, FitMode, FrameDumpConfig, InputConfig, NavigationConfig, ScaleFilter,
    ShaderConfig, TimingConfig, WallpaperConfig, WindowConfig,
};
pub use types::SurfaceSize;

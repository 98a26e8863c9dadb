//! Typed application configuration.
//!
//! Loaded from an optional JSON file. Every struct is `#[serde(default)]`, so
//! `{"navigation": {"linear_speed": 0.1}}` is a complete, valid file.

use crate::types::SurfaceSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Top-level configuration shared by the viewer and the wallpaper compositor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shaders: ShaderConfig,
    pub navigation: NavigationConfig,
    pub input: InputConfig,
    pub timing: TimingConfig,
    pub frame_dump: FrameDumpConfig,
    pub wallpaper: WallpaperConfig,
}

impl AppConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Reject values that would make the loop degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        let size = SurfaceSize::from_aspect(window.aspect_width, window.aspect_height, window.scale)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "window size {}x{} times {} overflows",
                    window.aspect_width, window.aspect_height, window.scale
                ))
            })?;
        if size.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "window size {size} has a zero dimension"
            )));
        }
        if !self.timing.step.is_finite() || !self.timing.start.is_finite() {
            return Err(ConfigError::Invalid("timing values must be finite".into()));
        }
        let max = self.wallpaper.random_start_max;
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "wallpaper.random_start_max must be finite and non-negative, got {max}"
            )));
        }
        Ok(())
    }
}

/// Window sizing: fixed aspect ratio times a per-deployment scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub aspect_width: u32,
    pub aspect_height: u32,
    pub scale: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            aspect_width: 16,
            aspect_height: 9,
            scale: 120,
        }
    }
}

impl WindowConfig {
    /// Saturates on overflow; [`AppConfig::validate`] rejects such sizes.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.aspect_width.saturating_mul(self.scale),
            self.aspect_height.saturating_mul(self.scale),
        )
    }
}

/// Paths of the vertex and fragment WGSL sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/vertex.wgsl"),
            fragment: PathBuf::from("shaders/fragment.wgsl"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance travelled per frame per held movement key.
    pub linear_speed: f32,
    /// Radians of rotation per pixel of cursor travel.
    pub angular_speed: f32,
    /// Re-orthonormalize after this many rotation updates. 0 is treated as 1.
    pub renormalize_every: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            linear_speed: 0.05,
            angular_speed: 0.001,
            renormalize_every: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Zoom change per scroll line in the legacy 2D view.
    pub zoom_sensitivity: f32,
    /// Pixels per scroll line when the platform reports pixel deltas.
    pub pixels_per_line: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            zoom_sensitivity: 0.25,
            pixels_per_line: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Simulation time added per loop iteration.
    pub step: f32,
    /// Simulation time before the first iteration.
    pub start: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step: 0.025,
            start: 0.0,
        }
    }
}

/// Sequential PNG dump of captured frames. Off unless enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDumpConfig {
    pub enabled: bool,
    pub directory: PathBuf,
}

impl Default for FrameDumpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("images"),
        }
    }
}

/// How the rendered frame is mapped onto the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Scale the whole frame to the display, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Centre-crop the frame to the display aspect ratio, then scale.
    Fill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Lanczos3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperConfig {
    pub fit: FitMode,
    pub filter: ScaleFilter,
    /// Start simulation time at a random point in `[0, random_start_max)`.
    pub random_start: bool,
    pub random_start_max: f32,
    /// Also set the root window background and clear it each publish.
    pub set_root_background: bool,
    /// Keep the pixmap alive on the server after the process exits.
    pub retain_permanent: bool,
    /// Stop after this many frames. Runs forever when unset.
    pub max_frames: Option<u64>,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            fit: FitMode::Stretch,
            filter: ScaleFilter::Triangle,
            random_start: true,
            random_start_max: 100.0,
            set_root_background: false,
            retain_permanent: false,
            max_frames: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_constants() {
        let config = AppConfig::default();
        assert_eq!(config.window.surface_size(), SurfaceSize::new(1920, 1080));
        assert_eq!(config.navigation.linear_speed, 0.05);
        assert_eq!(config.navigation.angular_speed, 0.001);
        assert_eq!(config.timing.step, 0.025);
        assert!(!config.frame_dump.enabled);
        assert_eq!(config.frame_dump.directory, PathBuf::from("images"));
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = AppConfig::from_json(
            r#"{"navigation": {"linear_speed": 0.5}, "wallpaper": {"fit": "fill", "filter": "lanczos3"}}"#,
        )
        .unwrap();
        assert_eq!(config.navigation.linear_speed, 0.5);
        assert_eq!(config.navigation.angular_speed, 0.001);
        assert_eq!(config.wallpaper.fit, FitMode::Fill);
        assert_eq!(config.wallpaper.filter, ScaleFilter::Lanczos3);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window": {{"scale": 60}}, "frame_dump": {{"enabled": true}}}}"#).unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.window.surface_size(), SurfaceSize::new(960, 540));
        assert!(config.frame_dump.enabled);
    }

    #[test]
    fn load_rejects_zero_scale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window": {{"scale": 0}}}}"#).unwrap();
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn overflowing_window_scale_is_invalid() {
        let config = AppConfig::from_json(r#"{"window": {"scale": 300000000}}"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn infinite_random_start_is_invalid() {
        // 1e39 is out of f32 range and parses to infinity.
        let config = AppConfig::from_json(r#"{"wallpaper": {"random_start_max": 1e39}}"#).unwrap();
        assert!(config.wallpaper.random_start_max.is_infinite());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig::from_json(r#"{"wallpaper": {"random_start_max": -5.0}}"#).unwrap();
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/fractalspace.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

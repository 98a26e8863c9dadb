use fractalspace_common::{FrameDumpConfig, SurfaceSize};
use std::path::{Path, PathBuf};

/// Writes captured frames as `00000.png`, `00001.png`, ... into one
/// directory that is wiped at startup.
#[derive(Debug)]
pub struct FrameDump {
    directory: PathBuf,
    enabled: bool,
    next: u64,
}

impl FrameDump {
    pub fn new(config: &FrameDumpConfig) -> Self {
        if config.enabled {
            recreate_dir(&config.directory);
        }
        Self {
            directory: config.directory.clone(),
            enabled: config.enabled,
            next: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn file_name(index: u64) -> String {
        format!("{index:05}.png")
    }

    /// Write one RGB frame whose rows run bottom-to-top. Every call consumes
    /// one frame number; a failed write is logged and skipped.
    pub fn write(&mut self, rgb: &[u8], size: SurfaceSize) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let path = self.directory.join(Self::file_name(self.next));
        self.next += 1;

        let stride = size.width as usize * 3;
        if stride == 0 || rgb.len() != stride * size.height as usize {
            tracing::warn!(
                path = %path.display(),
                len = rgb.len(),
                %size,
                "frame buffer does not match frame size; skipping dump"
            );
            return None;
        }
        let top_down: Vec<u8> = rgb.chunks_exact(stride).rev().flatten().copied().collect();
        let image = image::RgbImage::from_raw(size.width, size.height, top_down)?;

        match image.save(&path) {
            Ok(()) => Some(path),
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to write frame: {e}");
                None
            }
        }
    }
}

fn recreate_dir(directory: &Path) {
    if directory.exists() {
        if let Err(e) = std::fs::remove_dir_all(directory) {
            tracing::warn!(dir = %directory.display(), "failed to clear frame directory: {e}");
        }
    }
    match std::fs::create_dir_all(directory) {
        Ok(()) => tracing::info!(dir = %directory.display(), "frame dump directory ready"),
        Err(e) => tracing::error!(dir = %directory.display(), "failed to create frame directory: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> FrameDumpConfig {
        FrameDumpConfig {
            enabled: true,
            directory: dir.join("images"),
        }
    }

    #[test]
    fn disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = FrameDump::new(&FrameDumpConfig {
            enabled: false,
            directory: dir.path().join("images"),
        });
        assert!(dump.write(&[0; 12], SurfaceSize::new(2, 2)).is_none());
        assert!(!dir.path().join("images").exists());
    }

    #[test]
    fn startup_wipes_previous_frames() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("stale.png"), b"old").unwrap();

        let dump = FrameDump::new(&config(dir.path()));
        assert!(dump.is_enabled());
        assert!(images.exists());
        assert!(!images.join("stale.png").exists());
    }

    #[test]
    fn frames_are_numbered_without_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = FrameDump::new(&config(dir.path()));
        let size = SurfaceSize::new(2, 2);
        for i in 0..3u8 {
            dump.write(&[i; 12], size).unwrap();
        }

        let mut names: Vec<String> = std::fs::read_dir(dir.path().join("images"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["00000.png", "00001.png", "00002.png"]);
    }

    #[test]
    fn rows_are_written_top_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = FrameDump::new(&config(dir.path()));
        // Bottom row red, top row blue.
        let rgb = [255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255];
        let path = dump.write(&rgb, SurfaceSize::new(2, 2)).unwrap();

        let image = image::open(path).unwrap().to_rgb8();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0]);
    }

    #[test]
    fn mismatched_buffer_still_consumes_a_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = FrameDump::new(&config(dir.path()));
        assert!(dump.write(&[0; 5], SurfaceSize::new(2, 2)).is_none());
        let path = dump.write(&[0; 12], SurfaceSize::new(2, 2)).unwrap();
        assert!(path.ends_with("00001.png"));
    }

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(FrameDump::file_name(0), "00000.png");
        assert_eq!(FrameDump::file_name(42), "00042.png");
    }
}

use fractalspace_common::ShaderConfig;
use std::path::Path;

/// Vertex and fragment shader text, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Read both sources. A file that cannot be read becomes an empty
    /// string; compilation will then report the problem.
    pub fn load(config: &ShaderConfig) -> Self {
        Self {
            vertex: read_or_empty(&config.vertex),
            fragment: read_or_empty(&config.fragment),
        }
    }
}

fn read_or_empty(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            tracing::debug!(path = %path.display(), bytes = source.len(), "read shader source");
            source
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read shader source: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let vertex = dir.path().join("vertex.wgsl");
        std::fs::write(&vertex, "@vertex fn vs_main() {}").unwrap();

        let sources = ShaderSources::load(&ShaderConfig {
            vertex,
            fragment: dir.path().join("missing.wgsl"),
        });
        assert_eq!(sources.vertex, "@vertex fn vs_main() {}");
        assert!(sources.fragment.is_empty());
    }
}

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "tilemap-editor.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Startup settings. Every field may be omitted from the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub default_map_width: u32,
    pub default_map_height: u32,
    pub max_map_dimension: u32,
    pub palette_width: u32,
    pub redraw_interval_ms: u64,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            default_map_width: 48,
            default_map_height: 48,
            max_map_dimension: 1024,
            palette_width: 320,
            redraw_interval_ms: 16,
            font_path: None,
            font_size: 16.0,
        }
    }
}

impl EditorConfig {
    /// Reads [`CONFIG_FILE`] from the working directory, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.redraw_interval_ms == 0 {
            return Err(ConfigError::Invalid("redraw_interval_ms must be positive".to_string()));
        }
        if self.max_map_dimension == 0 {
            return Err(ConfigError::Invalid("max_map_dimension must be positive".to_string()));
        }
        for (name, value) in [
            ("default_map_width", self.default_map_width),
            ("default_map_height", self.default_map_height),
        ] {
            if value == 0 || value > self.max_map_dimension {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between 1 and {}",
                    name, self.max_map_dimension
                )));
            }
        }
        if !(6.0..=72.0).contains(&self.font_size) {
            return Err(ConfigError::Invalid("font_size must be between 6 and 72".to_string()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid("window size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn redraw_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.redraw_interval_ms)
    }
}

//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! The `#[derive(Serialize, Deserialize)]` macro generates code to
//! convert structs to/from TOML. `#[serde(default)]` uses
//! `Default::default()` for missing fields, making configs
//! backward-compatible.

use linea_buffer::BufferConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Buffer limit settings
    pub editor: EditorConfig,
}

/// Buffer limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of lines the buffer may hold
    pub max_lines: usize,

    /// Undo/redo history depth
    pub undo_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_lines: linea_buffer::DEFAULT_MAX_LINES,
            undo_depth: linea_buffer::DEFAULT_UNDO_DEPTH,
        }
    }
}

impl Config {
    /// Loads config from the default location, falling back to defaults
    /// if no file exists or it cannot be read.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("linea").join("config.toml"))
    }

    /// Translates the editor settings into a buffer configuration.
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            max_lines: self.editor.max_lines,
            undo_depth: self.editor.undo_depth,
        }
    }
}

/// Errors that can occur loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

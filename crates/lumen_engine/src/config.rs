//! Configuration system
//!
//! Construction-time settings for the game and its window, with file
//! loading in TOML and RON formats and fail-fast validation. Invalid
//! window dimensions are an error, never a silent clamp.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Configuration trait
///
/// Implemented by serde-derived settings structs to add file loading and
/// saving. The format is chosen by file extension: `.toml` or `.ron`.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => {
                let contents = std::fs::read_to_string(path)?;
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game title, also used as the window title
    pub title: String,

    /// Window configuration
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Lumen Application".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl Config for GameConfig {}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Whether to start in fullscreen
    pub fullscreen: bool,

    /// VSync setting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen Application".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl WindowConfig {
    /// Validate the configuration, failing fast on unusable values
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Errors raised when the game or scene is assembled inconsistently
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Window dimensions must be positive
    #[error("window dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested window width
        width: u32,
        /// Requested window height
        height: u32,
    },

    /// A single-instance component type appeared on a second entity
    #[error("scene already holds a {component} component, which allows a single instance")]
    DuplicateUnique {
        /// Name of the single-instance component type
        component: &'static str,
    },

    /// The rendering pipeline started without a camera entity
    #[error("a camera entity must be added before the game starts")]
    MissingCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.window.validate().is_ok());
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!(!config.window.fullscreen);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = WindowConfig { width: 0, height: 720, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidDimensions { width: 0, height: 720 })
        );
    }

    #[test]
    fn test_aspect_ratio() {
        let config = WindowConfig { width: 1600, height: 900, ..Default::default() };
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");

        let mut config = GameConfig::default();
        config.title = "Roundtrip".to_string();
        config.window.width = 640;
        config.save_to_file(&path).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.title, "Roundtrip");
        assert_eq!(loaded.window.width, 640);
    }

    #[test]
    fn test_ron_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");

        let config = GameConfig::default();
        config.save_to_file(&path).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.window.height, config.window.height);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = GameConfig::load_from_file("settings.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}

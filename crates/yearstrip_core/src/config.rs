//! Editor configuration.
//!
//! Loaded from an optional TOML file. Every field has a default, so a
//! partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

/// Tunables for editor behavior that are not part of the coordinate model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pixels scrolled per wheel notch.
    pub wheel_step_px: i64,
    /// Length of a season bar placed by a click.
    pub default_season_days: i64,
    /// Width of a textbox placed by a click.
    pub default_text_days: i64,
    pub default_text_rows: i64,
    pub default_color: String,
    pub default_season_title: String,
    /// Visible scene height in pixels; rows below it are clamped.
    pub scene_height: i64,
    /// Whether month and solstice marks are laid into new scenes.
    pub background_marks: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wheel_step_px: 5,
            default_season_days: 30,
            default_text_days: 30,
            default_text_rows: 1,
            default_color: "#3a7bd5".to_string(),
            default_season_title: "New season".to_string(),
            scene_height: 400,
            background_marks: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read editor config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse editor config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Loads the config at `path`, or defaults when the file does not exist.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `Parse` when the file is not valid TOML for `EditorConfig`.
pub fn load_config(path: impl AsRef<Path>) -> Result<EditorConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(EditorConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses config file contents.
pub fn parse_config(contents: &str) -> Result<EditorConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::{load_config, parse_config, ConfigError, EditorConfig};

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config("wheel_step_px = 40\nbackground_marks = false\n").unwrap();
        assert_eq!(config.wheel_step_px, 40);
        assert!(!config.background_marks);
        assert_eq!(config.default_season_days, 30);
        assert_eq!(config.default_color, "#3a7bd5");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        std::fs::write(&path, "wheel_step_px = \"fast\"").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::selection::ObjectDefaults;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "classicyou.toml";

/// Top-level editor configuration loaded from `classicyou.toml`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub editor: EditorSettings,
    pub defaults: ObjectDefaults,
}

/// General editor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub levels_directory: PathBuf,
    /// Wall hit-test tolerance in drawing units.
    pub select_distance: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            levels_directory: PathBuf::from("levels"),
            select_distance: 10.0,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load an editor config from a TOML file.
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the editor config, falling back to defaults if it is missing or
/// invalid.
pub fn load_or_default(path: &Path) -> EditorConfig {
    match load_config(path) {
        Ok(config) => {
            log::info!("Loaded editor config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("No editor config ({e}), using defaults");
            EditorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::platform::PlatformStyle;
    use crate::level::texture::Colour;

    #[test]
    fn parses_partial_config() {
        let config: EditorConfig = toml::from_str(
            r#"
            [editor]
            select_distance = 6.0

            [defaults.wall]
            wall_height = 1.5
            texture_front = { id = 4, colour = [255, 0, 0, 255] }

            [defaults.platform]
            style = "diamond"
            "#,
        )
        .unwrap();
        assert_eq!(config.editor.select_distance, 6.0);
        assert_eq!(config.editor.levels_directory, PathBuf::from("levels"));
        let wall = config.defaults.wall_default;
        assert_eq!(wall.wall_height, 1.5);
        assert_eq!(wall.texture_front.id, 4);
        assert_eq!(wall.texture_front.colour, Colour::new(255, 0, 0, 255));
        assert_eq!(wall.base_height, 0.0);
        assert_eq!(config.defaults.platform_default.style, PlatformStyle::Diamond);
    }

    #[test]
    fn empty_config_is_default() {
        let config: EditorConfig = toml::from_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn missing_file_falls_back() {
        let config = load_or_default(Path::new("/nonexistent/classicyou.toml"));
        assert_eq!(config, EditorConfig::default());
        assert!(matches!(
            load_config(Path::new("/nonexistent/classicyou.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = std::env::temp_dir().join(format!("classicyou-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "[editor\nselect_distance = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml { .. })));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

// Loading of kleurplaat.toml

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::CellSize;
use super::persistence::DEFAULT_EXPORT_FILE;

pub const CONFIG_FILE: &str = "kleurplaat.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Toml(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read from `kleurplaat.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cell_width: u16,
    pub cell_height: u16,
    /// Initial paint color, as the color picker would report it.
    pub paint_color: String,
    pub export_file: String,
    pub log_file: String,
    pub palette: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let size = CellSize::default();
        Self {
            cell_width: size.width,
            cell_height: size.height,
            paint_color: "#000000".to_string(),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
            log_file: "kleurplaat.log".to_string(),
            palette: [
                "#000000", "#ffffff", "#ff0000", "#ff8800", "#ffff00",
                "#00ff00", "#00ffff", "#0000ff", "#ff00ff",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Loads `kleurplaat.toml` from the working directory, falling back to
    /// defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("cell_width = 4\npaint_color = \"#ff0000\"\n").unwrap();
        assert_eq!(config.cell_width, 4);
        assert_eq!(config.cell_height, 1);
        assert_eq!(config.paint_color, "#ff0000");
        assert_eq!(config.export_file, "kleurplaat.json");
        assert_eq!(config.palette.len(), 9);
    }

    #[test]
    fn test_palette_override() {
        let config = Config::parse("palette = [\"red\", \"#00ff00\"]").unwrap();
        assert_eq!(config.palette, vec!["red".to_string(), "#00ff00".to_string()]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(Config::parse("cell_width = \"wide\""), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_cell_size_is_clamped() {
        let config = Config::parse("cell_width = 0\ncell_height = 0").unwrap();
        assert_eq!(config.cell_size(), CellSize::new(1, 1));
    }
}

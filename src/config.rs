//! Analysis configuration.
//!
//! Defaults can be overridden by a JSON file and then by command-line flags.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT: &str = "data.csv";
pub const DEFAULT_COLUMN: &str = "CO2 Emissions(g/km)";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What happens with the corner plot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CornerMode {
    /// Interactive window.
    #[default]
    Window,
    /// Render to a PNG file instead of a window.
    Save(PathBuf),
    Off,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// CSV file to analyse.
    pub input: PathBuf,
    /// Column to analyse and plot.
    pub column: String,
    /// Directory the three chart images are written to.
    pub output_dir: PathBuf,
    pub corner: CornerMode,
    /// Prompt on stdin when `column` does not exist.
    pub interactive: bool,
    /// Open written charts with the system image viewer.
    pub open_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            column: DEFAULT_COLUMN.to_string(),
            output_dir: PathBuf::from("."),
            corner: CornerMode::Window,
            interactive: true,
            open_charts: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_vehicle_dataset() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input, PathBuf::from("data.csv"));
        assert_eq!(config.column, "CO2 Emissions(g/km)");
        assert_eq!(config.corner, CornerMode::Window);
        assert!(config.interactive);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(
            r#"{ "column": "Engine Size(L)", "corner": { "save": "corner.png" } }"#,
            Path::new("cfg.json"),
        )
        .unwrap();
        assert_eq!(config.column, "Engine Size(L)");
        assert_eq!(config.corner, CornerMode::Save(PathBuf::from("corner.png")));
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn corner_off_and_unknown_fields() {
        let config =
            AnalysisConfig::from_json(r#"{ "corner": "off" }"#, Path::new("cfg.json")).unwrap();
        assert_eq!(config.corner, CornerMode::Off);

        let err = AnalysisConfig::from_json(r#"{ "colum": "x" }"#, Path::new("cfg.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid config cfg.json"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AnalysisConfig::from_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

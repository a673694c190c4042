//! Configuration for the shapeyard binaries.
//!
//! A configuration names the data directory, the files to ingest from it, and the
//! format reports are printed in. Every field has a default, so an empty document is a
//! valid configuration.
//!
//! ```rust
//! use shapeyard::Config;
//! use shapeyard::cli_utils::OutputFormat;
//!
//! let config = Config::from_content("shapeyard.yaml", "data_dir: fixtures\noutput: yaml\n").unwrap();
//! assert_eq!(config.data_dir, "fixtures");
//! assert_eq!(config.triangles_file, "triangles.txt");
//! assert_eq!(config.output, OutputFormat::Yaml);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::cli_utils::OutputFormat;

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_triangles_file() -> String {
    "triangles.txt".to_string()
}

fn default_spheres_file() -> String {
    "spheres.txt".to_string()
}

/// Where to read shapes from and how to report them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory the input files are resolved against.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Triangle records, three lines each.
    #[serde(default = "default_triangles_file")]
    pub triangles_file: String,
    /// Sphere records, one line each.
    #[serde(default = "default_spheres_file")]
    pub spheres_file: String,
    /// Report format.
    #[serde(default)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            triangles_file: default_triangles_file(),
            spheres_file: default_spheres_file(),
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_content(&path.to_string_lossy(), &content)
    }

    /// Parses `content` as JSON or YAML.
    ///
    /// The format follows the extension of `file_path`; any other extension tries JSON
    /// and then YAML.
    pub fn from_content(file_path: &str, content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        if file_path.ends_with(".json") {
            serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("invalid JSON config: {}", e)))
        } else if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
            serde_yml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("invalid YAML config: {}", e)))
        } else if let Ok(config) = serde_json::from_str::<Config>(content) {
            Ok(config)
        } else if let Ok(config) = serde_yml::from_str::<Config>(content) {
            Ok(config)
        } else {
            Err(ConfigError::Parse(
                "config file is neither valid JSON nor valid YAML".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.triangles_file, "triangles.txt");
        assert_eq!(config.spheres_file, "spheres.txt");
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn json_with_partial_fields() {
        let config =
            Config::from_content("c.json", r#"{"spheres_file": "balls.txt"}"#).unwrap();
        assert_eq!(config.spheres_file, "balls.txt");
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn yaml_by_extension() {
        let config = Config::from_content("c.yml", "output: yaml\ndata_dir: /tmp/shapes\n").unwrap();
        assert_eq!(config.output, OutputFormat::Yaml);
        assert_eq!(config.data_dir, "/tmp/shapes");
    }

    #[test]
    fn sniffed_format() {
        let json = Config::from_content("shapeyard.conf", r#"{"output": "yaml"}"#).unwrap();
        assert_eq!(json.output, OutputFormat::Yaml);
        let yaml = Config::from_content("shapeyard.conf", "triangles_file: t.txt\n").unwrap();
        assert_eq!(yaml.triangles_file, "t.txt");
    }

    #[test]
    fn empty_content_is_default() {
        assert_eq!(Config::from_content("c.json", "  \n").unwrap(), Config::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Config::from_content("c.json", "{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let err = Config::from_content("c.json", r#"{"output": "xml"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/shapeyard.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

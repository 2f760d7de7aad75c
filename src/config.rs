//! Configuration module for the notebook watcher.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `NBW_` and use double underscores
//! to separate nested levels:
//! - `NBW_EXTRACT__OUTPUT_DIR=generated` sets `extract.output_dir`
//! - `NBW_WATCH__DEBOUNCE_SECS=10` sets `watch.debounce_secs`
//! - `NBW_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".config/settings.toml";

/// Location of the stored default notebook folder.
pub const DEFAULT_STATE_FILE: &str = ".config/default_notebook_path.txt";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// File holding the default notebook folder
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Watcher settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractConfig {
    /// Directory generated files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension of generated files (without the dot)
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Extension of notebook files (without the dot)
    #[serde(default = "default_notebook_extension")]
    pub notebook_extension: String,

    /// Line that tags a code cell for extraction
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Add the last commit touching the notebook to the generated header
    #[serde(default)]
    pub annotate_commit: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatchConfig {
    /// Minimum seconds between two processed events, shared across all files
    #[serde(default = "default_debounce_secs")]
    pub debounce_secs: u64,

    /// Capacity of the channel between notify and the event loop
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

/// Logging configuration.
///
/// `RUST_LOG` takes precedence over these values when set.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all targets
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `watcher = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("src/proto")
}
fn default_output_extension() -> String {
    "py".to_string()
}
fn default_notebook_extension() -> String {
    "ipynb".to_string()
}
fn default_marker() -> String {
    "#proto\n".to_string()
}
fn default_debounce_secs() -> u64 {
    30
}
fn default_channel_capacity() -> usize {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            extract: ExtractConfig::default(),
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            output_extension: default_output_extension(),
            notebook_extension: default_notebook_extension(),
            marker: default_marker(),
            annotate_commit: false,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_secs: default_debounce_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_secs(self.debounce_secs)
    }
}

impl Settings {
    /// Load configuration from the default settings file, if present.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(DEFAULT_SETTINGS_FILE)
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore stays
            .merge(Env::prefixed("NBW_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(settings.extract.output_dir, PathBuf::from("src/proto"));
        assert_eq!(settings.extract.output_extension, "py");
        assert_eq!(settings.extract.notebook_extension, "ipynb");
        assert_eq!(settings.extract.marker, "#proto\n");
        assert!(!settings.extract.annotate_commit);
        assert_eq!(settings.watch.debounce(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
state_file = "state/path.txt"

[extract]
output_dir = "generated"
output_extension = "txt"
annotate_commit = true

[watch]
debounce_secs = 5

[logging]
default = "debug"

[logging.modules]
watcher = "trace"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.state_file, PathBuf::from("state/path.txt"));
        assert_eq!(settings.extract.output_dir, PathBuf::from("generated"));
        assert_eq!(settings.extract.output_extension, "txt");
        assert!(settings.extract.annotate_commit);
        assert_eq!(settings.watch.debounce_secs, 5);
        assert_eq!(settings.logging.default, "debug");
        assert_eq!(settings.logging.modules["watcher"], "trace");
        // Untouched values keep their defaults
        assert_eq!(settings.extract.marker, "#proto\n");
        assert_eq!(settings.watch.channel_capacity, 100);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.extract.notebook_extension, "ipynb");
    }
}

//! Application configuration.
//!
//! Loads `config.toml` from the config directory and merges it over the
//! stock defaults. Every key is optional; a missing file means "all
//! defaults" unless production mode demands one (see [`require_config`]).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [database]
//! path = "imagecloud.db"    # SQLite file, ":memory:" for a throwaway store
//!
//! [images]
//! root = "."                # Directory that contains images/galleries/
//!
//! [layout]
//! columns = 3               # Columns used when showing a gallery's images
//!
//! [logging]
//! level = "info"            # Log filter used when RUST_LOG is unset
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [database]
//! path = "/var/lib/imagecloud/galleries.db"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("A config.toml is required in production mode: {0} not found")]
    Missing(PathBuf),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Gallery record store.
    pub database: DatabaseConfig,
    /// Image file store.
    pub images: ImagesConfig,
    /// Gallery page layout.
    pub layout: LayoutConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "database.path must not be empty".into(),
            ));
        }
        if self.images.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "images.root must not be empty".into(),
            ));
        }
        if self.layout.columns == 0 {
            return Err(ConfigError::Validation(
                "layout.columns must be at least 1".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite database file. `":memory:"` keeps everything in memory.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("imagecloud.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory under which `images/galleries/<id>/` is created.
    pub root: PathBuf,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of columns a gallery's images are split into.
    pub columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { columns: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it isn't valid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in `dir`, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Like [`load_config`], but a missing `config.toml` is an error.
///
/// Production deployments must not silently run on defaults.
pub fn require_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    match load_raw_config(dir)? {
        Some(overlay) => resolve_config(stock_defaults_value(), Some(overlay)),
        None => Err(ConfigError::Missing(dir.join(CONFIG_FILENAME))),
    }
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imagecloud configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Gallery records
# ---------------------------------------------------------------------------
[database]
# SQLite database file. Parent directories are created on first use.
# Use ":memory:" for a store that disappears when the process exits.
path = "imagecloud.db"

# ---------------------------------------------------------------------------
# Image files
# ---------------------------------------------------------------------------
[images]
# Directory that contains images/galleries/<gallery id>/.
# Serve <root>/images/ as /images/ so image paths resolve in the browser.
root = "."

# ---------------------------------------------------------------------------
# Gallery layout
# ---------------------------------------------------------------------------
[layout]
# Number of columns a gallery's images are dealt into, round-robin.
columns = 3

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# Filter directive (e.g. "debug", "imagecloud=debug,warn").
# RUST_LOG takes precedence when set.
level = "info"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, PathBuf::from("imagecloud.db"));
        assert_eq!(config.images.root, PathBuf::from("."));
        assert_eq!(config.layout.columns, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[layout]
columns = 4
"##;
        let config: AppConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.layout.columns, 4);
        // Default values preserved
        assert_eq!(config.database.path, PathBuf::from("imagecloud.db"));
        assert_eq!(config.logging.level, "info");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.layout.columns, 3);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r##"
[database]
path = "data/galleries.db"

[images]
root = "/srv/imagecloud"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("data/galleries.db"));
        assert_eq!(config.images.root, PathBuf::from("/srv/imagecloud"));
        // Unspecified values should be defaults
        assert_eq!(config.layout.columns, 3);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_columns_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[layout]\ncolumns = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = AppConfig::default();
        config.database.path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r##"
[database]
pathh = "typo.db"
"##;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = r##"
[cache]
size = 10
"##;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn require_config_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            require_config(tmp.path()),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn require_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = require_config(tmp.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(10));
        assert_eq!(merged["b"].as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[database]\npath = \"x.db\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["database"]["path"].as_str(), Some("x.db"));
        assert_eq!(merged["layout"]["columns"].as_integer(), Some(3));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: AppConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.database.path, defaults.database.path);
        assert_eq!(config.images.root, defaults.images.root);
        assert_eq!(config.layout.columns, defaults.layout.columns);
        assert_eq!(config.logging.level, defaults.logging.level);
    }
}

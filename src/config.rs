use crate::core::{AdapterError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section and field is optional; missing values take their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub sample: SampleConfig,
    pub logging: LoggingConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub auto_transaction: bool,
    pub busy_timeout_ms: Option<u64>,
    pub foreign_keys: Option<bool>,
    pub statement_cache_capacity: Option<usize>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: PathBuf::from("Test.db"),
            auto_transaction: true,
            busy_timeout_ms: None,
            foreign_keys: None,
            statement_cache_capacity: None,
        }
    }
}

/// Settings for the button-handler sample.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// The sample only touches the database when this is 1.
    pub debug_flag: i64,
    /// Values inserted into `FOO.MyValue`, one row each.
    pub insert_values: Vec<toml::Value>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            debug_flag: 1,
            insert_values: vec![toml::Value::String("Hello World".to_string())],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "debug".to_string(),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// use sqlite_adapter::config::load_config;
/// let config = load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| AdapterError::Config(e.to_string()))
}

/// `<config dir>/sqlite-adapter/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlite-adapter").join("config.toml"))
}

/// Loads `path` if given, else the default config file if it exists, else defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => match default_config_path() {
            Some(default) if default.is_file() => load_config(default),
            _ => Ok(Config::default()),
        },
    }
}

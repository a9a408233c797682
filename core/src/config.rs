//! Configuration loading
//!
//! Values are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, `CADENCE_CONFIG_PATH`, or `./cadence.toml` if present)
//! 3. `CADENCE_*` environment variables, with `__` between section and key
//!    (e.g. `CADENCE_SCHEDULER__FRAMERATE=60`)

use anyhow::{Context, Result};
use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "cadence.toml";
const CONFIG_PATH_ENV: &str = "CADENCE_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Ticks per second when running paced
    pub framerate: u32,
    /// Immediate jumps drained per step before the thread is forced to yield
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_transfers_per_step: Option<usize>,
    /// Stop after this many ticks even if threads remain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            framerate: 30,
            max_transfers_per_step: None,
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    inline_toml: Option<String>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Use this file instead of the default search; it must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Layer a TOML document on top of the file source
    pub fn toml(mut self, source: impl Into<String>) -> Self {
        self.inline_toml = Some(source.into());
        self
    }

    /// Ignore `CADENCE_*` environment variables
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut builder = ::config::Config::builder();

        let explicit = self
            .config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)),
        };

        if let Some(source) = &self.inline_toml {
            builder = builder.add_source(File::from_str(source, FileFormat::Toml));
        }

        if !self.skip_env {
            builder = builder.add_source(
                Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::builder().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scheduler.framerate, 30);
        assert_eq!(config.scheduler.max_transfers_per_step, None);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_inline_toml_overrides_defaults() {
        let config = Config::builder()
            .skip_env()
            .toml(
                r#"
                [scheduler]
                framerate = 60
                max_transfers_per_step = 500
            "#,
            )
            .build()
            .unwrap();

        assert_eq!(config.scheduler.framerate, 60);
        assert_eq!(config.scheduler.max_transfers_per_step, Some(500));
        assert_eq!(config.scheduler.max_ticks, None);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::builder()
            .skip_env()
            .config_path(Some(PathBuf::from("/nonexistent/cadence.toml")))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = Config::default();
        config.scheduler.max_ticks = Some(120);
        let rendered = config.to_toml().unwrap();
        let parsed = Config::builder().skip_env().toml(rendered).build().unwrap();
        assert_eq!(parsed, config);
    }
}

//! Configuration layer: typed settings with layered precedence (file → env → CLI).
//!
//! A `foglio.toml` next to the working directory (or an explicit
//! `--config-file`) seeds the settings, `FOGLIO__*` environment variables
//! override it, and CLI flags override both. The API base URL has no
//! default on purpose: its absence is a hard configuration error surfaced
//! to the user, never a silent fallback.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const LOCAL_CONFIG_BASENAME: &str = "foglio";
const ENV_PREFIX: &str = "FOGLIO";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Fully resolved application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSettings {
    /// Base location of the remote collection API, e.g. `http://api.test/api`.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// CLI-supplied overrides, applied after file and environment sources.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
}

/// Load settings from the optional config file, the environment, and CLI
/// overrides, in that precedence order.
pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();
    builder = match config_file {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false)),
    };
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut settings: Settings = builder.build()?.try_deserialize()?;
    if let Some(base_url) = &overrides.api_base_url {
        settings.api.base_url = Some(base_url.clone());
    }
    Ok(settings)
}

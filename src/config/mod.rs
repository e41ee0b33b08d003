//! Configuration management
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use jyotish_data::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Astrology API: {}", config.astro_api.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `JYOTISH__<section>__<key>`
//!
//! Examples:
//! - `JYOTISH__ASTRO_API__CALL_DELAY=2s`
//! - `JYOTISH__GEOCODE__REQUEST_TIMEOUT=5`
//! - `JYOTISH__SERVER__BIND_ADDR=0.0.0.0:9000`
//!
//! API keys are read only from `ASTRO_API_KEY` and `GEOCODE_API_KEY`.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/jyotish.toml`.
//! This can be overridden using the `JYOTISH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{AstroApiConfig, Config, GeocodeConfig, OutputConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`JYOTISH__*`)
    /// 2. TOML file (default: `config/jyotish.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (bad URL scheme, zero timeout, excessive delay)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Effective settings as TOML; API keys are never included
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

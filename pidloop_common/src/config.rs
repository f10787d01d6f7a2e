//! Configuration loading trait and error type.
//!
//! This module provides a standardized way to load TOML parameter files
//! for controller construction.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pidloop_common::config::{ConfigError, ConfigLoader};
//! use pidloop_common::params::PidConfig;
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = PidConfig::load(Path::new("loop.toml"))?;
//!     println!("kp = {}", config.gains.kp);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use thiserror::Error;

use crate::params::PidConfig;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Trait for loading configuration from TOML files.
///
/// Provides a default implementation for any type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Load a [`PidConfig`] from a TOML file and validate its bounds.
///
/// Combines [`ConfigLoader::load`] with [`PidConfig::validate`]; the
/// validation message is carried in `ConfigError::ValidationError`.
pub fn load_pid_config(path: &Path) -> Result<PidConfig, ConfigError> {
    let config = PidConfig::load(path)?;
    config.validate().map_err(ConfigError::ValidationError)?;
    Ok(config)
}

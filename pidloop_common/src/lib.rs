//! PID Loop Common Library
//!
//! This crate provides the shared parameter types and configuration loading
//! utilities for the pidloop workspace crates.
//!
//! # Module Structure
//!
//! - [`cells`] - Caller-owned process image the controller binds to
//! - [`config`] - Configuration loading trait and error type
//! - [`consts`] - Numeric defaults and bounds
//! - [`params`] - Tuning parameter and limit types
//!
//! # Usage
//!
//! ```rust
//! use pidloop_common::params::PidConfig;
//!
//! let config: PidConfig = toml::from_str("min_interval_us = 50").unwrap();
//! assert!(config.validate().is_ok());
//! ```

pub mod cells;
pub mod config;
pub mod consts;
pub mod params;

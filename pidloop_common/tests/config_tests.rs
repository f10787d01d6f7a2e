//! Configuration loading tests.
//!
//! Exercises `load_pid_config()` against TOML files on disk: full tables,
//! partial tables with defaults, unbounded limit representation, and the
//! validation failure paths.

use std::fs;
use std::path::PathBuf;

use pidloop_common::config::{load_pid_config, ConfigError};
use pidloop_common::consts::DEFAULT_MIN_INTERVAL_US;
use pidloop_common::params::Limits;
use tempfile::TempDir;

/// Write `content` as `loop.toml` in a fresh temp dir and return its path.
fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn full_table_loads() {
    let (_dir, path) = write_config(
        r#"
manual = false
min_interval_us = 100

[gains]
kp = 4.0
ki = 3.0
kd = 2.0

[deadband]
value = 0.5
enabled = true

[pv_limits]
low = -50.0
high = 50.0

[sp_limits]
low = -50.0
high = 50.0

[co_limits]
low = -10.0
high = 10.0
"#,
    );

    let config = load_pid_config(&path).unwrap();
    assert_eq!(config.gains.kp, 4.0);
    assert_eq!(config.gains.ki, 3.0);
    assert_eq!(config.gains.kd, 2.0);
    assert_eq!(config.deadband.value, 0.5);
    assert!(config.deadband.enabled);
    assert_eq!(config.co_limits, Limits::new(-10.0, 10.0));
    assert!(!config.manual);
    assert_eq!(config.min_interval_us, 100);
}

#[test]
fn partial_table_fills_defaults() {
    let (_dir, path) = write_config(
        r#"
[gains]
kp = 1.0
"#,
    );

    let config = load_pid_config(&path).unwrap();
    assert_eq!(config.gains.kp, 1.0);
    assert_eq!(config.gains.ki, 0.0);
    assert_eq!(config.gains.kd, 0.0);
    assert!(!config.deadband.enabled);
    assert!(config.manual);
    assert_eq!(config.min_interval_us, DEFAULT_MIN_INTERVAL_US);
    assert_eq!(config.pv_limits, Limits::UNBOUNDED);
    assert_eq!(config.co_limits, Limits::UNBOUNDED);
}

#[test]
fn explicit_infinite_limits_load() {
    // TOML spells out the unbounded representation directly.
    let (_dir, path) = write_config(
        r#"
[co_limits]
low = -inf
high = inf
"#,
    );

    let config = load_pid_config(&path).unwrap();
    assert_eq!(config.co_limits, Limits::UNBOUNDED);
}

#[test]
fn one_sided_limit_table_loads() {
    let (_dir, path) = write_config(
        r#"
[co_limits]
high = 5.0
"#,
    );

    let config = load_pid_config(&path).unwrap();
    assert_eq!(config.co_limits.low, f32::NEG_INFINITY);
    assert_eq!(config.co_limits.high, 5.0);
}

#[test]
fn reversed_limits_rejected() {
    let (_dir, path) = write_config(
        r#"
[co_limits]
low = 10.0
high = -10.0
"#,
    );

    let err = load_pid_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn zero_interval_rejected() {
    let (_dir, path) = write_config("min_interval_us = 0\n");

    let err = load_pid_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn non_finite_gain_rejected() {
    let (_dir, path) = write_config(
        r#"
[gains]
ki = nan
"#,
    );

    let err = load_pid_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn oversized_kd_rejected() {
    // Survives TOML as f64, overflows the internal f32 scale.
    let (_dir, path) = write_config(
        r#"
[gains]
kd = 1.0e35
"#,
    );

    let err = load_pid_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn missing_file_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_pid_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound));
}

#[test]
fn syntax_error_reported() {
    let (_dir, path) = write_config("gains = [broken\n");
    let err = load_pid_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

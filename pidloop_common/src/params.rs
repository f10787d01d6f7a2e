//! Tuning parameter and limit types for the PID loop.
//!
//! All types derive `serde::Deserialize` with per-field defaults so that a
//! partial TOML table loads cleanly. [`PidConfig::validate`] applies the
//! same rules the controller's setters enforce.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_INTERVAL_US, KD_EXTERNAL_MAX};

// ─── Limits ─────────────────────────────────────────────────────────

/// A low/high range pair.
///
/// The unset state is the explicit unbounded range `(-inf, +inf)`; clamping
/// against the unbounded range is a no-op. Stored pairs always satisfy
/// `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Lower bound (inclusive).
    #[serde(default = "unbounded_low")]
    pub low: f32,
    /// Upper bound (inclusive).
    #[serde(default = "unbounded_high")]
    pub high: f32,
}

fn unbounded_low() -> f32 {
    f32::NEG_INFINITY
}

fn unbounded_high() -> f32 {
    f32::INFINITY
}

impl Default for Limits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Limits {
    /// The unbounded range.
    pub const UNBOUNDED: Self = Self {
        low: f32::NEG_INFINITY,
        high: f32::INFINITY,
    };

    /// Construct a pair without ordering checks.
    #[inline]
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Returns true if `low <= high`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }

    /// Return the pair with `low <= high`, swapping the bounds if needed.
    #[inline]
    pub fn ordered(self) -> Self {
        if self.high < self.low {
            Self {
                low: self.high,
                high: self.low,
            }
        } else {
            self
        }
    }

    /// Clamp `value` into the range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}

// ─── Gains ──────────────────────────────────────────────────────────

/// Independent-gain triple in external units: `kp` dimensionless, `ki` per
/// second, `kd` seconds.
///
/// The controller stores `ki`/`kd` rescaled into its per-microsecond
/// evaluation domain; these values are always the caller-facing units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    /// Proportional gain.
    #[serde(default)]
    pub kp: f32,
    /// Integral gain (0 = disabled).
    #[serde(default)]
    pub ki: f32,
    /// Derivative gain (0 = disabled).
    #[serde(default)]
    pub kd: f32,
}

impl Gains {
    /// Validate representable ranges.
    ///
    /// Every gain must be finite, and `|kd|` must survive the internal
    /// ×1e+6 scale without overflowing an `f32`.
    pub fn validate(&self) -> Result<(), String> {
        if !self.kp.is_finite() {
            return Err(format!("kp {} is not finite", self.kp));
        }
        if !self.ki.is_finite() {
            return Err(format!("ki {} is not finite", self.ki));
        }
        if !self.kd.is_finite() || self.kd.abs() > KD_EXTERNAL_MAX {
            return Err(format!(
                "kd {} out of range [{}, {}]",
                self.kd, -KD_EXTERNAL_MAX, KD_EXTERNAL_MAX
            ));
        }
        Ok(())
    }
}

// ─── Deadband ───────────────────────────────────────────────────────

/// Error band in which corrective action is suppressed to avoid hunting.
///
/// The gate compares the **signed** error against `value`: action is
/// suppressed whenever `error < value`, not when `|error| < value`. Errors
/// far below the setpoint are therefore also suppressed while the band is
/// enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deadband {
    /// Band magnitude, in error units.
    #[serde(default)]
    pub value: f32,
    /// Gate enabled.
    #[serde(default)]
    pub enabled: bool,
}

impl Deadband {
    /// Validate the representable range of the band magnitude.
    pub fn validate(&self) -> Result<(), String> {
        if !self.value.is_finite() {
            return Err(format!("deadband {} is not finite", self.value));
        }
        Ok(())
    }
}

// ─── PidConfig ──────────────────────────────────────────────────────

/// Full tuning surface for one controller, loadable from a TOML table.
///
/// Defaults mirror the default-constructed controller: zero gains,
/// unbounded limits, deadband off, manual mode on, 10 µs interval floor.
///
/// # TOML Example
///
/// ```toml
/// manual = false
/// min_interval_us = 100
///
/// [gains]
/// kp = 4.0
/// ki = 3.0
/// kd = 2.0
///
/// [co_limits]
/// low = -10.0
/// high = 10.0
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PidConfig {
    /// Gain triple in external (per-second) units.
    #[serde(default)]
    pub gains: Gains,
    /// Deadband gate.
    #[serde(default)]
    pub deadband: Deadband,
    /// Process-variable limits (informational).
    #[serde(default)]
    pub pv_limits: Limits,
    /// Setpoint limits (informational).
    #[serde(default)]
    pub sp_limits: Limits,
    /// Control-output limits (enforced every cycle).
    #[serde(default)]
    pub co_limits: Limits,
    /// Manual mode on startup — the tieback drives the output until the
    /// caller switches to automatic.
    #[serde(default = "default_manual")]
    pub manual: bool,
    /// Minimum elapsed time between two effective evaluations [µs].
    #[serde(default = "default_min_interval")]
    pub min_interval_us: u64,
}

fn default_manual() -> bool {
    true
}

fn default_min_interval() -> u64 {
    DEFAULT_MIN_INTERVAL_US
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            deadband: Deadband::default(),
            pv_limits: Limits::UNBOUNDED,
            sp_limits: Limits::UNBOUNDED,
            co_limits: Limits::UNBOUNDED,
            manual: true,
            min_interval_us: DEFAULT_MIN_INTERVAL_US,
        }
    }
}

impl PidConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        self.gains.validate()?;
        self.deadband.validate()?;
        for (name, limits) in [
            ("pv_limits", self.pv_limits),
            ("sp_limits", self.sp_limits),
            ("co_limits", self.co_limits),
        ] {
            if !limits.is_ordered() {
                return Err(format!(
                    "{name}: low {} > high {}",
                    limits.low, limits.high
                ));
            }
        }
        if self.min_interval_us == 0 {
            return Err("min_interval_us must be at least 1".to_string());
        }
        Ok(())
    }
}

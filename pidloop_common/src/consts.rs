//! System-wide constants for the pidloop workspace.
//!
//! Single source of truth for numeric defaults and bounds.
//! Imported by all crates — no duplication permitted.

/// Default minimum interval between two effective evaluations [µs].
pub const DEFAULT_MIN_INTERVAL_US: u64 = 10;

/// Hard floor for the minimum interval [µs]. Zero is never stored.
pub const MIN_INTERVAL_FLOOR_US: u64 = 1;

/// Microseconds per second — rescales external per-second gains into the
/// internal per-microsecond evaluation domain.
pub const US_PER_S: f32 = 1.0e+6;

/// Seconds per microsecond — the inverse of [`US_PER_S`].
pub const S_PER_US: f32 = 1.0e-6;

/// Largest external derivative gain whose internally scaled value
/// (×[`US_PER_S`]) still fits in an `f32`.
pub const KD_EXTERNAL_MAX: f32 = f32::MAX * S_PER_US;

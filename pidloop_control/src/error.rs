//! Error types for the controller surface.
//!
//! Two tiers: parameter validation failures, where the setter self-corrects
//! the stored value before reporting, and evaluation preconditions, where
//! `run_pid` fails without touching state or writing output.

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// External bindings a controller may be missing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Bindings: u8 {
        /// Process variable cell.
        const PV = 0x01;
        /// Setpoint cell.
        const SP = 0x02;
        /// Control output cell.
        const CO = 0x04;
        /// Tieback cell. Optional — absence means "zero" in manual mode.
        const TB = 0x08;
    }
}

impl Bindings {
    /// Mask of the bindings an evaluation cannot run without.
    pub const REQUIRED: Self =
        Self::from_bits_truncate(Self::PV.bits() | Self::SP.bits() | Self::CO.bits());
}

impl Default for Bindings {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parameter validation failure reported by a setter.
///
/// The stored state is self-corrected (pair swapped, interval floored)
/// before the error returns, so the controller's invariants hold even when
/// the caller ignores the result. Rejected gains and deadbands mutate
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamError {
    /// Limit pair arrived with `high < low`; the swapped pair was stored.
    #[error("limit pair reversed: low {low} > high {high} (stored swapped)")]
    ReversedLimits {
        /// Low bound as supplied.
        low: f32,
        /// High bound as supplied.
        high: f32,
    },

    /// The named gain is non-finite or too large for the internal scale.
    #[error("gain {0} out of representable range")]
    GainOutOfRange(&'static str),

    /// Deadband magnitude is non-finite.
    #[error("deadband out of representable range")]
    DeadbandOutOfRange,

    /// Minimum interval of zero; the 1 µs floor was stored instead.
    #[error("minimum interval must be at least 1 µs (floor stored)")]
    ZeroMinInterval,
}

/// Evaluation precondition failure from `run_pid`.
///
/// Nothing is mutated and no output is written: the controller is not
/// ready, and the output cell does not reflect this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    /// One or more required bindings are absent.
    #[error("missing required bindings: {0:?}")]
    MissingBindings(Bindings),

    /// The stored minimum interval is zero.
    #[error("minimum interval is zero")]
    ZeroMinInterval,
}

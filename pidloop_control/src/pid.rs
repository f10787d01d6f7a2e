//! Single-loop PID evaluation engine.
//!
//! Time-step-aware P/I/D with deadband gating, manual/automatic mode,
//! bumpless manual→automatic transfer, conditional anti-windup, and output
//! clamping. One sample per [`BasePid::run_pid`] call; timestamps are
//! caller-supplied microseconds and must be non-decreasing.

use core::cell::Cell;

use tracing::{debug, warn};

use pidloop_common::consts::{
    DEFAULT_MIN_INTERVAL_US, KD_EXTERNAL_MAX, MIN_INTERVAL_FLOOR_US, S_PER_US, US_PER_S,
};
use pidloop_common::params::{Deadband, Gains, Limits, PidConfig};

use crate::error::{Bindings, ParamError, RunError};

/// Basic float-precision single-loop PID controller, independent-gain form.
///
/// Holds non-owning handles to caller-allocated cells: reads `pv`/`sp`/`tb`
/// and exclusively writes `co` during [`run_pid`](Self::run_pid). The
/// integral and derivative gains are stored in the per-microsecond
/// evaluation domain (`ki` ×1e-6, `kd` ×1e+6 relative to the external
/// per-second units); the accessors always speak external units.
///
/// A default-constructed controller has no bindings and cannot evaluate;
/// manual mode starts enabled so a freshly attached loop drives its output
/// from the tieback, not from an uninitialized control law.
#[derive(Debug)]
pub struct BasePid<'a> {
    // External bindings.
    pv: Option<&'a Cell<f32>>,
    sp: Option<&'a Cell<f32>>,
    tb: Option<&'a Cell<f32>>,
    co: Option<&'a Cell<f32>>,

    // Tuning, internal per-microsecond scale.
    kp: f32,
    ki: f32,
    kd: f32,
    deadband: Deadband,

    // Range limits. pv/sp are informational; co is enforced every cycle.
    pv_limits: Limits,
    sp_limits: Limits,
    co_limits: Limits,

    manual_enabled: bool,
    min_interval_us: u64,

    // Transient state, mutated only by run_pid.
    last_timestamp: u64,
    last_manual_enabled: bool,
    integral_term: f32,
    last_error: f32,
    last_output: f32,
}

impl Default for BasePid<'_> {
    fn default() -> Self {
        Self {
            pv: None,
            sp: None,
            tb: None,
            co: None,
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            deadband: Deadband::default(),
            pv_limits: Limits::UNBOUNDED,
            sp_limits: Limits::UNBOUNDED,
            co_limits: Limits::UNBOUNDED,
            manual_enabled: true,
            min_interval_us: DEFAULT_MIN_INTERVAL_US,
            last_timestamp: 0,
            last_manual_enabled: true,
            integral_term: 0.0,
            last_error: 0.0,
            last_output: 0.0,
        }
    }
}

impl<'a> BasePid<'a> {
    /// Controller with bindings only: zero gains, unbounded limits, manual
    /// mode on. The tieback is optional; absence reads as zero in manual
    /// mode.
    pub fn attached(
        pv: &'a Cell<f32>,
        sp: &'a Cell<f32>,
        co: &'a Cell<f32>,
        tb: Option<&'a Cell<f32>>,
    ) -> Self {
        Self {
            pv: Some(pv),
            sp: Some(sp),
            co: Some(co),
            tb,
            ..Self::default()
        }
    }

    /// Controller with bindings and the full parameter set.
    ///
    /// The config carries external per-second `ki`/`kd`; they are rescaled
    /// into the per-microsecond evaluation domain here. Reversed limit
    /// pairs are stored swapped and a zero interval is floored, so the
    /// constructed controller always satisfies its invariants even for an
    /// unvalidated config.
    pub fn from_config(
        pv: &'a Cell<f32>,
        sp: &'a Cell<f32>,
        co: &'a Cell<f32>,
        tb: Option<&'a Cell<f32>>,
        config: &PidConfig,
    ) -> Self {
        Self {
            pv: Some(pv),
            sp: Some(sp),
            co: Some(co),
            tb,
            kp: config.gains.kp,
            ki: config.gains.ki * S_PER_US,
            kd: config.gains.kd * US_PER_S,
            deadband: config.deadband,
            pv_limits: config.pv_limits.ordered(),
            sp_limits: config.sp_limits.ordered(),
            co_limits: config.co_limits.ordered(),
            manual_enabled: config.manual,
            min_interval_us: config.min_interval_us.max(MIN_INTERVAL_FLOOR_US),
            ..Self::default()
        }
    }

    // ─── Limit accessors ────────────────────────────────────────────

    /// Process-variable limits (informational — not enforced in the
    /// evaluation path).
    pub fn pv_limits(&self) -> Limits {
        self.pv_limits
    }

    /// Store a process-variable limit pair.
    pub fn set_pv_limits(&mut self, low: f32, high: f32) -> Result<(), ParamError> {
        Self::store_limits(&mut self.pv_limits, "pv", low, high)
    }

    /// Setpoint limits (informational).
    pub fn sp_limits(&self) -> Limits {
        self.sp_limits
    }

    /// Store a setpoint limit pair.
    pub fn set_sp_limits(&mut self, low: f32, high: f32) -> Result<(), ParamError> {
        Self::store_limits(&mut self.sp_limits, "sp", low, high)
    }

    /// Control-output limits. Every computed output is clamped into this
    /// range, in manual mode as well as automatic.
    pub fn co_limits(&self) -> Limits {
        self.co_limits
    }

    /// Store a control-output limit pair.
    pub fn set_co_limits(&mut self, low: f32, high: f32) -> Result<(), ParamError> {
        Self::store_limits(&mut self.co_limits, "co", low, high)
    }

    /// A reversed pair is stored swapped so the ordering invariant holds
    /// whether or not the caller checks the result.
    fn store_limits(
        slot: &mut Limits,
        which: &'static str,
        low: f32,
        high: f32,
    ) -> Result<(), ParamError> {
        if high < low {
            warn!(which, low, high, "limit pair reversed, storing swapped");
            *slot = Limits::new(high, low);
            return Err(ParamError::ReversedLimits { low, high });
        }
        *slot = Limits::new(low, high);
        Ok(())
    }

    // ─── Gain accessors ─────────────────────────────────────────────

    /// Gain triple in external units (`ki` per second, `kd` seconds).
    pub fn gains(&self) -> Gains {
        Gains {
            kp: self.kp,
            ki: self.ki * US_PER_S,
            kd: self.kd * S_PER_US,
        }
    }

    /// Store a gain triple supplied in external units.
    ///
    /// Each gain must be finite, and `|kd|` must fit the internal ×1e+6
    /// scale. A rejected triple mutates nothing.
    pub fn set_gains(&mut self, gains: Gains) -> Result<(), ParamError> {
        if !gains.kp.is_finite() {
            return Err(ParamError::GainOutOfRange("kp"));
        }
        if !gains.ki.is_finite() {
            return Err(ParamError::GainOutOfRange("ki"));
        }
        if !gains.kd.is_finite() || gains.kd.abs() > KD_EXTERNAL_MAX {
            return Err(ParamError::GainOutOfRange("kd"));
        }
        debug!(kp = gains.kp, ki = gains.ki, kd = gains.kd, "gains updated");
        self.kp = gains.kp;
        self.ki = gains.ki * S_PER_US;
        self.kd = gains.kd * US_PER_S;
        Ok(())
    }

    // ─── Deadband accessors ─────────────────────────────────────────

    /// Current deadband gate.
    pub fn deadband(&self) -> Deadband {
        self.deadband
    }

    /// Store the deadband gate. A non-finite magnitude is rejected
    /// without mutating state.
    pub fn set_deadband(&mut self, deadband: Deadband) -> Result<(), ParamError> {
        if !deadband.value.is_finite() {
            return Err(ParamError::DeadbandOutOfRange);
        }
        self.deadband = deadband;
        Ok(())
    }

    // ─── Mode accessors ─────────────────────────────────────────────

    /// True while the tieback drives the output.
    pub fn manual_enabled(&self) -> bool {
        self.manual_enabled
    }

    /// Switch between manual and automatic mode. Takes effect on the next
    /// effective evaluation; the manual→automatic edge is bumpless.
    pub fn set_manual_enabled(&mut self, enabled: bool) {
        self.manual_enabled = enabled;
    }

    // ─── Time-slice accessors ───────────────────────────────────────

    /// Minimum elapsed time between two effective evaluations [µs].
    pub fn min_interval(&self) -> u64 {
        self.min_interval_us
    }

    /// Store the minimum interval [µs]. Zero is floored to 1 µs and
    /// reported; zero is never the effective interval.
    pub fn set_min_interval(&mut self, interval_us: u64) -> Result<(), ParamError> {
        if interval_us == 0 {
            warn!("minimum interval of zero floored to {MIN_INTERVAL_FLOOR_US} µs");
            self.min_interval_us = MIN_INTERVAL_FLOOR_US;
            return Err(ParamError::ZeroMinInterval);
        }
        self.min_interval_us = interval_us;
        Ok(())
    }

    // ─── Evaluation ─────────────────────────────────────────────────

    /// Evaluate one control cycle at `timestamp_us`.
    ///
    /// Rate-limited and deadband-gated cycles rewrite the previous output
    /// and succeed. The only failures are the two preconditions — missing
    /// required bindings and a zero minimum interval — and a failed call
    /// mutates nothing and writes nothing.
    ///
    /// Timestamps must be non-decreasing across the controller's lifetime.
    /// A decreasing timestamp reads as zero elapsed time and replays the
    /// previous output.
    pub fn run_pid(&mut self, timestamp_us: u64) -> Result<(), RunError> {
        let (Some(pv), Some(sp), Some(co)) = (self.pv, self.sp, self.co) else {
            let mut missing = Bindings::empty();
            if self.pv.is_none() {
                missing |= Bindings::PV;
            }
            if self.sp.is_none() {
                missing |= Bindings::SP;
            }
            if self.co.is_none() {
                missing |= Bindings::CO;
            }
            return Err(RunError::MissingBindings(missing));
        };

        // The setter floors this to 1; a zero interval must never reach
        // the elapsed-time divide below.
        if self.min_interval_us == 0 {
            return Err(RunError::ZeroMinInterval);
        }

        // Below the minimum interval the cycle is a pure replay: the
        // output cell is refreshed, nothing else moves.
        let elapsed = timestamp_us.saturating_sub(self.last_timestamp);
        if elapsed < self.min_interval_us {
            co.set(self.last_output);
            return Ok(());
        }

        self.last_timestamp = timestamp_us;

        // Manual mode: the tieback drives the output, CO limits still
        // apply. Control-law state is left untouched.
        if self.manual_enabled {
            let tieback = self.tb.map_or(0.0, Cell::get);
            self.last_output = self.co_limits.clamp(tieback);
            co.set(self.last_output);
            self.last_manual_enabled = true;
            return Ok(());
        }

        // Manual → automatic edge: seed the integral term from the last
        // output so the handover is bumpless.
        if self.last_manual_enabled {
            self.last_manual_enabled = false;
            self.integral_term = self.last_output;
        }

        let error = sp.get() - pv.get();

        // Deadband region: remember the error for the next derivative,
        // reassert the previous output. The comparison is intentionally
        // signed; see the `Deadband` docs.
        if self.deadband.enabled && error < self.deadband.value {
            self.last_error = error;
            co.set(self.last_output);
            return Ok(());
        }

        let dt = elapsed as f32;

        let mut output = self.kp * error;

        output += self.kd * (error - self.last_error) / dt;
        self.last_error = error;

        if self.ki == 0.0 {
            // No memory carried while integral action is disabled.
            self.integral_term = 0.0;
        } else {
            // Fold in the accumulator, then the new delta — unless the
            // running total is already past the limit in the delta's
            // direction (anti-windup freeze).
            let delta = self.ki * error * dt;
            output += self.integral_term;
            let worsens_saturation = (output > self.co_limits.high && delta > 0.0)
                || (output < self.co_limits.low && delta < 0.0);
            if !worsens_saturation {
                output += delta;
                self.integral_term += delta;
            }
        }

        self.last_output = self.co_limits.clamp(output);
        co.set(self.last_output);
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

//! # PID Loop Control Library
//!
//! Single-loop, float-precision PID controller core for irregularly
//! sampled real-time control. The controller owns no I/O and no
//! scheduling: the caller owns the process cells and the sampling clock,
//! and invokes one evaluation per control cycle with a microsecond
//! timestamp.
//!
//! ## Evaluation path
//!
//! One [`pid::BasePid::run_pid`] call performs a bounded-time computation
//! with zero heap allocations and no logging: precondition checks, rate
//! limiting against the configured minimum interval, the manual-mode
//! branch with bumpless manual→automatic transfer, deadband gating, and
//! the P/I/D law with conditional anti-windup and output clamping.
//!
//! ## Threading
//!
//! Single-threaded by design. The external cells are shared mutable
//! memory owned by the caller; callers embedding the controller in a
//! threaded environment must serialize access around each evaluation.

pub mod error;
pub mod pid;

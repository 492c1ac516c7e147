//! Fixed rates and numeric constants for the resampling pipelines
//!
//! The tap tables are designed for one rate pair, so the target rate and
//! filter length are compile-time constants rather than configuration.

/// Rate of the analysis stream produced by the downsampler, in Hz.
pub const TARGET_SAMPLE_RATE: f64 = 16_000.0;

/// Source rate the tap tables were designed for, in Hz.
pub const DESIGN_SOURCE_RATE: f64 = 44_100.0;

/// Number of taps in every FIR stage. Must be a power of two so the delay
/// line can wrap with a bitmask.
pub const FIR_NUM_TAPS: usize = 64;

/// Extra slots callers should reserve beyond `expected_output_size` when
/// sizing the intermediate 16 kHz buffer.
pub const OUTPUT_GUARD_SAMPLES: usize = 64;

/// Slack added to the phase bound when checking output capacity, so that
/// accumulated rounding in the per-sample phase update can never push the
/// real count past the checked bound.
pub const PHASE_BOUND_EPSILON: f64 = 1e-6;

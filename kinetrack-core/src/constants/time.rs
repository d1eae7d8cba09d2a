//! Time Constants
//!
//! Tick gating interval and unit conversions.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: f32 = 60.0;

/// Minimum wall-clock time between processed ticks, in milliseconds.
///
/// Sensors report at 50-200 Hz; the fusion chain only needs 1 Hz. Faster
/// samples still feed the per-channel Kalman filters.
pub const TICK_INTERVAL_MS: u64 = 1000;

//! Fusion Algorithm Parameters
//!
//! Kalman noise terms and the weights used to blend the filtered channels
//! into a single raw activity score.

// ===== KALMAN FILTER =====

/// Process noise added to the error estimate on every prediction step.
///
/// Higher values let the estimate follow the measurement faster.
/// With R = 0.5 the steady-state gain settles near 0.36.
pub const KALMAN_PROCESS_NOISE: f32 = 0.1;

/// Measurement noise used in the gain denominator.
pub const KALMAN_MEASUREMENT_NOISE: f32 = 0.5;

/// Estimate a freshly reset filter starts from.
pub const KALMAN_INITIAL_ESTIMATE: f32 = 0.0;

/// Error estimate a freshly reset filter starts from.
pub const KALMAN_INITIAL_ERROR: f32 = 1.0;

// ===== CHANNEL WEIGHTS =====

/// Weight of normalized linear acceleration in the raw activity score.
pub const ACCEL_WEIGHT: f32 = 0.7;

/// Weight of normalized angular rate in the raw activity score.
pub const GYRO_WEIGHT: f32 = 0.3;

// ===== POCKET CORRECTION =====

/// Multiplier applied to the raw score when the device is in a pocket.
///
/// Fabric damps motion reaching the sensor, so pocketed readings under-report.
/// The boost is not capped here; the smoother clamps to 1.0.
pub const POCKET_BOOST_FACTOR: f32 = 1.1;

/// Raw score above which the pocket boost applies.
///
/// Below this the device is resting and boosting noise is pointless.
pub const POCKET_BOOST_MIN_ACTIVITY: f32 = 0.1;

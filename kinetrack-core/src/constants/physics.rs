//! Physical Constants and Sensor Normalization Ranges
//!
//! Values used to turn raw inertial and light readings into unitless
//! activity contributions.

// ===== GRAVITY =====

/// Standard gravity in m/s².
///
/// Subtracted from the raw accelerometer magnitude to approximate linear
/// acceleration without needing an orientation estimate. The result is
/// clamped at zero, so a device lying still reads 0 regardless of tilt.
///
/// Source: CGPM 1901 (9.80665), rounded to the value used by the trackers.
pub const STANDARD_GRAVITY_MS2: f32 = 9.81;

// ===== NORMALIZATION =====

/// Linear acceleration that maps to full activity contribution, m/s².
///
/// Running with a phone in hand peaks around 10-15 m/s² of linear
/// acceleration; anything above saturates to 1.0.
pub const ACCEL_FULL_SCALE_MS2: f32 = 15.0;

/// Angular rate that maps to full rotation contribution, rad/s.
///
/// Arm swing during a brisk walk is 2-3 rad/s; 4 rad/s is vigorous.
pub const GYRO_FULL_SCALE_RAD_S: f32 = 4.0;

// ===== CONTEXT =====

/// Ambient light below which the device is assumed to be in a pocket or bag, lux.
///
/// Typical indoor lighting is 100-500 lux; a pocket reads 0-5.
pub const POCKET_LIGHT_THRESHOLD_LUX: f32 = 10.0;

/// Light level reported when the light channel is unavailable, lux.
pub const NEUTRAL_LIGHT_LUX: f32 = 0.0;

/// Angular rate assumed when the gyroscope is unavailable, rad/s.
pub const NEUTRAL_ROTATION_RAD_S: f32 = 0.0;

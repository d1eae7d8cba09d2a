//! Constants for KineTrack Core
//!
//! Every numeric value the pipeline depends on is defined here, grouped by
//! domain, so thresholds can be reviewed in one place.
//!
//! ## Organization
//!
//! - **Physics**: gravity and sensor full-scale normalization ranges
//! - **Fusion**: Kalman noise terms, channel weights, pocket correction
//! - **Time**: tick interval and unit conversions
//! - **Buffers**: smoothing window and history retention
//! - **Energy**: MET table and calorie formula constants
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in the name
//! 3. Changing a threshold changes classifier output; update tests with it

/// Physical constants and sensor normalization ranges.
pub mod physics;

/// Fusion and filtering parameters.
pub mod fusion;

/// Tick gating and unit conversions.
pub mod time;

/// Window and history sizes.
pub mod buffers;

/// Metabolic equivalents and calorie formula constants.
pub mod energy;

// Re-export commonly used constants for convenience
pub use physics::{STANDARD_GRAVITY_MS2, ACCEL_FULL_SCALE_MS2, GYRO_FULL_SCALE_RAD_S, POCKET_LIGHT_THRESHOLD_LUX};

pub use fusion::{
    KALMAN_PROCESS_NOISE, KALMAN_MEASUREMENT_NOISE,
    ACCEL_WEIGHT, GYRO_WEIGHT, POCKET_BOOST_FACTOR, POCKET_BOOST_MIN_ACTIVITY,
};

pub use time::{TICK_INTERVAL_MS, MS_PER_SECOND, SECONDS_PER_MINUTE};

pub use buffers::{SMOOTHING_WINDOW_SIZE, HISTORY_CAPACITY_DAYS, SUMMARY_WINDOW_DAYS};

pub use energy::{DEFAULT_WEIGHT_KG, OXYGEN_ML_PER_KG_MIN, KCAL_DIVISOR};

//! Scalar Kalman Filter for Per-Channel Smoothing
//!
//! ## Overview
//!
//! Each sensor channel is reduced to one scalar (linear acceleration
//! magnitude, angular rate magnitude, lux) and tracked by its own
//! single-state Kalman filter. There is no velocity term: the filter assumes
//! the true value changes slowly and everything else is measurement noise.
//!
//! ## Algorithm
//!
//! ```text
//! Predict:   P = P + Q
//! Gain:      K = P / (P + R)
//! Update:    x = x + K·(z - x)
//!            P = P·(1 - K)
//! ```
//!
//! With fixed Q and R the error estimate converges to the fixed point
//! `P* = (-Q + sqrt(Q² + 4QR)) / 2` after the update step, so the filter
//! cannot diverge and needs no covariance conditioning.
//!
//! ## Usage Example
//!
//! ```rust
//! use kinetrack_core::filter::{KalmanConfig, ScalarKalman};
//!
//! let mut kf = ScalarKalman::new(KalmanConfig::default());
//! for _ in 0..20 {
//!     kf.update(3.0);
//! }
//! assert!((kf.estimate() - 3.0).abs() < 0.01);
//! ```

use crate::constants::fusion::{
    KALMAN_INITIAL_ERROR, KALMAN_INITIAL_ESTIMATE, KALMAN_MEASUREMENT_NOISE, KALMAN_PROCESS_NOISE,
};
use crate::sensors::SensorChannel;

/// Kalman filter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KalmanConfig {
    /// Process noise (Q) added on every prediction
    pub process_noise: f32,
    /// Measurement noise (R)
    pub measurement_noise: f32,
    /// Estimate after construction or reset
    pub initial_estimate: f32,
    /// Error estimate after construction or reset
    pub initial_error: f32,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: KALMAN_PROCESS_NOISE,
            measurement_noise: KALMAN_MEASUREMENT_NOISE,
            initial_estimate: KALMAN_INITIAL_ESTIMATE,
            initial_error: KALMAN_INITIAL_ERROR,
        }
    }
}

impl KalmanConfig {
    /// Set process noise (higher = faster tracking, less smoothing)
    pub fn with_process_noise(mut self, noise: f32) -> Self {
        self.process_noise = noise;
        self
    }

    /// Set measurement noise (higher = more smoothing)
    pub fn with_measurement_noise(mut self, noise: f32) -> Self {
        self.measurement_noise = noise;
        self
    }

    /// Check the noise terms keep the gain in (0, 1)
    pub fn is_valid(&self) -> bool {
        self.process_noise.is_finite()
            && self.measurement_noise.is_finite()
            && self.initial_error.is_finite()
            && self.initial_estimate.is_finite()
            && self.process_noise >= 0.0
            && self.measurement_noise > 0.0
            && self.initial_error >= 0.0
    }
}

/// Mutable filter state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Current estimate
    pub estimate: f32,
    /// Current error estimate (variance)
    pub error_estimate: f32,
}

/// Single-state, single-measurement Kalman filter
#[derive(Debug, Clone)]
pub struct ScalarKalman {
    state: FilterState,
    config: KalmanConfig,
    /// Measurements folded in since the last reset
    update_count: u32,
}

impl ScalarKalman {
    /// Create filter with configuration
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            state: FilterState {
                estimate: config.initial_estimate,
                error_estimate: config.initial_error,
            },
            config,
            update_count: 0,
        }
    }

    /// Fold one measurement in and return the new estimate
    pub fn update(&mut self, measurement: f32) -> f32 {
        let state = &mut self.state;

        state.error_estimate += self.config.process_noise;
        let gain = state.error_estimate / (state.error_estimate + self.config.measurement_noise);
        state.estimate += gain * (measurement - state.estimate);
        state.error_estimate *= 1.0 - gain;

        self.update_count = self.update_count.saturating_add(1);
        state.estimate
    }

    /// Current estimate
    pub fn estimate(&self) -> f32 {
        self.state.estimate
    }

    /// Current error estimate
    pub fn error_estimate(&self) -> f32 {
        self.state.error_estimate
    }

    /// Snapshot of the state
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Measurements since last reset
    pub fn update_count(&self) -> u32 {
        self.update_count
    }

    /// True once at least one measurement has been folded in
    pub fn has_estimate(&self) -> bool {
        self.update_count > 0
    }

    /// Back to initial conditions (estimate 0, error 1 by default)
    pub fn reset(&mut self) {
        self.state = FilterState {
            estimate: self.config.initial_estimate,
            error_estimate: self.config.initial_error,
        };
        self.update_count = 0;
    }
}

impl Default for ScalarKalman {
    fn default() -> Self {
        Self::new(KalmanConfig::default())
    }
}

/// One independent filter per physical channel
///
/// Filters never share state. A session owns exactly one `ChannelFilters`.
#[derive(Debug, Clone, Default)]
pub struct ChannelFilters {
    accel: ScalarKalman,
    gyro: ScalarKalman,
    light: ScalarKalman,
}

impl ChannelFilters {
    /// Three filters with the same configuration
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            accel: ScalarKalman::new(config),
            gyro: ScalarKalman::new(config),
            light: ScalarKalman::new(config),
        }
    }

    /// Filter for a channel
    pub fn get(&self, channel: SensorChannel) -> &ScalarKalman {
        match channel {
            SensorChannel::Accelerometer => &self.accel,
            SensorChannel::Gyroscope => &self.gyro,
            SensorChannel::Light => &self.light,
        }
    }

    /// Mutable filter for a channel
    pub fn get_mut(&mut self, channel: SensorChannel) -> &mut ScalarKalman {
        match channel {
            SensorChannel::Accelerometer => &mut self.accel,
            SensorChannel::Gyroscope => &mut self.gyro,
            SensorChannel::Light => &mut self.light,
        }
    }

    /// Update one channel's filter
    pub fn update(&mut self, channel: SensorChannel, measurement: f32) -> f32 {
        self.get_mut(channel).update(measurement)
    }

    /// Reset every channel
    pub fn reset(&mut self) {
        self.accel.reset();
        self.gyro.reset();
        self.light.reset();
    }
}

//! Sensor Fusion Combiner
//!
//! ## Overview
//!
//! Blends the three filtered channels into one raw activity score:
//!
//! ```text
//! accel_norm = clamp(accel / 15, 0, 1)
//! gyro_norm  = clamp(gyro  / 4,  0, 1)
//! raw        = 0.7·accel_norm + 0.3·gyro_norm
//! raw       *= 1.1   if light < 10 lux and raw > 0.1   (in pocket)
//! ```
//!
//! The pocket boost is not capped here; [`crate::smoother::TemporalSmoother`]
//! clamps its output to [0, 1]. Division by zero is impossible: the scales are
//! validated to be positive.
//!
//! ## Missing channels
//!
//! A gyroscope with no estimate contributes 0 rad/s. A light channel with no
//! estimate skips the pocket check entirely, since 0 lux would otherwise flag
//! every session as pocketed until the first light event.

use crate::constants::{
    fusion::{ACCEL_WEIGHT, GYRO_WEIGHT, POCKET_BOOST_FACTOR, POCKET_BOOST_MIN_ACTIVITY},
    physics::{
        ACCEL_FULL_SCALE_MS2, GYRO_FULL_SCALE_RAD_S, NEUTRAL_LIGHT_LUX, NEUTRAL_ROTATION_RAD_S,
        POCKET_LIGHT_THRESHOLD_LUX,
    },
};

/// Fusion weights and thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FusionConfig {
    /// Linear acceleration mapping to 1.0, m/s²
    pub accel_full_scale: f32,
    /// Angular rate mapping to 1.0, rad/s
    pub gyro_full_scale: f32,
    /// Weight of the acceleration term
    pub accel_weight: f32,
    /// Weight of the rotation term
    pub gyro_weight: f32,
    /// Lux below which the device counts as pocketed
    pub pocket_threshold_lux: f32,
    /// Multiplier applied when pocketed
    pub pocket_boost: f32,
    /// Raw score the boost requires
    pub pocket_boost_min_activity: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            accel_full_scale: ACCEL_FULL_SCALE_MS2,
            gyro_full_scale: GYRO_FULL_SCALE_RAD_S,
            accel_weight: ACCEL_WEIGHT,
            gyro_weight: GYRO_WEIGHT,
            pocket_threshold_lux: POCKET_LIGHT_THRESHOLD_LUX,
            pocket_boost: POCKET_BOOST_FACTOR,
            pocket_boost_min_activity: POCKET_BOOST_MIN_ACTIVITY,
        }
    }
}

impl FusionConfig {
    /// Set channel weights
    pub fn with_weights(mut self, accel: f32, gyro: f32) -> Self {
        self.accel_weight = accel;
        self.gyro_weight = gyro;
        self
    }

    /// Set the pocket detection threshold
    pub fn with_pocket_threshold(mut self, lux: f32) -> Self {
        self.pocket_threshold_lux = lux;
        self
    }

    /// Scales must be positive and finite
    pub fn is_valid(&self) -> bool {
        self.accel_full_scale.is_finite()
            && self.gyro_full_scale.is_finite()
            && self.accel_full_scale > 0.0
            && self.gyro_full_scale > 0.0
            && self.accel_weight >= 0.0
            && self.gyro_weight >= 0.0
            && self.pocket_boost.is_finite()
    }
}

/// Filtered per-tick inputs to fusion
///
/// `None` means the channel is unavailable or has not reported yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionContext {
    /// Filtered linear acceleration magnitude, m/s²
    pub accel_magnitude: f32,
    /// Filtered angular rate magnitude, rad/s
    pub gyro_magnitude: Option<f32>,
    /// Filtered ambient light, lux
    pub light_level: Option<f32>,
}

impl FusionContext {
    /// Angular rate, neutral when missing
    pub fn rotation_rate(&self) -> f32 {
        self.gyro_magnitude.unwrap_or(NEUTRAL_ROTATION_RAD_S)
    }

    /// Ambient light, neutral when missing
    pub fn ambient_light(&self) -> f32 {
        self.light_level.unwrap_or(NEUTRAL_LIGHT_LUX)
    }
}

/// Result of one fusion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionOutput {
    /// Normalized acceleration term in [0, 1]
    pub accel_norm: f32,
    /// Normalized rotation term in [0, 1]
    pub gyro_norm: f32,
    /// Weighted score, roughly [0, 1.1]
    pub raw_activity: f32,
    /// Device judged to be in a pocket
    pub in_pocket: bool,
}

/// Stateless fusion combiner
#[derive(Debug, Clone, Default)]
pub struct SensorFusion {
    config: FusionConfig,
}

impl SensorFusion {
    /// Create combiner with configuration
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Combine filtered channels into a raw activity score
    pub fn combine(&self, ctx: &FusionContext) -> FusionOutput {
        let cfg = &self.config;

        let accel_norm = (ctx.accel_magnitude / cfg.accel_full_scale).clamp(0.0, 1.0);
        let gyro_norm = (ctx.rotation_rate() / cfg.gyro_full_scale).clamp(0.0, 1.0);

        let mut raw_activity = accel_norm * cfg.accel_weight + gyro_norm * cfg.gyro_weight;

        let in_pocket = ctx
            .light_level
            .map(|lux| lux < cfg.pocket_threshold_lux)
            .unwrap_or(false);

        if in_pocket && raw_activity > cfg.pocket_boost_min_activity {
            raw_activity *= cfg.pocket_boost;
        }

        FusionOutput {
            accel_norm,
            gyro_norm,
            raw_activity,
            in_pocket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(accel: f32, gyro: f32, light: f32) -> FusionContext {
        FusionContext {
            accel_magnitude: accel,
            gyro_magnitude: Some(gyro),
            light_level: Some(light),
        }
    }

    #[test]
    fn weighted_blend() {
        let fusion = SensorFusion::default();
        let out = fusion.combine(&ctx(3.0, 0.0, 500.0));

        assert!((out.accel_norm - 0.2).abs() < 1e-6);
        assert!((out.raw_activity - 0.14).abs() < 1e-6);
        assert!(!out.in_pocket);
    }

    #[test]
    fn normalization_saturates() {
        let fusion = SensorFusion::default();
        let out = fusion.combine(&ctx(100.0, 50.0, 500.0));

        assert_eq!(out.accel_norm, 1.0);
        assert_eq!(out.gyro_norm, 1.0);
        assert!((out.raw_activity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pocket_boost_applies_above_minimum() {
        let fusion = SensorFusion::default();
        let out = fusion.combine(&ctx(3.0, 0.0, 2.0));

        assert!(out.in_pocket);
        assert!((out.raw_activity - 0.154).abs() < 1e-5);
    }

    #[test]
    fn pocket_boost_uncapped() {
        let fusion = SensorFusion::default();
        let out = fusion.combine(&ctx(100.0, 50.0, 0.0));
        assert!((out.raw_activity - 1.1).abs() < 1e-6);
    }

    #[test]
    fn resting_in_pocket_not_boosted() {
        let fusion = SensorFusion::default();
        // raw = 0.7 * (1.5/15) = 0.07, below the boost minimum
        let out = fusion.combine(&ctx(1.5, 0.0, 0.0));

        assert!(out.in_pocket);
        assert!((out.raw_activity - 0.07).abs() < 1e-6);
    }

    #[test]
    fn missing_channels_are_neutral() {
        let fusion = SensorFusion::default();
        let out = fusion.combine(&FusionContext {
            accel_magnitude: 3.0,
            gyro_magnitude: None,
            light_level: None,
        });

        assert_eq!(out.gyro_norm, 0.0);
        assert!(!out.in_pocket);
        assert!((out.raw_activity - 0.14).abs() < 1e-6);
    }

    #[test]
    fn light_threshold_is_strict() {
        let fusion = SensorFusion::default();
        assert!(!fusion.combine(&ctx(3.0, 0.0, 10.0)).in_pocket);
        assert!(fusion.combine(&ctx(3.0, 0.0, 9.99)).in_pocket);
    }
}

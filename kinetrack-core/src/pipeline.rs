//! Per-Session Activity Pipeline
//!
//! ## Overview
//!
//! Owns every piece of per-session state (three Kalman filters, the smoother
//! window, the tick gate) and runs the full chain on each accelerometer tick:
//!
//! ```text
//! gyro sample  ──→ gyro filter          (returns None)
//! light sample ──→ light filter         (returns None)
//! accel sample ──→ accel filter ──→ gate ──→ fusion → smoother → classify → energy
//!                                    │                                         │
//!                                 < 1 s: None                      Some(ActivitySample)
//! ```
//!
//! Channels arrive at independent rates. Only the accelerometer drives ticks,
//! so the fusion chain runs sequentially, at most once per second.
//!
//! ## Failure Handling
//!
//! - Non-finite readings return `InvalidMeasurement`; the filter is untouched.
//! - Samples from a channel declared unavailable return `SensorUnavailable`.
//! - A missing accelerometer is rejected at construction.
//!
//! None of these stop the session. Hosts count them and keep feeding samples.
//!
//! ## Lifecycle
//!
//! One pipeline per tracking session. [`ActivityPipeline::reset`] discards
//! filter state and the smoothing window, e.g. when tracking stops. Daily
//! totals live outside the pipeline and survive resets.

use crate::{
    activity::{classify, ActivitySample},
    constants::time::TICK_INTERVAL_MS,
    energy::{EnergyEstimator, UserProfile},
    errors::{PipelineError, PipelineResult},
    filter::{ChannelFilters, KalmanConfig},
    fusion::{FusionConfig, FusionContext, SensorFusion},
    sensors::{SensorChannel, SensorSample},
    smoother::TemporalSmoother,
    time::TickGate,
};

/// Which channels exist on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorAvailability {
    /// Accelerometer present (required)
    pub accelerometer: bool,
    /// Gyroscope present
    pub gyroscope: bool,
    /// Ambient light sensor present
    pub light: bool,
}

impl Default for SensorAvailability {
    fn default() -> Self {
        Self {
            accelerometer: true,
            gyroscope: true,
            light: true,
        }
    }
}

impl SensorAvailability {
    /// Whether a channel is present
    pub fn has(&self, channel: SensorChannel) -> bool {
        match channel {
            SensorChannel::Accelerometer => self.accelerometer,
            SensorChannel::Gyroscope => self.gyroscope,
            SensorChannel::Light => self.light,
        }
    }
}

/// Configuration for a pipeline instance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Kalman parameters shared by all channel filters
    pub kalman: KalmanConfig,
    /// Fusion weights and thresholds
    pub fusion: FusionConfig,
    /// Minimum spacing between processed ticks, ms
    pub tick_interval_ms: u64,
    /// Channels present on the device
    pub availability: SensorAvailability,
    /// Body profile for energy estimation
    pub profile: UserProfile,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            kalman: KalmanConfig::default(),
            fusion: FusionConfig::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            availability: SensorAvailability::default(),
            profile: UserProfile::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the body profile
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set channel availability
    pub fn with_availability(mut self, availability: SensorAvailability) -> Self {
        self.availability = availability;
        self
    }

    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Set Kalman parameters
    pub fn with_kalman(mut self, kalman: KalmanConfig) -> Self {
        self.kalman = kalman;
        self
    }

    /// Set fusion parameters
    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.availability.accelerometer {
            return Err(PipelineError::SensorUnavailable(SensorChannel::Accelerometer));
        }
        if self.tick_interval_ms == 0 {
            return Err(PipelineError::InvalidConfig("tick interval must be non-zero"));
        }
        if !self.kalman.is_valid() {
            return Err(PipelineError::InvalidConfig("kalman noise terms out of range"));
        }
        if !self.fusion.is_valid() {
            return Err(PipelineError::InvalidConfig("fusion scales must be positive"));
        }
        Ok(())
    }
}

/// Counters for monitoring a session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Samples received per channel (accel, gyro, light)
    pub samples_received: [u64; 3],
    /// Samples dropped because a value was NaN or infinite
    pub invalid_samples: u64,
    /// Samples dropped because the channel is unavailable
    pub unavailable_samples: u64,
    /// Accelerometer samples absorbed by the tick gate
    pub gated_samples: u64,
    /// Activity samples emitted
    pub ticks_emitted: u64,
}

/// Activity recognition pipeline for one tracking session
#[derive(Debug)]
pub struct ActivityPipeline {
    config: PipelineConfig,
    filters: ChannelFilters,
    fusion: SensorFusion,
    smoother: TemporalSmoother,
    gate: TickGate,
    metrics: PipelineMetrics,
}

impl ActivityPipeline {
    /// Build a pipeline; fails when the accelerometer is missing or the
    /// configuration is unusable
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;

        Ok(Self {
            filters: ChannelFilters::new(config.kalman),
            fusion: SensorFusion::new(config.fusion),
            smoother: TemporalSmoother::new(),
            gate: TickGate::new(config.tick_interval_ms),
            metrics: PipelineMetrics::default(),
            config,
        })
    }

    /// Feed one sensor sample.
    ///
    /// Returns `Some` only for accelerometer samples that open the tick gate.
    pub fn process(&mut self, sample: &SensorSample) -> PipelineResult<Option<ActivitySample>> {
        let channel = sample.channel;
        self.metrics.samples_received[channel.index()] += 1;

        if !self.config.availability.has(channel) {
            self.metrics.unavailable_samples += 1;
            return Err(PipelineError::SensorUnavailable(channel));
        }

        if !sample.reading.is_finite() {
            self.metrics.invalid_samples += 1;
            log_debug!("Discarding non-finite {:?} sample at {}", channel, sample.timestamp_ms);
            return Err(PipelineError::InvalidMeasurement { channel });
        }

        let magnitude = sample.channel_magnitude();
        if !magnitude.is_finite() {
            // Finite components can still overflow the norm
            self.metrics.invalid_samples += 1;
            log_warn!("Sensor magnitude overflow on {:?} at {}", channel, sample.timestamp_ms);
            return Err(PipelineError::InvalidMeasurement { channel });
        }

        self.filters.update(channel, magnitude);

        if channel != SensorChannel::Accelerometer {
            return Ok(None);
        }

        match self.gate.try_tick(sample.timestamp_ms) {
            Some(elapsed_ms) => Ok(Some(self.tick(sample.timestamp_ms, elapsed_ms))),
            None => {
                self.metrics.gated_samples += 1;
                Ok(None)
            }
        }
    }

    /// Run fusion → smoother → classifier → estimator once
    fn tick(&mut self, timestamp_ms: u64, elapsed_ms: u64) -> ActivitySample {
        let ctx = self.fusion_context();
        let fused = self.fusion.combine(&ctx);

        self.smoother.push(fused.raw_activity);
        let activity_level = self.smoother.smoothed();
        let state = classify(activity_level);
        let calories_per_minute =
            EnergyEstimator::calories_per_minute(state, activity_level, &self.config.profile);

        self.metrics.ticks_emitted += 1;

        ActivitySample {
            activity_level,
            state,
            calories_per_minute,
            movement_intensity: ctx.accel_magnitude,
            rotation_rate: ctx.rotation_rate(),
            ambient_light: ctx.ambient_light(),
            in_pocket: fused.in_pocket,
            timestamp_ms,
            elapsed_ms,
        }
    }

    /// Current filtered values; channels without an estimate are `None`
    pub fn fusion_context(&self) -> FusionContext {
        let estimate_of = |channel: SensorChannel| {
            let filter = self.filters.get(channel);
            (self.config.availability.has(channel) && filter.has_estimate())
                .then(|| filter.estimate())
        };

        FusionContext {
            accel_magnitude: self.filters.get(SensorChannel::Accelerometer).estimate(),
            gyro_magnitude: estimate_of(SensorChannel::Gyroscope),
            light_level: estimate_of(SensorChannel::Light),
        }
    }

    /// Current smoothed activity level
    pub fn activity_level(&self) -> f32 {
        self.smoother.smoothed()
    }

    /// Replace the body profile; takes effect on the next tick
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.config.profile = profile;
    }

    /// Body profile in use
    pub fn profile(&self) -> &UserProfile {
        &self.config.profile
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Session counters
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Discard filter state, the smoothing window and the tick gate.
    ///
    /// Profile and metrics are kept.
    pub fn reset(&mut self) {
        self.filters.reset();
        self.smoother.reset();
        self.gate.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityState;

    fn still_accel(t: u64) -> SensorSample {
        SensorSample::accelerometer(t, [0.0, 0.0, 9.81])
    }

    #[test]
    fn missing_accelerometer_is_fatal() {
        let config = PipelineConfig::default().with_availability(SensorAvailability {
            accelerometer: false,
            ..SensorAvailability::default()
        });

        assert_eq!(
            ActivityPipeline::new(config).unwrap_err(),
            PipelineError::SensorUnavailable(SensorChannel::Accelerometer)
        );
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let config = PipelineConfig::default().with_tick_interval_ms(0);
        assert!(matches!(
            ActivityPipeline::new(config),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn only_accelerometer_ticks() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();

        assert_eq!(pipeline.process(&SensorSample::gyroscope(0, [0.1, 0.0, 0.0])).unwrap(), None);
        assert_eq!(pipeline.process(&SensorSample::light(0, 300.0)).unwrap(), None);
        assert!(pipeline.process(&still_accel(0)).unwrap().is_some());
    }

    #[test]
    fn tick_gating_at_one_hz() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();

        let mut emitted = 0;
        // 50 Hz for 5 seconds
        for i in 0..250u64 {
            if pipeline.process(&still_accel(i * 20)).unwrap().is_some() {
                emitted += 1;
            }
        }

        assert_eq!(emitted, 5);
        assert_eq!(pipeline.metrics().ticks_emitted, 5);
        assert_eq!(pipeline.metrics().gated_samples, 245);
    }

    #[test]
    fn nan_sample_discarded_without_touching_filter() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        pipeline.process(&SensorSample::gyroscope(0, [1.0, 0.0, 0.0])).unwrap();
        let before = pipeline.fusion_context().gyro_magnitude;

        let result = pipeline.process(&SensorSample::gyroscope(10, [f32::NAN, 0.0, 0.0]));
        assert_eq!(
            result,
            Err(PipelineError::InvalidMeasurement { channel: SensorChannel::Gyroscope })
        );
        assert_eq!(pipeline.fusion_context().gyro_magnitude, before);
        assert_eq!(pipeline.metrics().invalid_samples, 1);
    }

    #[test]
    fn unavailable_channel_is_neutral() {
        let config = PipelineConfig::default().with_availability(SensorAvailability {
            gyroscope: false,
            light: false,
            ..SensorAvailability::default()
        });
        let mut pipeline = ActivityPipeline::new(config).unwrap();

        assert_eq!(
            pipeline.process(&SensorSample::gyroscope(0, [3.0, 0.0, 0.0])),
            Err(PipelineError::SensorUnavailable(SensorChannel::Gyroscope))
        );

        let sample = pipeline
            .process(&SensorSample::accelerometer(0, [0.0, 0.0, 9.81]))
            .unwrap()
            .unwrap();
        assert_eq!(sample.rotation_rate, 0.0);
        assert_eq!(sample.ambient_light, 0.0);
        assert!(!sample.in_pocket);
    }

    #[test]
    fn light_not_yet_reported_is_not_pocket() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        let sample = pipeline
            .process(&SensorSample::accelerometer(0, [0.0, 0.0, 30.0]))
            .unwrap()
            .unwrap();
        assert!(!sample.in_pocket);
    }

    #[test]
    fn still_device_rests() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        let mut last = None;
        for i in 0..10u64 {
            last = pipeline.process(&still_accel(i * 1000)).unwrap();
        }

        let sample = last.unwrap();
        assert_eq!(sample.state, ActivityState::Resting);
        assert!(sample.activity_level < 0.01);
        // Resting at ~0 intensity: 1 MET × 70 kg × 3.5 / 200
        assert!((sample.calories_per_minute - 1.225).abs() < 0.01);
    }

    #[test]
    fn reset_clears_session_state() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        for i in 0..5u64 {
            pipeline.process(&SensorSample::accelerometer(i * 1000, [0.0, 0.0, 25.0])).unwrap();
        }
        assert!(pipeline.activity_level() > 0.0);

        pipeline.reset();
        assert_eq!(pipeline.activity_level(), 0.0);
        assert_eq!(pipeline.fusion_context().accel_magnitude, 0.0);

        // Gate reopens immediately after a reset
        assert!(pipeline.process(&still_accel(5_100)).unwrap().is_some());
    }

    #[test]
    fn profile_update_changes_calories() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        let base = pipeline.process(&still_accel(0)).unwrap().unwrap();

        pipeline.set_profile(UserProfile::with_weight(140.0));
        let heavy = pipeline.process(&still_accel(1000)).unwrap().unwrap();

        assert!(heavy.calories_per_minute > base.calories_per_minute * 1.9);
    }

    #[test]
    fn first_tick_reports_nominal_interval() {
        let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
        let first = pipeline.process(&still_accel(7_000)).unwrap().unwrap();
        assert_eq!(first.elapsed_ms, 1000);

        let second = pipeline.process(&still_accel(8_500)).unwrap().unwrap();
        assert_eq!(second.elapsed_ms, 1500);
    }
}

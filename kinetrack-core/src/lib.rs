//! Activity recognition core for KineTrack
//!
//! Turns raw accelerometer, gyroscope and ambient-light samples into a
//! classified activity state, a smoothed intensity and a calorie burn rate.
//! Designed to run inside a phone or wearable sensor callback.
//!
//! Key constraints:
//! - O(1) work per sensor sample, fixed memory per session
//! - No heap allocation in the hot path
//! - Never fails on bad numbers: invalid samples are dropped, values are clamped
//!
//! ```text
//! accel ─→ Kalman ─┐
//! gyro  ─→ Kalman ─┼─→ Fusion ─→ Smoother ─→ Classifier ─→ Energy ─→ ActivitySample
//! light ─→ Kalman ─┘               (30 s)      (4 states)    (MET)
//! ```
//!
//! ```no_run
//! use kinetrack_core::{ActivityPipeline, PipelineConfig, SensorSample};
//!
//! let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
//!
//! pipeline.process(&SensorSample::light(0, 420.0)).ok();
//! pipeline.process(&SensorSample::gyroscope(0, [0.1, 0.0, 0.2])).ok();
//!
//! if let Ok(Some(sample)) = pipeline.process(&SensorSample::accelerometer(0, [0.3, 9.9, 1.2])) {
//!     // sample.state, sample.calories_per_minute, ...
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod activity;
pub mod constants;
pub mod energy;
pub mod errors;
pub mod filter;
pub mod fusion;
pub mod pipeline;
pub mod sensors;
pub mod smoother;
pub mod time;

// Public API
pub use activity::{classify, ActivitySample, ActivityState};
pub use energy::{EnergyEstimator, UserProfile};
pub use errors::{PipelineError, PipelineResult};
pub use filter::{ChannelFilters, FilterState, KalmanConfig, ScalarKalman};
pub use fusion::{FusionConfig, FusionContext, FusionOutput, SensorFusion};
pub use pipeline::{ActivityPipeline, PipelineConfig, PipelineMetrics, SensorAvailability};
pub use sensors::{SensorChannel, SensorReading, SensorSample};
pub use smoother::TemporalSmoother;
pub use time::{TickGate, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

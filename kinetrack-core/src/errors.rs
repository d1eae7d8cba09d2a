//! Error Types for the Activity Pipeline
//!
//! ## Design Philosophy
//!
//! Nothing inside the numeric pipeline is fatal. Errors exist so a host can
//! tell *why* a sample produced no output, not to abort tracking:
//!
//! 1. **Small Size**: Variants carry only a channel tag or a `&'static str`,
//!    so the enum is a few bytes and can be returned from sensor callbacks.
//!
//! 2. **No Heap Allocation**: Usable from `no_std` builds.
//!
//! 3. **Copy Semantics**: Errors are `Copy` and cheap to log or count.
//!
//! ## Error Categories
//!
//! - `InvalidMeasurement`: NaN or infinite reading. The sample is discarded,
//!   the channel filter keeps its previous state.
//! - `SensorUnavailable`: the channel is not present on this device. Only the
//!   accelerometer is required; see [`crate::pipeline::ActivityPipeline::new`].
//! - `InvalidConfig`: a configuration value makes no sense (zero tick interval,
//!   non-positive normalization scale, ...).
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use kinetrack_core::{ActivityPipeline, PipelineConfig, PipelineError, SensorSample};
//!
//! let mut pipeline = ActivityPipeline::new(PipelineConfig::default()).unwrap();
//!
//! match pipeline.process(&SensorSample::accelerometer(0, [f32::NAN, 0.0, 9.8])) {
//!     Ok(Some(_sample)) => { /* publish */ }
//!     Ok(None) => { /* waiting for next tick */ }
//!     Err(PipelineError::InvalidMeasurement { .. }) => { /* count and move on */ }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

use crate::sensors::SensorChannel;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline errors - all recoverable
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PipelineError {
    /// Reading contained NaN or infinity
    #[error("Invalid measurement on {channel:?} channel: not a finite number")]
    InvalidMeasurement {
        /// Channel the offending sample came from
        channel: SensorChannel,
    },

    /// Channel is not available on this device
    #[error("Sensor unavailable: {0:?}")]
    SensorUnavailable(SensorChannel),

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl PipelineError {
    /// True when no pipeline can be built: a missing accelerometer or a
    /// rejected configuration
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SensorUnavailable(SensorChannel::Accelerometer) | Self::InvalidConfig(_)
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PipelineError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidMeasurement { channel } =>
                defmt::write!(fmt, "Invalid measurement on channel {}", channel.index()),
            Self::SensorUnavailable(channel) =>
                defmt::write!(fmt, "Sensor unavailable: channel {}", channel.index()),
            Self::InvalidConfig(reason) =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors() {
        assert!(PipelineError::SensorUnavailable(SensorChannel::Accelerometer).is_fatal());
        assert!(!PipelineError::SensorUnavailable(SensorChannel::Gyroscope).is_fatal());
        assert!(!PipelineError::SensorUnavailable(SensorChannel::Light).is_fatal());
        assert!(!PipelineError::InvalidMeasurement { channel: SensorChannel::Accelerometer }.is_fatal());
    }

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<PipelineError>() <= 24);
    }
}

//! Raw sensor input types
//!
//! One [`SensorSample`] is one reading from one channel. Platform sensor
//! subscriptions push these as they arrive; channels run at independent rates
//! (accelerometer fastest, light slowest).

use crate::constants::physics::STANDARD_GRAVITY_MS2;
use crate::time::Timestamp;

/// Physical sensor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorChannel {
    /// Three-axis accelerometer, m/s², gravity included
    Accelerometer,
    /// Three-axis gyroscope, rad/s
    Gyroscope,
    /// Ambient light sensor, lux
    Light,
}

impl SensorChannel {
    /// All channels in fusion order
    pub const ALL: [SensorChannel; 3] = [
        SensorChannel::Accelerometer,
        SensorChannel::Gyroscope,
        SensorChannel::Light,
    ];

    /// Stable numeric index, used for per-channel counters
    pub const fn index(&self) -> usize {
        match self {
            SensorChannel::Accelerometer => 0,
            SensorChannel::Gyroscope => 1,
            SensorChannel::Light => 2,
        }
    }
}

/// Value carried by a sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorReading {
    /// Three-axis reading [x, y, z]
    Vector([f32; 3]),
    /// Single-value reading
    Scalar(f32),
}

impl SensorReading {
    /// Euclidean norm for vectors, absolute value for scalars
    pub fn magnitude(&self) -> f32 {
        match self {
            SensorReading::Vector([x, y, z]) => libm::sqrtf(x * x + y * y + z * z),
            SensorReading::Scalar(v) => libm::fabsf(*v),
        }
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        match self {
            SensorReading::Vector(values) => values.iter().all(|v| v.is_finite()),
            SensorReading::Scalar(v) => v.is_finite(),
        }
    }
}

/// A single timestamped reading from one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    /// Source channel
    pub channel: SensorChannel,
    /// Reading
    pub reading: SensorReading,
    /// Milliseconds, monotonic within a session
    pub timestamp_ms: Timestamp,
}

impl SensorSample {
    /// Accelerometer sample, m/s² including gravity
    pub fn accelerometer(timestamp_ms: Timestamp, values: [f32; 3]) -> Self {
        Self {
            channel: SensorChannel::Accelerometer,
            reading: SensorReading::Vector(values),
            timestamp_ms,
        }
    }

    /// Gyroscope sample, rad/s
    pub fn gyroscope(timestamp_ms: Timestamp, values: [f32; 3]) -> Self {
        Self {
            channel: SensorChannel::Gyroscope,
            reading: SensorReading::Vector(values),
            timestamp_ms,
        }
    }

    /// Ambient light sample, lux
    pub fn light(timestamp_ms: Timestamp, lux: f32) -> Self {
        Self {
            channel: SensorChannel::Light,
            reading: SensorReading::Scalar(lux),
            timestamp_ms,
        }
    }

    /// The scalar each channel's Kalman filter tracks.
    ///
    /// - accelerometer: `max(0, |a| - g)`, linear acceleration with gravity removed
    /// - gyroscope: `|ω|`
    /// - light: lux as reported
    pub fn channel_magnitude(&self) -> f32 {
        match self.channel {
            SensorChannel::Accelerometer => {
                (self.reading.magnitude() - STANDARD_GRAVITY_MS2).max(0.0)
            }
            SensorChannel::Gyroscope => self.reading.magnitude(),
            SensorChannel::Light => match self.reading {
                SensorReading::Scalar(lux) => lux,
                // Some platforms report light as a vector with lux in x
                SensorReading::Vector([lux, _, _]) => lux,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accel_gravity_removed() {
        let sample = SensorSample::accelerometer(0, [0.0, 0.0, 12.81]);
        assert!((sample.channel_magnitude() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn accel_below_gravity_clamps_to_zero() {
        // Free fall or sensor bias below 1 g
        let sample = SensorSample::accelerometer(0, [0.0, 0.0, 5.0]);
        assert_eq!(sample.channel_magnitude(), 0.0);
    }

    #[test]
    fn gyro_magnitude_is_norm() {
        let sample = SensorSample::gyroscope(0, [3.0, 4.0, 0.0]);
        assert!((sample.channel_magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn light_is_passthrough() {
        assert_eq!(SensorSample::light(0, 320.0).channel_magnitude(), 320.0);
    }

    #[test]
    fn finiteness() {
        assert!(SensorReading::Vector([1.0, 2.0, 3.0]).is_finite());
        assert!(!SensorReading::Vector([1.0, f32::NAN, 3.0]).is_finite());
        assert!(!SensorReading::Scalar(f32::INFINITY).is_finite());
    }
}

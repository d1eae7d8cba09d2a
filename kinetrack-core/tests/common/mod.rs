//! Shared sensor stream generators for integration tests
//!
//! Streams are deterministic: noise comes from a seeded xorshift generator so
//! failures reproduce exactly.

#![allow(dead_code)]

use kinetrack_core::{constants::STANDARD_GRAVITY_MS2, SensorSample, Timestamp};

/// Deterministic noise source
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Device conditions held for the length of a stream
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    /// Linear acceleration on top of gravity, m/s²
    pub linear_ms2: f32,
    /// Angular rate, rad/s
    pub rotation_rad_s: f32,
    /// Ambient light, lux
    pub lux: f32,
    /// Peak-to-peak noise added to every channel
    pub noise: f32,
}

impl Motion {
    pub fn still() -> Self {
        Self { linear_ms2: 0.0, rotation_rad_s: 0.0, lux: 300.0, noise: 0.0 }
    }

    pub fn walking() -> Self {
        Self { linear_ms2: 3.0, rotation_rad_s: 0.0, lux: 500.0, noise: 0.0 }
    }

    pub fn running() -> Self {
        Self { linear_ms2: 12.0, rotation_rad_s: 2.5, lux: 500.0, noise: 0.0 }
    }

    pub fn in_pocket(self) -> Self {
        Self { lux: 2.0, ..self }
    }

    pub fn noisy(self, noise: f32) -> Self {
        Self { noise, ..self }
    }
}

/// Interleaved light, gyro and accel samples, one triple per tick.
///
/// Light and gyro precede the accelerometer inside each tick so the tick
/// sees fresh estimates.
pub fn tick_stream(motion: Motion, ticks: u64, start: Timestamp, seed: u32) -> Vec<SensorSample> {
    let mut rng = TestRng::new(seed);
    let mut samples = Vec::with_capacity(ticks as usize * 3);

    for i in 0..ticks {
        let t = start + i * 1000;
        let jitter = |rng: &mut TestRng| {
            if motion.noise > 0.0 {
                rng.gen_range(-motion.noise / 2.0, motion.noise / 2.0)
            } else {
                0.0
            }
        };

        let lux = (motion.lux + jitter(&mut rng)).max(0.0);
        let omega = motion.rotation_rad_s + jitter(&mut rng);
        let vertical = STANDARD_GRAVITY_MS2 + motion.linear_ms2 + jitter(&mut rng);

        samples.push(SensorSample::light(t, lux));
        samples.push(SensorSample::gyroscope(t, [0.0, 0.0, omega]));
        samples.push(SensorSample::accelerometer(t, [0.0, 0.0, vertical]));
    }

    samples
}

/// Accelerometer-only stream at an arbitrary rate
pub fn accel_stream(linear_ms2: f32, rate_hz: u64, duration_ms: u64) -> Vec<SensorSample> {
    let period = 1000 / rate_hz;
    (0..duration_ms / period)
        .map(|i| {
            SensorSample::accelerometer(i * period, [0.0, 0.0, STANDARD_GRAVITY_MS2 + linear_ms2])
        })
        .collect()
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

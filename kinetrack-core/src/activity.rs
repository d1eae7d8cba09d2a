//! Activity states and the per-tick output sample
//!
//! Classification is a pure threshold function over the smoothed level:
//!
//! ```text
//! level:   0.0 ──── 0.10 ──── 0.30 ──── 0.60 ──── 1.0
//! state:   Resting │  Light  │ Moderate │ Vigorous
//! ```
//!
//! Intervals are half-open, so a boundary value maps to the higher state.
//! There is no hysteresis; every tick is classified on its own.

use crate::constants::energy::{MET_LIGHT, MET_MODERATE, MET_RESTING, MET_VIGOROUS};
use crate::constants::time::MS_PER_SECOND;
use crate::time::Timestamp;

/// Lower bound of the Light state
pub const LIGHT_THRESHOLD: f32 = 0.10;

/// Lower bound of the Moderate state
pub const MODERATE_THRESHOLD: f32 = 0.30;

/// Lower bound of the Vigorous state
pub const VIGOROUS_THRESHOLD: f32 = 0.60;

/// Activity intensity class, ordered from least to most intense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityState {
    /// Sitting, lying, device on a table
    #[default]
    Resting,
    /// Slow walking, standing chores
    Light,
    /// Brisk walking, cycling
    Moderate,
    /// Running, sports
    Vigorous,
}

impl ActivityState {
    /// All states in intensity order
    pub const ALL: [ActivityState; 4] = [
        ActivityState::Resting,
        ActivityState::Light,
        ActivityState::Moderate,
        ActivityState::Vigorous,
    ];

    /// Nominal metabolic equivalent
    pub const fn met_value(&self) -> f32 {
        match self {
            ActivityState::Resting => MET_RESTING,
            ActivityState::Light => MET_LIGHT,
            ActivityState::Moderate => MET_MODERATE,
            ActivityState::Vigorous => MET_VIGOROUS,
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            ActivityState::Resting => "resting",
            ActivityState::Light => "light",
            ActivityState::Moderate => "moderate",
            ActivityState::Vigorous => "vigorous",
        }
    }
}

/// Map a smoothed activity level to a state.
///
/// Total: NaN and negative levels are Resting, anything ≥ 0.60 is Vigorous.
pub fn classify(level: f32) -> ActivityState {
    if level >= VIGOROUS_THRESHOLD {
        ActivityState::Vigorous
    } else if level >= MODERATE_THRESHOLD {
        ActivityState::Moderate
    } else if level >= LIGHT_THRESHOLD {
        ActivityState::Light
    } else {
        ActivityState::Resting
    }
}

/// Pipeline output, one per processing tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivitySample {
    /// Smoothed activity level in [0, 1]
    pub activity_level: f32,
    /// Classified state
    pub state: ActivityState,
    /// Estimated energy expenditure, kcal/min
    pub calories_per_minute: f32,
    /// Filtered linear acceleration magnitude, m/s²
    pub movement_intensity: f32,
    /// Filtered angular rate magnitude, rad/s
    pub rotation_rate: f32,
    /// Filtered ambient light, lux
    pub ambient_light: f32,
    /// Device judged to be in a pocket
    pub in_pocket: bool,
    /// Tick time, ms
    pub timestamp_ms: Timestamp,
    /// Time since the previous tick, ms
    pub elapsed_ms: u64,
}

impl ActivitySample {
    /// Elapsed time as fractional seconds, for aggregation
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_ms as f32 / MS_PER_SECOND as f32
    }
}

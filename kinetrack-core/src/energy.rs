//! Energy Expenditure Estimator
//!
//! Converts state and intensity into a calorie burn rate:
//!
//! ```text
//! met  = state.met_value × (1 + activity_level)
//! kcal = met × weight_kg × 3.5 / 200          (per minute)
//! ```
//!
//! Scaling by `(1 + level)` makes the rate strictly increasing in intensity,
//! both within a state and across state boundaries. It also applies to
//! Resting, so a Resting tick near level 0.1 burns ~1.1× base MET.

use crate::activity::ActivityState;
use crate::constants::energy::{
    DEFAULT_AGE_YEARS, DEFAULT_WEIGHT_KG, KCAL_DIVISOR, OXYGEN_ML_PER_KG_MIN,
};

/// User body profile supplied by the host
///
/// Only weight affects the current formula; age and sex are carried for
/// collaborators that display or export them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserProfile {
    /// Body weight, kg
    pub weight_kg: f32,
    /// Age, years
    pub age: u32,
    /// Biological sex flag
    pub is_male: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            weight_kg: DEFAULT_WEIGHT_KG,
            age: DEFAULT_AGE_YEARS,
            is_male: true,
        }
    }
}

impl UserProfile {
    /// Profile with a given weight and defaults otherwise
    pub fn with_weight(weight_kg: f32) -> Self {
        Self {
            weight_kg,
            ..Self::default()
        }
    }

    /// Weight usable in the formula: non-finite or non-positive falls back to 70 kg
    pub fn effective_weight_kg(&self) -> f32 {
        if self.weight_kg.is_finite() && self.weight_kg > 0.0 {
            self.weight_kg
        } else {
            DEFAULT_WEIGHT_KG
        }
    }
}

/// Stateless MET-based calorie estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyEstimator;

impl EnergyEstimator {
    /// Effective MET for a state at a given intensity
    pub fn met(state: ActivityState, activity_level: f32) -> f32 {
        let level = if activity_level.is_finite() {
            activity_level.clamp(0.0, 1.0)
        } else {
            0.0
        };
        state.met_value() * (1.0 + level)
    }

    /// Calorie burn rate, kcal/min
    pub fn calories_per_minute(
        state: ActivityState,
        activity_level: f32,
        profile: &UserProfile,
    ) -> f32 {
        let met = Self::met(state, activity_level);
        met * profile.effective_weight_kg() * OXYGEN_ML_PER_KG_MIN / KCAL_DIVISOR
    }
}

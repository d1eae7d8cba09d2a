//! Energy Expenditure Constants
//!
//! The estimator uses the ACSM metabolic formula:
//!
//! ```text
//! kcal/min = MET × weight_kg × 3.5 / 200
//! ```
//!
//! where 3.5 ml O₂/kg/min is one MET and ~5 kcal are burned per litre of O₂.

/// MET for the Resting state.
pub const MET_RESTING: f32 = 1.0;

/// MET for the Light state.
pub const MET_LIGHT: f32 = 2.0;

/// MET for the Moderate state.
pub const MET_MODERATE: f32 = 4.0;

/// MET for the Vigorous state.
pub const MET_VIGOROUS: f32 = 8.0;

/// Oxygen uptake of one MET, ml/kg/min.
pub const OXYGEN_ML_PER_KG_MIN: f32 = 3.5;

/// Divisor converting ml O₂ × kg to kcal.
pub const KCAL_DIVISOR: f32 = 200.0;

/// Body weight used when the profile has none or an unusable one, kg.
pub const DEFAULT_WEIGHT_KG: f32 = 70.0;

/// Age used when the profile has none.
pub const DEFAULT_AGE_YEARS: u32 = 30;

//! Per-day activity record
//!
//! One record accumulates every tick of a calendar day:
//!
//! ```text
//! total_calories         += calories_per_minute × elapsed_s / 60
//! <state>_minutes        += floor(elapsed_s / 60)
//! peak_activity_level     = max(peak, level)
//! average_activity_level  = (avg × n + level) / (n + 1);  n += 1
//! ```
//!
//! Minute counters and the sample count only grow; the peak never drops
//! within a day. Step totals are replaced, not accumulated, because hosts
//! report an already-baselined cumulative count.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use kinetrack_core::{constants::SECONDS_PER_MINUTE, ActivitySample, ActivityState};

/// Aggregated activity for one calendar day
///
/// Calories are held as `f64` and counters as `u64` so a long-lived record
/// neither loses precision nor overflows. The persisted JSON uses plain
/// numbers either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Kilocalories burned so far
    pub total_calories: f64,
    /// Latest cumulative step count reported by the host
    pub total_steps: u64,
    /// Whole minutes classified resting
    pub resting_minutes: u64,
    /// Whole minutes classified light
    pub light_minutes: u64,
    /// Whole minutes classified moderate
    pub moderate_minutes: u64,
    /// Whole minutes classified vigorous
    pub vigorous_minutes: u64,
    /// Highest activity level seen today
    pub peak_activity_level: f32,
    /// Running mean of activity level over all ticks
    pub average_activity_level: f32,
    /// Ticks folded in
    pub sample_count: u64,
    /// Wall-clock time of the last change
    pub last_updated: DateTime<Utc>,
}

impl DailyRecord {
    /// Zeroed record for `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0.0,
            total_steps: 0,
            resting_minutes: 0,
            light_minutes: 0,
            moderate_minutes: 0,
            vigorous_minutes: 0,
            peak_activity_level: 0.0,
            average_activity_level: 0.0,
            sample_count: 0,
            last_updated: Utc::now(),
        }
    }

    /// Fold one tick into the record
    pub fn fold(&mut self, sample: &ActivitySample, elapsed_seconds: f32) {
        let elapsed = if elapsed_seconds.is_finite() {
            elapsed_seconds.max(0.0)
        } else {
            0.0
        };

        if sample.calories_per_minute.is_finite() {
            self.total_calories +=
                f64::from(sample.calories_per_minute) * f64::from(elapsed) / f64::from(SECONDS_PER_MINUTE);
        }

        let whole_minutes = (elapsed / SECONDS_PER_MINUTE).floor() as u64;
        *self.minutes_mut(sample.state) += whole_minutes;

        let level = if sample.activity_level.is_finite() {
            sample.activity_level
        } else {
            0.0
        };
        self.peak_activity_level = self.peak_activity_level.max(level);

        let n = self.sample_count as f64;
        let mean = (f64::from(self.average_activity_level) * n + f64::from(level)) / (n + 1.0);
        self.average_activity_level = mean as f32;
        self.sample_count += 1;

        self.last_updated = Utc::now();
    }

    /// Replace the step total
    pub fn update_steps(&mut self, steps: u64) {
        self.total_steps = steps;
        self.last_updated = Utc::now();
    }

    /// Minutes spent in `state`
    pub fn minutes(&self, state: ActivityState) -> u64 {
        match state {
            ActivityState::Resting => self.resting_minutes,
            ActivityState::Light => self.light_minutes,
            ActivityState::Moderate => self.moderate_minutes,
            ActivityState::Vigorous => self.vigorous_minutes,
        }
    }

    fn minutes_mut(&mut self, state: ActivityState) -> &mut u64 {
        match state {
            ActivityState::Resting => &mut self.resting_minutes,
            ActivityState::Light => &mut self.light_minutes,
            ActivityState::Moderate => &mut self.moderate_minutes,
            ActivityState::Vigorous => &mut self.vigorous_minutes,
        }
    }

    /// Light + moderate + vigorous minutes
    pub fn active_minutes(&self) -> u64 {
        self.light_minutes + self.moderate_minutes + self.vigorous_minutes
    }

    /// All tracked minutes
    pub fn total_minutes(&self) -> u64 {
        self.resting_minutes + self.active_minutes()
    }
}

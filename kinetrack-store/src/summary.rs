//! Rolling multi-day summary
//!
//! Built on demand from the newest archived days plus today. Never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::DailyRecord;

/// Totals and averages over a window of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// First day in the window; `None` when there are no days
    pub start_date: Option<NaiveDate>,
    /// Last day in the window
    pub end_date: Option<NaiveDate>,
    /// Records in the window
    pub days: usize,
    /// Kilocalories across the window
    pub total_calories: f64,
    /// Steps across the window
    pub total_steps: u64,
    /// Resting minutes across the window
    pub resting_minutes: u64,
    /// Light minutes across the window
    pub light_minutes: u64,
    /// Moderate minutes across the window
    pub moderate_minutes: u64,
    /// Vigorous minutes across the window
    pub vigorous_minutes: u64,
    /// `total_calories / days`
    pub average_daily_calories: f64,
    /// `total_steps / days`
    pub average_daily_steps: f64,
    /// Mean of the daily averages
    pub average_activity_level: f32,
    /// Highest daily peak
    pub peak_activity_level: f32,
    /// Light + moderate + vigorous minutes
    pub active_minutes: u64,
}

impl WeeklySummary {
    /// Aggregate records given oldest first
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        let mut summary = Self::empty();
        let mut level_sum = 0.0f64;

        for record in records {
            if summary.start_date.is_none() {
                summary.start_date = Some(record.date);
            }
            summary.end_date = Some(record.date);
            summary.days += 1;

            summary.total_calories += record.total_calories;
            summary.total_steps += record.total_steps;
            summary.resting_minutes += record.resting_minutes;
            summary.light_minutes += record.light_minutes;
            summary.moderate_minutes += record.moderate_minutes;
            summary.vigorous_minutes += record.vigorous_minutes;
            summary.peak_activity_level = summary.peak_activity_level.max(record.peak_activity_level);
            level_sum += f64::from(record.average_activity_level);
        }

        if summary.days > 0 {
            let days = summary.days as f64;
            summary.average_daily_calories = summary.total_calories / days;
            summary.average_daily_steps = summary.total_steps as f64 / days;
            summary.average_activity_level = (level_sum / days) as f32;
        }
        summary.active_minutes =
            summary.light_minutes + summary.moderate_minutes + summary.vigorous_minutes;

        summary
    }

    fn empty() -> Self {
        Self {
            start_date: None,
            end_date: None,
            days: 0,
            total_calories: 0.0,
            total_steps: 0,
            resting_minutes: 0,
            light_minutes: 0,
            moderate_minutes: 0,
            vigorous_minutes: 0,
            average_daily_calories: 0.0,
            average_daily_steps: 0.0,
            average_activity_level: 0.0,
            peak_activity_level: 0.0,
            active_minutes: 0,
        }
    }
}

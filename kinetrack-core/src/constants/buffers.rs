//! Buffer Sizes and Retention Limits

/// Number of raw activity scores averaged by the temporal smoother.
///
/// At the 1 Hz tick rate this is a 30 second window.
pub const SMOOTHING_WINDOW_SIZE: usize = 30;

/// Maximum number of archived daily records kept in history.
pub const HISTORY_CAPACITY_DAYS: usize = 30;

/// Number of days covered by a weekly summary, today included.
pub const SUMMARY_WINDOW_DAYS: usize = 7;

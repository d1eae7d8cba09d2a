//! Daily Aggregation Store
//!
//! ## Overview
//!
//! Holds today's [`DailyRecord`] and a bounded [`HistoryLog`] of past days,
//! folds pipeline output into them and mirrors both to a [`KeyValueStore`].
//!
//! ```text
//!            fold(today, sample)
//!                    │
//!          ┌─────────▼──────────┐   newer date?     ┌──────────────┐
//!          │   current record   │ ────────────────→ │ history (30) │
//!          └─────────┬──────────┘     archive       └──────┬───────┘
//!                    │ persist every write                 │ persist on change
//!                    ▼                                     ▼
//!        "kinetrack.current_record"              "kinetrack.history"
//! ```
//!
//! ## Dates
//!
//! Only a date later than the current record's retires it, so history stays
//! in calendar order with one record per day. A tick dated earlier (a host
//! that read the clock just before midnight and wrote just after) folds into
//! the archived record for that day, or into the current record when that
//! day is no longer held.
//!
//! ## Concurrency
//!
//! A foreground and a background tracker may share one store through an
//! `Arc`. Writes take an `RwLock` write guard for the whole
//! rollover-fold-persist step, so persisted values never go backwards.
//! Reads clone a snapshot under a read guard. A poisoned lock is recovered:
//! the state behind it is plain data and every mutation leaves it valid.
//!
//! ## Failure Semantics
//!
//! - Unreadable or corrupt persisted data: start from a fresh record or an
//!   empty history and log a warning.
//! - Failed writes: the in-memory state keeps the update, the error is
//!   returned, and the next write or [`DailyStore::flush`] retries it.
//!
//! Same-day folds write only the current record. The history array is
//! rewritten after a rollover, a late tick into an archived day, or a failed
//! history write.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use kinetrack_core::{
    constants::{HISTORY_CAPACITY_DAYS, SUMMARY_WINDOW_DAYS},
    ActivitySample,
};

use crate::{
    errors::{StoreError, StoreResult},
    history::HistoryLog,
    persistence::KeyValueStore,
    record::DailyRecord,
    summary::WeeklySummary,
};

/// Key of the persisted current-day record
pub const CURRENT_RECORD_KEY: &str = "kinetrack.current_record";

/// Key of the persisted history array
pub const HISTORY_KEY: &str = "kinetrack.history";

/// Store sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Archived days kept
    pub history_capacity: usize,
    /// Days covered by the rolling summary, today included
    pub summary_days: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY_DAYS,
            summary_days: SUMMARY_WINDOW_DAYS,
        }
    }
}

impl StoreConfig {
    /// Set the number of archived days kept
    pub fn with_history_capacity(mut self, days: usize) -> Self {
        self.history_capacity = days;
        self
    }

    /// Set the summary window length
    pub fn with_summary_days(mut self, days: usize) -> Self {
        self.summary_days = days;
        self
    }

    /// Reject zero-length history or summary windows
    pub fn validate(&self) -> StoreResult<()> {
        if self.history_capacity == 0 {
            return Err(StoreError::Config("history_capacity must be at least 1".into()));
        }
        if self.summary_days == 0 {
            return Err(StoreError::Config("summary_days must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct State {
    current: Option<DailyRecord>,
    history: HistoryLog,
    /// Current record newer than the backend
    record_dirty: bool,
    /// History newer than the backend
    history_dirty: bool,
}

/// Where a dated update lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Current,
    Archived,
}

/// Shared daily aggregation store
#[derive(Debug)]
pub struct DailyStore<S: KeyValueStore> {
    backend: S,
    config: StoreConfig,
    state: RwLock<State>,
}

impl<S: KeyValueStore> DailyStore<S> {
    /// Open with default sizing, loading whatever the backend holds
    pub fn open(backend: S) -> StoreResult<Self> {
        Self::open_with_config(backend, StoreConfig::default())
    }

    /// Open with explicit sizing
    pub fn open_with_config(backend: S, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let current: Option<DailyRecord> = load(&backend, CURRENT_RECORD_KEY);
        let archived: Option<Vec<DailyRecord>> = load(&backend, HISTORY_KEY);
        let history = archived
            .map(|records| HistoryLog::from_records(records, config.history_capacity))
            .unwrap_or_else(|| HistoryLog::with_capacity(config.history_capacity));

        debug!(
            "Opened daily store: current={:?}, {} archived days",
            current.as_ref().map(|r| r.date),
            history.len()
        );

        Ok(Self {
            backend,
            config,
            state: RwLock::new(State {
                current,
                history,
                record_dirty: false,
                history_dirty: false,
            }),
        })
    }

    /// The record for `today`, archiving the previous day's first if `today`
    /// is a later date.
    ///
    /// An earlier date returns that day's archived record when history still
    /// holds it, otherwise the current record.
    pub fn get_or_create(&self, today: NaiveDate) -> DailyRecord {
        let mut state = self.write();
        if self.roll_over(&mut state, today) {
            if let Err(e) = self.persist(&mut state) {
                warn!("Failed to persist day rollover: {e}");
            }
        }
        record_for(&mut state, today).1.clone()
    }

    /// Fold one pipeline tick into today's record.
    ///
    /// `Err` means the update is held in memory but was not persisted.
    pub fn fold(
        &self,
        today: NaiveDate,
        sample: &ActivitySample,
        elapsed_seconds: f32,
    ) -> StoreResult<()> {
        let mut state = self.write();
        self.roll_over(&mut state, today);
        let (slot, record) = record_for(&mut state, today);
        record.fold(sample, elapsed_seconds);
        state.mark_dirty(slot);
        self.persist(&mut state)
    }

    /// Replace today's step total
    pub fn update_steps(&self, today: NaiveDate, steps: u64) -> StoreResult<()> {
        let mut state = self.write();
        self.roll_over(&mut state, today);
        let (slot, record) = record_for(&mut state, today);
        record.update_steps(steps);
        state.mark_dirty(slot);
        self.persist(&mut state)
    }

    /// Snapshot of the current record, if any
    pub fn today(&self) -> Option<DailyRecord> {
        self.read().current.clone()
    }

    /// Snapshot of archived days, oldest first
    pub fn history(&self) -> Vec<DailyRecord> {
        self.read().history.to_vec()
    }

    /// Summary over the newest `summary_days` records including today
    pub fn weekly_summary(&self) -> WeeklySummary {
        let state = self.read();
        let days = self.config.summary_days;

        match &state.current {
            Some(current) => WeeklySummary::from_records(
                state
                    .history
                    .latest(days.saturating_sub(1))
                    .chain(std::iter::once(current)),
            ),
            None => WeeklySummary::from_records(state.history.latest(days)),
        }
    }

    /// Write whatever an earlier failure left unpersisted
    pub fn flush(&self) -> StoreResult<()> {
        let mut state = self.write();
        self.persist(&mut state)
    }

    /// True when an earlier write failed and has not been retried
    pub fn is_dirty(&self) -> bool {
        let state = self.read();
        state.record_dirty || state.history_dirty
    }

    /// Sizing this store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying key-value backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Archive the current record if `today` is a later day.
    /// Returns whether anything moved.
    fn roll_over(&self, state: &mut State, today: NaiveDate) -> bool {
        let stale = matches!(&state.current, Some(record) if today > record.date);
        if !stale {
            return false;
        }

        if let Some(previous) = state.current.take() {
            info!(
                "Day rollover {} -> {}: archiving {:.1} kcal, {} steps",
                previous.date, today, previous.total_calories, previous.total_steps
            );
            state.history.push(previous);
        }
        state.current = Some(DailyRecord::new(today));
        state.mark_dirty(Slot::Current);
        state.mark_dirty(Slot::Archived);
        true
    }

    fn persist(&self, state: &mut State) -> StoreResult<()> {
        let result = self.write_backend(state);
        if let Err(e) = &result {
            warn!("Persisting daily store failed, keeping state in memory: {e}");
        }
        result
    }

    /// Write the dirty keys, clearing each flag once its write lands
    fn write_backend(&self, state: &mut State) -> StoreResult<()> {
        // History first: a failure after it leaves at worst a record that is
        // both archived and current, which the next rollover overwrites
        if state.history_dirty {
            let history = serde_json::to_string(&state.history.to_vec())?;
            self.backend.put(HISTORY_KEY, &history)?;
            state.history_dirty = false;
        }

        if state.record_dirty {
            match &state.current {
                Some(record) => {
                    let json = serde_json::to_string(record)?;
                    self.backend.put(CURRENT_RECORD_KEY, &json)?;
                }
                None => self.backend.remove(CURRENT_RECORD_KEY)?,
            }
            state.record_dirty = false;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn mark_dirty(&mut self, slot: Slot) {
        match slot {
            Slot::Current => self.record_dirty = true,
            Slot::Archived => self.history_dirty = true,
        }
    }
}

/// The record an update dated `today` belongs to, after any rollover
fn record_for(state: &mut State, today: NaiveDate) -> (Slot, &mut DailyRecord) {
    let late = matches!(&state.current, Some(record) if today < record.date);
    let State {
        current, history, ..
    } = state;

    if late {
        if let Some(record) = history.find_mut(today) {
            debug!("Late update for {today} folded into its archived record");
            return (Slot::Archived, record);
        }
    }
    (
        Slot::Current,
        current.get_or_insert_with(|| DailyRecord::new(today)),
    )
}

/// Load and decode a persisted value; any failure yields `None`
fn load<T: DeserializeOwned, B: KeyValueStore>(backend: &B, key: &str) -> Option<T> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Could not read {key}, starting fresh: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding corrupt {key}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use kinetrack_core::ActivityState;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn tick(level: f32) -> ActivitySample {
        ActivitySample {
            activity_level: level,
            state: kinetrack_core::classify(level),
            calories_per_minute: 3.0,
            movement_intensity: 0.0,
            rotation_rate: 0.0,
            ambient_light: 100.0,
            in_pocket: false,
            timestamp_ms: 0,
            elapsed_ms: 1000,
        }
    }

    #[test]
    fn get_or_create_is_lazy_and_stable() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        assert!(store.today().is_none());

        let first = store.get_or_create(date(1));
        let again = store.get_or_create(date(1));
        assert_eq!(first.date, again.date);
        assert_eq!(store.history().len(), 0);
    }

    #[test]
    fn rollover_archives_previous_day() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.fold(date(1), &tick(0.2), 60.0).unwrap();
        store.update_steps(date(1), 2500).unwrap();
        let before = store.today().unwrap();

        let today = store.get_or_create(date(2));
        let expected = DailyRecord {
            last_updated: today.last_updated,
            ..DailyRecord::new(date(2))
        };
        assert_eq!(today, expected);

        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], before);
    }

    #[test]
    fn same_day_fold_writes_only_current_record() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.fold(date(3), &tick(0.5), 1.0).unwrap();

        let raw = store.backend().get(CURRENT_RECORD_KEY).unwrap().unwrap();
        assert!(raw.contains("\"2024-06-03\""));
        assert_eq!(store.backend().get(HISTORY_KEY).unwrap(), None);
        assert!(!store.is_dirty());

        store.fold(date(4), &tick(0.5), 1.0).unwrap();
        let archived: Vec<DailyRecord> =
            serde_json::from_str(&store.backend().get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].date, date(3));
    }

    #[test]
    fn earlier_date_never_archives() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.fold(date(1), &tick(0.2), 1.0).unwrap();
        store.fold(date(2), &tick(0.2), 1.0).unwrap();
        store.fold(date(1), &tick(0.6), 1.0).unwrap();
        store.fold(date(2), &tick(0.2), 1.0).unwrap();

        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, date(1));
        assert_eq!(history[0].sample_count, 2);
        assert_eq!(history[0].peak_activity_level, 0.6);

        let today = store.today().unwrap();
        assert_eq!(today.date, date(2));
        assert_eq!(today.sample_count, 2);
        assert_eq!(store.weekly_summary().days, 2);
    }

    #[test]
    fn unheld_earlier_date_folds_into_current() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.fold(date(10), &tick(0.2), 1.0).unwrap();
        store.fold(date(8), &tick(0.2), 1.0).unwrap();

        assert!(store.history().is_empty());
        let today = store.today().unwrap();
        assert_eq!(today.date, date(10));
        assert_eq!(today.sample_count, 2);
        assert_eq!(store.get_or_create(date(8)).date, date(10));
    }

    #[test]
    fn summary_includes_today_and_caps_window() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        for day in 1..=10 {
            store.fold(date(day), &tick(0.1 * (day % 5) as f32), 60.0).unwrap();
        }

        let summary = store.weekly_summary();
        assert_eq!(summary.days, 7);
        assert_eq!(summary.start_date, Some(date(4)));
        assert_eq!(summary.end_date, Some(date(10)));
    }

    #[test]
    fn summary_with_short_history() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.fold(date(1), &tick(0.2), 60.0).unwrap();
        store.fold(date(2), &tick(0.4), 60.0).unwrap();

        let summary = store.weekly_summary();
        assert_eq!(summary.days, 2);
        assert!((summary.total_calories - 6.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = StoreConfig::default().with_history_capacity(0);
        assert!(matches!(
            DailyStore::open_with_config(MemoryStore::new(), config),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn steps_replace_not_add() {
        let store = DailyStore::open(MemoryStore::new()).unwrap();
        store.update_steps(date(5), 4000).unwrap();
        store.update_steps(date(5), 4500).unwrap();

        let today = store.today().unwrap();
        assert_eq!(today.total_steps, 4500);
        assert_eq!(today.minutes(ActivityState::Light), 0);
    }
}

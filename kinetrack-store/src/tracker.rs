//! Session lifecycle shared by foreground and background hosts
//!
//! A tracker owns one [`ActivityPipeline`] and shares a [`DailyStore`]. Hosts
//! forward raw sensor callbacks and step counts; the tracker runs the pipeline,
//! folds each tick into today's record and never fails the callback.
//!
//! ```text
//!  foreground host ─→ ActivityTracker ─┐
//!                                      ├─→ Arc<DailyStore> ─→ KeyValueStore
//!  background host ─→ ActivityTracker ─┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Duration, Local, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use kinetrack_core::{
    ActivityPipeline, ActivitySample, PipelineConfig, PipelineMetrics, SensorSample, UserProfile,
};

use crate::{
    errors::{StoreError, StoreResult},
    persistence::KeyValueStore,
    record::DailyRecord,
    store::{DailyStore, StoreConfig},
    summary::WeeklySummary,
};

/// Supplies the calendar date ticks are filed under
pub trait DateSource: Send + Sync {
    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Device-local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDate;

impl DateSource for LocalDate {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable date for tests and replays; clones share one date
#[derive(Debug, Clone)]
pub struct FixedDate {
    date: Arc<Mutex<NaiveDate>>,
}

impl FixedDate {
    /// Start at `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    /// Jump to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move forward by `days` (backwards when negative)
    pub fn advance_days(&self, days: i64) {
        let mut date = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        *date += Duration::days(days);
    }
}

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Host-supplied tracker configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Sensor pipeline settings
    pub pipeline: PipelineConfig,
    /// Store sizing, applied by [`ActivityTracker::from_config`]
    pub store: StoreConfig,
}

impl TrackerConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the pipeline section
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replace the store section
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Validate both sections
    pub fn validate(&self) -> StoreResult<()> {
        self.pipeline
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        self.store.validate()
    }
}

/// Start/stop tracking session over a shared store
///
/// Each tick is folded with its own elapsed time, about one second. Per-state
/// minute counters add `floor(elapsed / 60)` per fold, so at the regular tick
/// rate they stay at zero and only calories, peak and average level grow.
/// Hosts that want minute totals must fold longer intervals through
/// [`DailyStore::fold`] directly.
pub struct ActivityTracker<S: KeyValueStore, D: DateSource = LocalDate> {
    pipeline: ActivityPipeline,
    store: Arc<DailyStore<S>>,
    dates: D,
    tracking: bool,
    persist_failures: u64,
}

impl<S: KeyValueStore, D: DateSource> ActivityTracker<S, D> {
    /// Open a store over `backend` sized by `config.store` and build a
    /// stopped tracker on it.
    ///
    /// Further trackers can share the store through [`ActivityTracker::store`].
    pub fn from_config(config: &TrackerConfig, backend: S, dates: D) -> StoreResult<Self> {
        config.validate()?;
        let store = Arc::new(DailyStore::open_with_config(backend, config.store)?);
        Self::new(config.pipeline.clone(), store, dates)
    }

    /// Build a stopped tracker
    pub fn new(config: PipelineConfig, store: Arc<DailyStore<S>>, dates: D) -> StoreResult<Self> {
        let pipeline =
            ActivityPipeline::new(config).map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            pipeline,
            store,
            dates,
            tracking: false,
            persist_failures: 0,
        })
    }

    /// Begin accepting sensor samples
    pub fn start(&mut self) {
        if self.tracking {
            return;
        }
        self.tracking = true;
        info!("Activity tracking started");
    }

    /// Stop accepting samples and discard session state; today's totals stay
    pub fn stop(&mut self) {
        if !self.tracking {
            return;
        }
        self.tracking = false;
        self.pipeline.reset();
        info!(
            "Activity tracking stopped after {} ticks",
            self.pipeline.metrics().ticks_emitted
        );
    }

    /// True between `start` and `stop`
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Feed one raw sensor sample; returns the tick it produced, if any
    pub fn on_sensor(&mut self, sample: &SensorSample) -> Option<ActivitySample> {
        if !self.tracking {
            return None;
        }

        match self.pipeline.process(sample) {
            Ok(Some(tick)) => {
                let today = self.dates.today();
                if let Err(e) = self.store.fold(today, &tick, tick.elapsed_seconds()) {
                    self.persist_failures += 1;
                    warn!("Activity tick kept in memory only: {e}");
                }
                Some(tick)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Dropping sensor sample: {e}");
                None
            }
        }
    }

    /// Record today's baselined cumulative step count
    pub fn on_step_count(&self, steps: u64) {
        if let Err(e) = self.store.update_steps(self.dates.today(), steps) {
            warn!("Step count kept in memory only: {e}");
        }
    }

    /// Today's record, rolling over first if the date changed
    pub fn today(&self) -> DailyRecord {
        self.store.get_or_create(self.dates.today())
    }

    /// Summary ending today
    pub fn weekly_summary(&self) -> WeeklySummary {
        self.store.get_or_create(self.dates.today());
        self.store.weekly_summary()
    }

    /// Update the body profile used for calorie estimation
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.pipeline.set_profile(profile);
    }

    /// Body profile in use
    pub fn profile(&self) -> &UserProfile {
        self.pipeline.profile()
    }

    /// Pipeline counters for this session
    pub fn metrics(&self) -> &PipelineMetrics {
        self.pipeline.metrics()
    }

    /// Ticks whose store write failed
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    /// The shared store
    pub fn store(&self) -> &Arc<DailyStore<S>> {
        &self.store
    }
}

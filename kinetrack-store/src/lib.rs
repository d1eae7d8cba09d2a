//! Daily Activity Aggregation for KineTrack
//!
//! ## Overview
//!
//! `kinetrack-core` turns sensor samples into one [`ActivitySample`] per
//! second. This crate keeps what those samples add up to:
//!
//! - [`DailyStore`]: today's record plus 30 days of history, persisted as
//!   JSON through any [`KeyValueStore`]
//! - [`WeeklySummary`]: rolling totals over the last 7 days
//! - [`ActivityTracker`]: start/stop session wrapper that both a foreground
//!   app and a background service drive against one shared store
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kinetrack_core::{PipelineConfig, SensorSample};
//! use kinetrack_store::{ActivityTracker, DailyStore, FileStore, LocalDate};
//!
//! let backend = FileStore::open("/var/lib/kinetrack")?;
//! let store = Arc::new(DailyStore::open(backend)?);
//!
//! let mut tracker = ActivityTracker::new(PipelineConfig::default(), store, LocalDate)?;
//! tracker.start();
//!
//! // From the sensor callback:
//! tracker.on_sensor(&SensorSample::accelerometer(0, [0.1, 9.8, 0.4]));
//!
//! let today = tracker.today();
//! println!("{:.0} kcal, {} steps", today.total_calories, today.total_steps);
//! # Ok::<(), kinetrack_store::StoreError>(())
//! ```
//!
//! [`ActivitySample`]: kinetrack_core::ActivitySample

#![warn(missing_docs)]

pub mod errors;
pub mod history;
pub mod persistence;
pub mod record;
pub mod store;
pub mod summary;
pub mod tracker;

pub use errors::{StoreError, StoreResult};
pub use history::HistoryLog;
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use record::DailyRecord;
pub use store::{DailyStore, StoreConfig, CURRENT_RECORD_KEY, HISTORY_KEY};
pub use summary::WeeklySummary;
pub use tracker::{ActivityTracker, DateSource, FixedDate, LocalDate, TrackerConfig};

//! Shared fixtures for store and tracker integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use kinetrack_core::{classify, ActivitySample};
use kinetrack_store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A one-second tick at `level` burning `cpm` kcal/min
pub fn tick(level: f32, cpm: f32) -> ActivitySample {
    ActivitySample {
        activity_level: level,
        state: classify(level),
        calories_per_minute: cpm,
        movement_intensity: level * 15.0,
        rotation_rate: 0.0,
        ambient_light: 250.0,
        in_pocket: false,
        timestamp_ms: 0,
        elapsed_ms: 1000,
    }
}

/// Memory backend whose writes can be switched off
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("storage unavailable".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("storage unavailable".into()));
        }
        self.inner.remove(key)
    }
}

//! Bounded log of archived daily records, oldest first

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::record::DailyRecord;
use kinetrack_core::constants::HISTORY_CAPACITY_DAYS;

/// Ordered, capacity-bounded sequence of past days
///
/// Appending past capacity drops records from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    records: VecDeque<DailyRecord>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY_DAYS)
    }
}

impl HistoryLog {
    /// Empty log holding at most `capacity` records (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from persisted records, keeping the newest `capacity`
    pub fn from_records(records: Vec<DailyRecord>, capacity: usize) -> Self {
        let mut log = Self::with_capacity(capacity);
        for record in records {
            log.push(record);
        }
        log
    }

    /// Append a record and trim the front
    pub fn push(&mut self, record: DailyRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// The newest `n` records, oldest first
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter().skip(self.records.len().saturating_sub(n))
    }

    /// Mutable access to the archived record for `date`
    pub fn find_mut(&mut self, date: NaiveDate) -> Option<&mut DailyRecord> {
        self.records.iter_mut().rev().find(|record| record.date == date)
    }

    /// All records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter()
    }

    /// Number of archived days
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been archived
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Owned copy for serialization and snapshots
    pub fn to_vec(&self) -> Vec<DailyRecord> {
        self.records.iter().cloned().collect()
    }
}

//! In-run duplicate suppression
//!
//! Tracks every dedup key seen during a run and keeps a bounded sample of
//! duplicate rows for the duplicates log. Suppression is exact: every
//! duplicate is rejected regardless of whether its row made it into the
//! sample.

use crate::app::models::DedupKey;
use csv::StringRecord;
use std::collections::HashSet;

/// Exact duplicate tracker for a single run
#[derive(Debug)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
    sample: Vec<StringRecord>,
    sample_cap: usize,
    duplicates_seen: usize,
}

impl Deduplicator {
    pub fn new(sample_cap: usize) -> Self {
        Self {
            seen: HashSet::new(),
            sample: Vec::new(),
            sample_cap,
            duplicates_seen: 0,
        }
    }

    /// Observe one record's key; returns `true` for a first occurrence
    ///
    /// Duplicates are counted and, up to the cap, their raw rows retained
    /// for the duplicates log.
    pub fn observe(&mut self, key: DedupKey, record: &StringRecord) -> bool {
        if self.seen.insert(key) {
            return true;
        }
        self.duplicates_seen += 1;
        if self.sample.len() < self.sample_cap {
            self.sample.push(record.clone());
        }
        false
    }

    /// Distinct keys seen so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Total duplicate occurrences, including those beyond the sample cap
    pub fn duplicate_count(&self) -> usize {
        self.duplicates_seen
    }

    /// Sampled duplicate rows in input order
    pub fn sample(&self) -> &[StringRecord] {
        &self.sample
    }

    /// Consume the tracker, yielding the sampled rows
    pub fn into_sample(self) -> Vec<StringRecord> {
        self.sample
    }
}

//! Header handling for the trip CSV schema
//!
//! Header order is not semantically significant; column names are. The
//! [`TripHeader`] maps names to positions once per run so per-record field
//! access is an O(1) index lookup.

use crate::constants::{DERIVED_COLUMNS, REQUIRED_COLUMNS};
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Parsed input header with by-name column lookup
#[derive(Debug, Clone)]
pub struct TripHeader {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl TripHeader {
    /// Build a header from the first CSV record
    ///
    /// Fails with [`Error::MissingColumn`] if any required column is absent;
    /// this is a run-level prerequisite, not a per-record failure.
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        let columns: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        let index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        for required in REQUIRED_COLUMNS {
            if !index.contains_key(*required) {
                return Err(Error::missing_column(*required));
            }
        }

        Ok(Self { columns, index })
    }

    /// Position of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Input columns in original order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of input columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Output header: input columns in original order plus the five derived
    /// columns appended
    pub fn cleaned_columns(&self) -> Vec<String> {
        let mut columns = self.columns.clone();
        columns.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));
        columns
    }
}

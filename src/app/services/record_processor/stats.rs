//! Run statistics and the end-of-run report
//!
//! `RunStats` is an explicit value owned by the pipeline and returned from
//! its entry point; it is never process-global state. The report body is
//! byte-for-byte reproducible for the same input, so it carries no
//! timestamps.

use crate::constants::DERIVED_COLUMNS;
use std::fmt;

/// Why a record was removed from the pipeline
///
/// Per-record failures are data, not errors: each is counted by reason and
/// the record is discarded while processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// A required field was missing or empty
    MissingField,
    /// Dropoff not strictly after pickup
    Temporal,
    /// Distance outside the configured `(min, max]` range
    Distance,
    /// Fare outside the configured range
    Fare,
    /// Passenger count outside the configured range
    Passengers,
    /// Duration outside the configured range
    Duration,
    /// Derived speed above the hard ceiling
    Speed,
    /// A numeric or time field failed to parse
    Parsing,
    /// Pickup or dropoff location id absent from the zone table
    Location,
    /// Identical dedup key already seen this run
    Duplicate,
    /// Unexpected per-row failure outside the taxonomy
    Other,
}

impl RejectReason {
    /// All reasons in report order
    pub const ALL: &[RejectReason] = &[
        Self::MissingField,
        Self::Temporal,
        Self::Distance,
        Self::Fare,
        Self::Passengers,
        Self::Duration,
        Self::Speed,
        Self::Parsing,
        Self::Location,
        Self::Duplicate,
        Self::Other,
    ];

    /// Machine-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::Temporal => "temporal",
            Self::Distance => "distance",
            Self::Fare => "fare",
            Self::Passengers => "passengers",
            Self::Duration => "duration",
            Self::Speed => "speed",
            Self::Parsing => "parsing",
            Self::Location => "location",
            Self::Duplicate => "duplicate",
            Self::Other => "other",
        }
    }

    /// Heading used in the run report
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MissingField => "Missing Field",
            Self::Temporal => "Temporal",
            Self::Distance => "Distance",
            Self::Fare => "Fare",
            Self::Passengers => "Passengers",
            Self::Duration => "Duration",
            Self::Speed => "Speed",
            Self::Parsing => "Parsing",
            Self::Location => "Location",
            Self::Duplicate => "Duplicate",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Total input records seen
    pub total: usize,
    /// Records that reached the batch writer
    pub kept: usize,
    /// Soft-check warnings issued on kept records
    pub warnings: usize,
    /// Unknown rate codes silently resolved to the default
    pub rate_code_fallbacks: usize,

    // Removal counters by reason
    pub missing_field: usize,
    pub temporal: usize,
    pub distance: usize,
    pub fare: usize,
    pub passengers: usize,
    pub duration: usize,
    pub speed: usize,
    pub parsing: usize,
    pub location: usize,
    pub duplicate: usize,
    pub other: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a removed record by reason
    pub fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::MissingField => self.missing_field += 1,
            RejectReason::Temporal => self.temporal += 1,
            RejectReason::Distance => self.distance += 1,
            RejectReason::Fare => self.fare += 1,
            RejectReason::Passengers => self.passengers += 1,
            RejectReason::Duration => self.duration += 1,
            RejectReason::Speed => self.speed += 1,
            RejectReason::Parsing => self.parsing += 1,
            RejectReason::Location => self.location += 1,
            RejectReason::Duplicate => self.duplicate += 1,
            RejectReason::Other => self.other += 1,
        }
    }

    /// Record a record handed to the batch writer
    pub fn record_kept(&mut self) {
        self.kept += 1;
    }

    /// Record soft-check warnings issued for a validated record
    ///
    /// Counted at validation time, so later gates (duplicate, location)
    /// removing the record do not take its warnings with it.
    pub fn record_warnings(&mut self, warning_count: usize) {
        self.warnings += warning_count;
    }

    /// Record an unknown rate code resolved to the default
    pub fn record_rate_code_fallback(&mut self) {
        self.rate_code_fallbacks += 1;
    }

    /// Removal count for one reason
    pub fn rejections(&self, reason: RejectReason) -> usize {
        match reason {
            RejectReason::MissingField => self.missing_field,
            RejectReason::Temporal => self.temporal,
            RejectReason::Distance => self.distance,
            RejectReason::Fare => self.fare,
            RejectReason::Passengers => self.passengers,
            RejectReason::Duration => self.duration,
            RejectReason::Speed => self.speed,
            RejectReason::Parsing => self.parsing,
            RejectReason::Location => self.location,
            RejectReason::Duplicate => self.duplicate,
            RejectReason::Other => self.other,
        }
    }

    /// Total records removed across all reasons
    pub fn removed(&self) -> usize {
        RejectReason::ALL
            .iter()
            .map(|reason| self.rejections(*reason))
            .sum()
    }

    /// Percentage of input kept; 0 for an empty input rather than dividing
    /// by zero
    pub fn kept_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.kept as f64 / self.total as f64 * 100.0
        }
    }

    /// Nonzero rejection reasons sorted by descending count, for diagnostics
    pub fn rejections_by_count(&self) -> Vec<(RejectReason, usize)> {
        let mut counts: Vec<(RejectReason, usize)> = RejectReason::ALL
            .iter()
            .map(|reason| (*reason, self.rejections(*reason)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Run summary: {} -> {} records ({:.1}% kept) | removed: {} | warnings: {} | rate code fallbacks: {}",
            self.total,
            self.kept,
            self.kept_rate(),
            self.removed(),
            self.warnings,
            self.rate_code_fallbacks
        )
    }

    /// Structured end-of-run report
    ///
    /// Byte-for-byte reproducible given the same input.
    pub fn report(&self) -> String {
        let mut out = String::new();

        out.push_str("Trip Data Cleaning Report\n");
        out.push_str("-------------------------\n\n");

        out.push_str("Summary\n");
        out.push_str("-------\n");
        out.push_str(&format!(
            "Total Records Processed: {}\n",
            group_thousands(self.total)
        ));
        out.push_str(&format!("Records Kept: {}\n", group_thousands(self.kept)));
        out.push_str(&format!(
            "Records Removed: {}\n",
            group_thousands(self.removed())
        ));
        out.push_str(&format!(
            "Warnings Issued: {}\n",
            group_thousands(self.warnings)
        ));
        out.push_str(&format!(
            "Rate Code Fallbacks: {}\n\n",
            group_thousands(self.rate_code_fallbacks)
        ));

        out.push_str("Removal Breakdown\n");
        out.push_str("-----------------\n");
        for reason in RejectReason::ALL {
            out.push_str(&format!(
                "{}: {}\n",
                reason.display_name(),
                group_thousands(self.rejections(*reason))
            ));
        }

        out.push_str("\nDerived Features Added\n");
        out.push_str("----------------------\n");
        for column in DERIVED_COLUMNS {
            out.push_str(column);
            out.push('\n');
        }

        out
    }
}

/// Format a count with thousands separators
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

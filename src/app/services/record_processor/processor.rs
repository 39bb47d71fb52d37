//! Single-pass pipeline orchestration
//!
//! Drives one record at a time through validate, deduplicate, enrich, and
//! the two output streams. Per-record failures are counted and skipped;
//! only I/O and store failures abort the run.

use crate::app::services::record_processor::deduplication::Deduplicator;
use crate::app::services::record_processor::enrichment::enrich;
use crate::app::services::record_processor::stats::{RejectReason, RunStats};
use crate::app::services::record_processor::validator::{ValidationOutcome, Validator};
use crate::app::services::reference::ZoneRegistry;
use crate::app::services::trip_csv::{CleanedWriter, RawRecord, TripHeader};
use crate::app::services::trip_store::BatchWriter;
use crate::config::PipelineConfig;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::Result;
use csv::StringRecord;
use indicatif::ProgressBar;
use std::io::Read;
use tracing::{info, warn};

/// Everything a completed run leaves behind besides its output files
#[derive(Debug)]
pub struct PipelineOutcome {
    pub stats: RunStats,
    /// Sampled duplicate rows for the duplicates log, in input order
    pub duplicate_samples: Vec<StringRecord>,
}

/// One-shot pipeline over a single input stream
///
/// Holds the per-run state (dedup tracker, counters); construct a new
/// pipeline for each input file.
pub struct TripPipeline<'a> {
    validator: Validator,
    dedup: Deduplicator,
    zones: &'a ZoneRegistry,
}

impl<'a> TripPipeline<'a> {
    pub fn new(config: &PipelineConfig, zones: &'a ZoneRegistry) -> Self {
        Self {
            validator: Validator::new(config.thresholds.clone()),
            dedup: Deduplicator::new(config.duplicate_sample_cap),
            zones,
        }
    }

    /// Run the pipeline to completion over one input stream
    ///
    /// Every enriched record is written to the cleaned stream; only records
    /// whose locations resolve against the zone table reach the store
    /// writer. The caller finishes the writers afterwards.
    pub fn run<R: Read>(
        mut self,
        reader: &mut csv::Reader<R>,
        header: &TripHeader,
        cleaned: &mut CleanedWriter,
        writer: &mut BatchWriter<'_>,
        progress: Option<&ProgressBar>,
    ) -> Result<PipelineOutcome> {
        let mut stats = RunStats::new();
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    // A malformed row the reader itself could not produce;
                    // count it and keep going.
                    stats.total += 1;
                    stats.record_rejection(RejectReason::Other);
                    warn!("Skipping unreadable row {}: {e}", stats.total);
                    continue;
                }
            }
            stats.total += 1;

            if let Some(progress) = progress
                && stats.total % PROGRESS_UPDATE_INTERVAL == 0
            {
                progress.set_position(stats.total as u64);
            }

            let raw = RawRecord::new(header, &record);
            let trip = match self.validator.validate(&raw) {
                ValidationOutcome::Accepted { trip, warnings } => {
                    // Soft-check warnings belong to validation, not to
                    // whichever later gate removes the record.
                    stats.record_warnings(warnings.len());
                    trip
                }
                ValidationOutcome::Rejected(reason) => {
                    stats.record_rejection(reason);
                    continue;
                }
            };

            if !self.dedup.observe(raw.dedup_key(), raw.inner()) {
                stats.record_rejection(RejectReason::Duplicate);
                continue;
            }

            let enriched = enrich(trip);

            // The cleaned stream receives every enriched record, including
            // those the store's stricter location gate will reject below.
            cleaned.write_enriched(&record, &enriched.features)?;

            if !self.zones.contains(enriched.trip.pu_location_id)
                || !self.zones.contains(enriched.trip.do_location_id)
            {
                stats.record_rejection(RejectReason::Location);
                continue;
            }

            if writer.add(enriched)? {
                stats.record_rate_code_fallback();
            }
            stats.record_kept();
        }

        if let Some(progress) = progress {
            progress.set_position(stats.total as u64);
        }

        info!("{}", stats.summary());
        Ok(PipelineOutcome {
            stats,
            duplicate_samples: self.dedup.into_sample(),
        })
    }
}

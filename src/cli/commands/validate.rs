//! Validate command: dry-run validation with no outputs written

use crate::app::services::record_processor::{
    Deduplicator, RejectReason, RunStats, ValidationOutcome, Validator,
};
use crate::app::services::trip_csv::{self, RawRecord, TripHeader};
use crate::cli::args::ValidateArgs;
use crate::cli::commands::shared;
use crate::config::ValidationThresholds;
use crate::constants::PROFILE_SAMPLE_ROWS;
use crate::Result;
use colored::Colorize;
use csv::StringRecord;
use std::path::Path;
use tracing::info;

/// Run validation and deduplication over an input file, reporting what the
/// full pipeline would remove
///
/// The store's location gate needs the zone table and is not applied here;
/// everything else matches the process command.
pub fn run_validate(args: ValidateArgs) -> Result<RunStats> {
    shared::setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    if args.profile {
        let profile = profile_input(&args.input)?;
        print_profile(&profile);
    }

    let (mut reader, header) = trip_csv::open_reader(&args.input)?;
    let validator = Validator::new(ValidationThresholds::default());
    let mut dedup = Deduplicator::new(0);
    let mut stats = RunStats::new();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(_) => {
                stats.total += 1;
                stats.record_rejection(RejectReason::Other);
                continue;
            }
        }
        stats.total += 1;

        let raw = RawRecord::new(&header, &record);
        match validator.validate(&raw) {
            ValidationOutcome::Accepted { warnings, .. } => {
                stats.record_warnings(warnings.len());
                if dedup.observe(raw.dedup_key(), raw.inner()) {
                    stats.record_kept();
                } else {
                    stats.record_rejection(RejectReason::Duplicate);
                }
            }
            ValidationOutcome::Rejected(reason) => stats.record_rejection(reason),
        }
    }

    info!("{}", stats.summary());
    println!("{}", stats.report());
    Ok(stats)
}

/// Per-column missing-value counts over a sample of the input
#[derive(Debug)]
pub struct InputProfile {
    pub rows_sampled: usize,
    /// (column, missing count) in file column order
    pub missing: Vec<(String, usize)>,
}

/// Count empty fields per column over the first rows of the file
pub fn profile_input(path: &Path) -> Result<InputProfile> {
    let (mut reader, header) = trip_csv::open_reader(path)?;
    profile_rows(&mut reader, &header, PROFILE_SAMPLE_ROWS)
}

fn profile_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    header: &TripHeader,
    sample_rows: usize,
) -> Result<InputProfile> {
    let mut missing = vec![0usize; header.len()];
    let mut rows_sampled = 0;
    let mut record = StringRecord::new();

    while rows_sampled < sample_rows {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(_) => continue,
        }
        rows_sampled += 1;
        for (i, count) in missing.iter_mut().enumerate() {
            let value = record.get(i).unwrap_or("").trim();
            if value.is_empty() {
                *count += 1;
            }
        }
    }

    Ok(InputProfile {
        rows_sampled,
        missing: header
            .columns()
            .iter()
            .cloned()
            .zip(missing)
            .collect(),
    })
}

fn print_profile(profile: &InputProfile) {
    println!(
        "{} (first {} rows)",
        "Input profile".bold(),
        profile.rows_sampled
    );
    for (column, count) in &profile.missing {
        if *count > 0 {
            println!("  {column}: {} missing", count.to_string().yellow());
        }
    }
    println!();
}

//! Process command: the full clean-and-load pipeline

use crate::app::services::record_processor::{RunStats, TripPipeline};
use crate::app::services::reference::{RateCodeRegistry, ZoneRegistry};
use crate::app::services::trip_csv::{self, CleanedWriter};
use crate::app::services::trip_store::{StoreCounts, TripStore, WriteSummary};
use crate::cli::args::ProcessArgs;
use crate::cli::commands::shared;
use crate::config::PipelineConfig;
use crate::Result;
use colored::Colorize;
use indicatif::HumanDuration;
use std::fs;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything a completed process run reports
#[derive(Debug)]
pub struct ProcessingSummary {
    pub stats: RunStats,
    pub write: WriteSummary,
    pub counts: StoreCounts,
    pub elapsed: std::time::Duration,
}

/// Run the full pipeline over one input file
pub fn run_process(args: ProcessArgs) -> Result<ProcessingSummary> {
    let start_time = Instant::now();

    shared::setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting trip processor");
    args.validate()?;

    let config = PipelineConfig::default()
        .with_batch_size(args.batch_size)
        .with_duplicate_sample_cap(args.duplicate_sample);
    config.validate()?;

    // Reference data first; the run is not worth starting without it
    let zones = ZoneRegistry::load_from_csv(&args.zones)?;
    let rate_codes = RateCodeRegistry::default();

    let mut store = TripStore::create(&args.database)?;
    store.load_zones(&zones)?;
    store.load_rate_codes(&rate_codes)?;

    let (mut reader, header) = trip_csv::open_reader(&args.input)?;
    let mut cleaned = CleanedWriter::create(&args.output, &header)?;

    let progress = args.show_progress().then(shared::create_record_progress);

    let mut writer = store.batch_writer(&rate_codes, config.batch_size);
    let pipeline = TripPipeline::new(&config, &zones);
    let outcome = pipeline.run(
        &mut reader,
        &header,
        &mut cleaned,
        &mut writer,
        progress.as_ref(),
    )?;
    let write = writer.finish()?;
    let cleaned_rows = cleaned.finish()?;

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    trip_csv::write_duplicates_log(&args.duplicates_log, &header, &outcome.duplicate_samples)?;

    for (reason, count) in outcome.stats.rejections_by_count() {
        debug!("Removed {count} records: {reason}");
    }

    let report = outcome.stats.report();
    fs::write(&args.report, &report)?;
    info!("Wrote cleaning report to {}", args.report.display());

    let counts = store.verify()?;
    if counts.trips != outcome.stats.kept {
        warn!(
            "Store row count {} does not match kept count {}",
            counts.trips, outcome.stats.kept
        );
    }

    let elapsed = start_time.elapsed();
    if !args.quiet {
        print_summary(&outcome.stats, &write, &counts, cleaned_rows, elapsed);
    }

    Ok(ProcessingSummary {
        stats: outcome.stats,
        write,
        counts,
        elapsed,
    })
}

fn print_summary(
    stats: &RunStats,
    write: &WriteSummary,
    counts: &StoreCounts,
    cleaned_rows: usize,
    elapsed: std::time::Duration,
) {
    println!();
    println!("{}", "Processing complete".bold().green());
    println!(
        "  Records processed:   {}",
        stats.total.to_string().bold()
    );
    println!(
        "  Records kept:        {} ({:.1}%)",
        stats.kept.to_string().green(),
        stats.kept_rate()
    );
    println!(
        "  Records removed:     {}",
        stats.removed().to_string().red()
    );
    println!("  Warnings issued:     {}", stats.warnings);
    println!("  Rate code fallbacks: {}", stats.rate_code_fallbacks);
    println!();
    println!("  Cleaned rows written:  {cleaned_rows}");
    println!(
        "  Store rows committed:  {} in {} batches",
        write.rows_written, write.batches_committed
    );
    if let Some((earliest, latest)) = &counts.pickup_range {
        println!("  Pickup range:          {earliest} to {latest}");
    }
    println!("  Elapsed:               {}", HumanDuration(elapsed));
}

//! Command-line argument definitions for the trip processor
//!
//! Defines the complete CLI interface using the clap derive API.

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_DUPLICATE_SAMPLE_CAP};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the NYC taxi trip processor
///
/// Cleans yellow taxi trip records from CSV, derives analytical features,
/// and bulk-loads the result into a queryable SQLite store.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trip-processor",
    version,
    about = "Clean NYC yellow taxi trip data and load it into a SQLite store",
    long_about = "Processes NYC yellow taxi trip records from CSV: validates each record \
                  against domain thresholds, removes in-run duplicates, derives analytical \
                  features (speed, cost per mile, time bucket, tip percentage, efficiency), \
                  and bulk-loads the cleaned result into a queryable SQLite database with \
                  zone and rate-code reference tables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the trip processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full pipeline: clean, enrich, and load into the store
    Process(ProcessArgs),
    /// Validate an input file and report what the pipeline would remove
    Validate(ValidateArgs),
}

/// Arguments for the process command (main pipeline)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input trip CSV file
    ///
    /// A headered yellow taxi trip file, e.g. yellow_tripdata_2019-01.csv.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input trip CSV file"
    )]
    pub input: PathBuf,

    /// Zone lookup CSV file
    ///
    /// The taxi zone lookup table with LocationID, Borough, Zone and
    /// service_zone columns. Loading fails if the file is missing or empty.
    #[arg(
        short = 'z',
        long = "zones",
        value_name = "FILE",
        help = "Zone lookup CSV file"
    )]
    pub zones: PathBuf,

    /// Cleaned output CSV file
    ///
    /// Receives every record that survives validation and deduplication,
    /// with the five derived columns appended.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "trips_cleaned.csv",
        help = "Cleaned output CSV file"
    )]
    pub output: PathBuf,

    /// SQLite database file to create
    ///
    /// Replaced on every run.
    #[arg(
        long = "database",
        value_name = "FILE",
        default_value = "trips.db",
        help = "SQLite database file to create"
    )]
    pub database: PathBuf,

    /// Duplicates log CSV file
    ///
    /// Receives a bounded sample of removed duplicate rows in the input
    /// schema. Not created when no duplicates are found.
    #[arg(
        long = "duplicates-log",
        value_name = "FILE",
        default_value = "duplicates_log.csv",
        help = "Duplicates log CSV file"
    )]
    pub duplicates_log: PathBuf,

    /// Cleaning report file
    ///
    /// Plain-text end-of-run report, reproducible for the same input.
    #[arg(
        long = "report",
        value_name = "FILE",
        default_value = "cleaning_report.txt",
        help = "Cleaning report output file"
    )]
    pub report: PathBuf,

    /// Records per store transaction
    #[arg(
        long = "batch-size",
        value_name = "COUNT",
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Records per store transaction"
    )]
    pub batch_size: usize,

    /// Maximum duplicate rows kept for the duplicates log
    ///
    /// Duplicates beyond the cap are still counted and removed; only the
    /// log sample is bounded.
    #[arg(
        long = "duplicate-sample",
        value_name = "COUNT",
        default_value_t = DEFAULT_DUPLICATE_SAMPLE_CAP,
        help = "Maximum duplicate rows kept for the duplicates log"
    )]
    pub duplicate_sample: usize,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command (no outputs written)
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input trip CSV file
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input trip CSV file"
    )]
    pub input: PathBuf,

    /// Profile missing values in a sample of the input
    ///
    /// Reads the first rows of the file and reports per-column null counts
    /// before validation runs.
    #[arg(long = "profile", help = "Report per-column missing values in a sample")]
    pub profile: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if !self.zones.exists() {
            return Err(Error::configuration(format!(
                "Zone lookup file does not exist: {}",
                self.zones.display()
            )));
        }

        if self.batch_size == 0 {
            return Err(Error::configuration(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

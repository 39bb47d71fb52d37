//! Trip CSV input and output streams
//!
//! This module owns all delimited I/O for the pipeline:
//! - [`open_reader`] - headered input stream with required-column validation
//! - [`CleanedWriter`] - cleaned output, input schema plus five derived columns
//! - [`write_duplicates_log`] - bounded sample of duplicate rows, input schema

pub mod header;
pub mod record;

#[cfg(test)]
pub mod tests;

pub use header::TripHeader;
pub use record::RawRecord;

use crate::app::models::DerivedFeatures;
use crate::{Error, Result};
use csv::{Reader, StringRecord, Writer};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Open a trip CSV for reading and validate its header
///
/// Fails fatally if the file does not exist, cannot be opened, or lacks a
/// required column.
pub fn open_reader(path: &Path) -> Result<(Reader<File>, TripHeader)> {
    if !path.exists() {
        return Err(Error::file_not_found(path.to_string_lossy().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to open trip CSV".to_string(),
                Some(e),
            )
        })?;

    let headers = reader.headers().map_err(|e| {
        Error::csv_parsing(
            path.to_string_lossy().to_string(),
            "Failed to read trip CSV header".to_string(),
            Some(e),
        )
    })?;
    let header = TripHeader::from_record(headers)?;

    Ok((reader, header))
}

/// Writer for the cleaned output stream
///
/// Emits the input schema unchanged plus exactly five appended derived
/// columns: trip_speed_mph, cost_per_mile, time_category, tip_percentage,
/// efficiency_score.
pub struct CleanedWriter {
    writer: Writer<File>,
    rows_written: usize,
}

impl CleanedWriter {
    /// Create the cleaned output file and write its header row
    pub fn create(path: &Path, header: &TripHeader) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().from_path(path).map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to create cleaned output".to_string(),
                Some(e),
            )
        })?;
        writer.write_record(header.cleaned_columns())?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Append one enriched row: original fields followed by derived values
    pub fn write_enriched(
        &mut self,
        record: &StringRecord,
        features: &DerivedFeatures,
    ) -> Result<()> {
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.push(format_metric(features.speed_mph));
        row.push(format_metric(features.cost_per_mile));
        row.push(features.time_category.as_str().to_string());
        row.push(format_metric(features.tip_percentage));
        row.push(format_metric(features.efficiency_score));
        self.writer.write_record(&row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered rows to disk
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Write the duplicates log: sampled duplicate rows in original row order,
/// same schema as the input
///
/// No file is created when the sample is empty. Returns the number of rows
/// written.
pub fn write_duplicates_log(
    path: &Path,
    header: &TripHeader,
    samples: &[StringRecord],
) -> Result<usize> {
    if samples.is_empty() {
        return Ok(0);
    }

    let mut writer = csv::WriterBuilder::new().from_path(path).map_err(|e| {
        Error::csv_parsing(
            path.to_string_lossy().to_string(),
            "Failed to create duplicates log".to_string(),
            Some(e),
        )
    })?;
    writer.write_record(header.columns())?;
    for record in samples {
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!(
        "Saved {} duplicate samples to {}",
        samples.len(),
        path.display()
    );
    Ok(samples.len())
}

/// Format a derived numeric value with two decimal places
fn format_metric(value: f64) -> String {
    format!("{value:.2}")
}

//! Trip Processor Library
//!
//! A Rust library for cleaning NYC yellow taxi trip records and bulk-loading
//! them into a queryable SQLite store.
//!
//! This library provides tools for:
//! - Parsing headered trip CSV files with field access by column name
//! - Loading and indexing zone and rate-code reference data for O(1) lookups
//! - Validating records against configurable domain thresholds
//! - Deriving analytical features (speed, cost, time bucket, tip, efficiency)
//! - Suppressing duplicate trips within a run
//! - Writing fixed-size transactional batches with referential checks
//! - Comprehensive error handling and run reporting

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod record_processor;
        pub mod reference;
        pub mod trip_csv;
        pub mod trip_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DedupKey, EnrichedTrip, TimeCategory, TripCandidate};
pub use config::{PipelineConfig, ValidationThresholds};

/// Result type alias for the trip processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trip processing operations
///
/// These cover run-level failures only. Per-record problems (bad thresholds,
/// parse failures, duplicates) are pipeline data, tracked through
/// [`app::services::record_processor::stats::RejectReason`] and never abort
/// a run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input header is missing a required column
    #[error("Input is missing required column '{column}'")]
    MissingColumn { column: String },

    /// Reference dataset error (zones or rate codes)
    #[error("Reference data error: {message}")]
    ReferenceData { message: String },

    /// SQLite store error
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a reference data error
    pub fn reference_data(message: impl Into<String>) -> Self {
        Self::ReferenceData {
            message: message.into(),
        }
    }

    /// Create a store error with context
    pub fn store(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store {
            message: "SQLite operation failed".to_string(),
            source: error,
        }
    }
}

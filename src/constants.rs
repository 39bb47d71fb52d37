//! Application constants for the trip processor
//!
//! This module contains column names, validation threshold defaults,
//! and fixed reference values used throughout the pipeline.

// =============================================================================
// Trip CSV Column Names
// =============================================================================

/// Column names in the yellow taxi trip schema
pub mod columns {
    // Temporal columns
    pub const PICKUP_DATETIME: &str = "tpep_pickup_datetime";
    pub const DROPOFF_DATETIME: &str = "tpep_dropoff_datetime";

    // Core trip measurements
    pub const TRIP_DISTANCE: &str = "trip_distance";
    pub const FARE_AMOUNT: &str = "fare_amount";
    pub const PASSENGER_COUNT: &str = "passenger_count";
    pub const TIP_AMOUNT: &str = "tip_amount";
    pub const TOTAL_AMOUNT: &str = "total_amount";

    // Reference columns
    pub const PU_LOCATION_ID: &str = "PULocationID";
    pub const DO_LOCATION_ID: &str = "DOLocationID";
    pub const RATE_CODE_ID: &str = "RatecodeID";
    pub const VENDOR_ID: &str = "VendorID";
    pub const PAYMENT_TYPE: &str = "payment_type";
    pub const STORE_AND_FWD_FLAG: &str = "store_and_fwd_flag";

    // Surcharge columns
    pub const EXTRA: &str = "extra";
    pub const MTA_TAX: &str = "mta_tax";
    pub const TOLLS_AMOUNT: &str = "tolls_amount";
    pub const IMPROVEMENT_SURCHARGE: &str = "improvement_surcharge";
    pub const CONGESTION_SURCHARGE: &str = "congestion_surcharge";
}

/// Column names in the zone lookup table
pub mod zone_columns {
    pub const LOCATION_ID: &str = "LocationID";
    pub const BOROUGH: &str = "Borough";
    pub const ZONE: &str = "Zone";
    pub const SERVICE_ZONE: &str = "service_zone";
}

/// Columns that must be present and non-empty for a record to be considered
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::PICKUP_DATETIME,
    columns::DROPOFF_DATETIME,
    columns::TRIP_DISTANCE,
    columns::FARE_AMOUNT,
    columns::PU_LOCATION_ID,
    columns::DO_LOCATION_ID,
];

/// Derived columns appended to the cleaned output, in order
pub const DERIVED_COLUMNS: &[&str] = &[
    "trip_speed_mph",
    "cost_per_mile",
    "time_category",
    "tip_percentage",
    "efficiency_score",
];

/// Timestamp format used by the trip data
pub const TRIP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Validation Threshold Defaults (domain-informed)
// =============================================================================

/// Distance in miles, exclusive lower bound
pub const DEFAULT_MIN_DISTANCE: f64 = 0.1;
pub const DEFAULT_MAX_DISTANCE: f64 = 100.0;

/// Fare in dollars, inclusive bounds
pub const DEFAULT_MIN_FARE: f64 = 2.5;
pub const DEFAULT_MAX_FARE: f64 = 500.0;

pub const DEFAULT_MIN_PASSENGERS: i64 = 1;
pub const DEFAULT_MAX_PASSENGERS: i64 = 6;

/// Duration in wall-clock minutes, inclusive bounds
pub const DEFAULT_MIN_DURATION_MINUTES: f64 = 1.0;
pub const DEFAULT_MAX_DURATION_MINUTES: f64 = 480.0;

/// Hard ceiling on derived speed
pub const DEFAULT_MAX_SPEED_MPH: f64 = 100.0;

/// Low-speed sanity floor, warning only
pub const DEFAULT_MIN_SPEED_MPH: f64 = 0.5;

/// Tip-to-fare ratio bounds, warning only
pub const DEFAULT_MIN_TIP_RATIO: f64 = -0.1;
pub const DEFAULT_MAX_TIP_RATIO: f64 = 2.0;

/// Tolerance in dollars for `|total - fare - tip|` before a surcharge
/// mismatch warning is issued
pub const TOTAL_MISMATCH_TOLERANCE: f64 = 5.0;

// =============================================================================
// Pipeline Configuration Defaults
// =============================================================================

/// Records per store transaction
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Maximum duplicate rows retained for the duplicates log; duplicates beyond
/// the cap are still counted and rejected
pub const DEFAULT_DUPLICATE_SAMPLE_CAP: usize = 1000;

/// Rows sampled for the basic input profile
pub const PROFILE_SAMPLE_ROWS: usize = 1000;

/// Progress bar update interval (number of processed records)
pub const PROGRESS_UPDATE_INTERVAL: usize = 10_000;

// =============================================================================
// Rate Code Reference
// =============================================================================

/// Fallback rate code applied when a record carries an unknown or missing code
pub const DEFAULT_RATE_CODE: i64 = 1;

/// The fixed rate-code enumeration
pub const RATE_CODES: &[(i64, &str)] = &[
    (1, "Standard rate"),
    (2, "JFK"),
    (3, "Newark"),
    (4, "Nassau or Westchester"),
    (5, "Negotiated fare"),
    (6, "Group ride"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_are_trip_columns() {
        assert!(REQUIRED_COLUMNS.contains(&columns::PICKUP_DATETIME));
        assert!(REQUIRED_COLUMNS.contains(&columns::DROPOFF_DATETIME));
        assert!(REQUIRED_COLUMNS.contains(&columns::TRIP_DISTANCE));
        assert!(REQUIRED_COLUMNS.contains(&columns::FARE_AMOUNT));
        assert!(REQUIRED_COLUMNS.contains(&columns::PU_LOCATION_ID));
        assert!(REQUIRED_COLUMNS.contains(&columns::DO_LOCATION_ID));
        assert_eq!(REQUIRED_COLUMNS.len(), 6);
    }

    #[test]
    fn test_derived_columns_order() {
        assert_eq!(
            DERIVED_COLUMNS,
            &[
                "trip_speed_mph",
                "cost_per_mile",
                "time_category",
                "tip_percentage",
                "efficiency_score",
            ]
        );
    }

    #[test]
    fn test_rate_code_table() {
        assert_eq!(RATE_CODES.len(), 6);
        assert!(RATE_CODES.iter().any(|(id, _)| *id == DEFAULT_RATE_CODE));
    }
}

//! Tests for validation, enrichment, deduplication, statistics, and the
//! assembled pipeline

pub mod processor_tests;
pub mod validator_tests;

use crate::app::models::TripCandidate;
use crate::app::services::trip_csv::TripHeader;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

/// Input columns used across these tests, in file order
pub const TEST_COLUMNS: &[&str] = &[
    "VendorID",
    "tpep_pickup_datetime",
    "tpep_dropoff_datetime",
    "passenger_count",
    "trip_distance",
    "RatecodeID",
    "store_and_fwd_flag",
    "PULocationID",
    "DOLocationID",
    "payment_type",
    "fare_amount",
    "tip_amount",
    "total_amount",
];

pub fn test_header() -> TripHeader {
    TripHeader::from_record(&StringRecord::from(TEST_COLUMNS.to_vec()))
        .expect("test header is valid")
}

pub fn row(values: &[&str]) -> StringRecord {
    StringRecord::from(values.to_vec())
}

/// A row that passes every hard and soft check
pub fn valid_row() -> StringRecord {
    row(&[
        "1",
        "2019-01-15 08:00:00",
        "2019-01-15 08:10:00",
        "1",
        "2.0",
        "1",
        "N",
        "100",
        "200",
        "1",
        "10.0",
        "2.0",
        "12.0",
    ])
}

/// Build a `valid_row` variant with one column replaced
pub fn row_with(column: &str, value: &str) -> StringRecord {
    let index = TEST_COLUMNS
        .iter()
        .position(|c| *c == column)
        .expect("known test column");
    let values: Vec<String> = valid_row()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == index {
                value.to_string()
            } else {
                v.to_string()
            }
        })
        .collect();
    StringRecord::from(values)
}

pub fn dt(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 1, 15)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// A typed candidate matching `valid_row`
pub fn valid_candidate() -> TripCandidate {
    TripCandidate {
        vendor_id: Some(1),
        pickup_datetime: dt(8, 0),
        dropoff_datetime: dt(8, 10),
        passenger_count: 1,
        trip_distance: 2.0,
        rate_code_id: Some(1),
        store_and_fwd_flag: Some("N".to_string()),
        pu_location_id: 100,
        do_location_id: 200,
        payment_type: Some(1),
        fare_amount: 10.0,
        extra: None,
        mta_tax: None,
        tip_amount: 2.0,
        tolls_amount: None,
        improvement_surcharge: None,
        total_amount: 12.0,
        congestion_surcharge: None,
    }
}

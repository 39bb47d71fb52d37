//! Tests for trip CSV input and output handling


use super::TripHeader;
use csv::StringRecord;

/// A minimal but complete trip header for tests
pub fn test_header() -> TripHeader {
    TripHeader::from_record(&StringRecord::from(vec![
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
    ]))
    .unwrap()
}

//! Validator behavior: hard checks, attribution order, soft warnings

use super::{row_with, test_header, valid_row};
use crate::app::services::record_processor::validator::{ValidationOutcome, Validator, Warning};
use crate::app::services::record_processor::RejectReason;
use crate::app::services::trip_csv::RawRecord;
use crate::config::ValidationThresholds;
use csv::StringRecord;

fn validate(record: &StringRecord) -> ValidationOutcome {
    let header = test_header();
    let raw = RawRecord::new(&header, record);
    Validator::new(ValidationThresholds::default()).validate(&raw)
}

fn assert_rejected(record: &StringRecord, reason: RejectReason) {
    match validate(record) {
        ValidationOutcome::Rejected(actual) => assert_eq!(actual, reason),
        other => panic!("expected rejection with {reason}, got {other:?}"),
    }
}

#[test]
fn test_valid_row_accepted_without_warnings() {
    match validate(&valid_row()) {
        ValidationOutcome::Accepted { trip, warnings } => {
            assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
            assert_eq!(trip.vendor_id, Some(1));
            assert_eq!(trip.passenger_count, 1);
            assert_eq!(trip.trip_distance, 2.0);
            assert_eq!(trip.fare_amount, 10.0);
            assert_eq!(trip.pu_location_id, 100);
            assert_eq!(trip.do_location_id, 200);
            assert_eq!(trip.duration_minutes(), 10.0);
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn test_missing_required_field_rejected() {
    assert_rejected(&row_with("fare_amount", ""), RejectReason::MissingField);
    assert_rejected(&row_with("trip_distance", "  "), RejectReason::MissingField);
    assert_rejected(
        &row_with("tpep_pickup_datetime", ""),
        RejectReason::MissingField,
    );
}

#[test]
fn test_missing_optional_field_not_rejected() {
    // Vendor and tip are optional; their absence is not a removal reason
    let outcome = validate(&row_with("VendorID", ""));
    assert!(outcome.is_accepted());

    match validate(&row_with("tip_amount", "")) {
        ValidationOutcome::Accepted { trip, .. } => assert_eq!(trip.tip_amount, 0.0),
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn test_unparseable_fields_rejected_as_parsing() {
    assert_rejected(&row_with("trip_distance", "abc"), RejectReason::Parsing);
    assert_rejected(
        &row_with("tpep_dropoff_datetime", "2019-13-99 08:10:00"),
        RejectReason::Parsing,
    );
    assert_rejected(&row_with("PULocationID", "1.5"), RejectReason::Parsing);
    // Malformed optional fields also reject
    assert_rejected(&row_with("RatecodeID", "x"), RejectReason::Parsing);
}

#[test]
fn test_integral_float_text_parses_as_integer() {
    match validate(&row_with("passenger_count", "2.0")) {
        ValidationOutcome::Accepted { trip, .. } => assert_eq!(trip.passenger_count, 2),
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn test_temporal_rejection() {
    // Equal timestamps: dropoff must be strictly after pickup
    assert_rejected(
        &row_with("tpep_dropoff_datetime", "2019-01-15 08:00:00"),
        RejectReason::Temporal,
    );
    assert_rejected(
        &row_with("tpep_dropoff_datetime", "2019-01-15 07:00:00"),
        RejectReason::Temporal,
    );
}

#[test]
fn test_distance_bounds() {
    // Exclusive lower bound: zero and the minimum itself both reject
    assert_rejected(&row_with("trip_distance", "0"), RejectReason::Distance);
    assert_rejected(&row_with("trip_distance", "0.1"), RejectReason::Distance);
    assert_rejected(&row_with("trip_distance", "150.0"), RejectReason::Distance);
    // Inclusive upper bound passes the distance check (then fails speed)
    match validate(&row_with("trip_distance", "100.0")) {
        ValidationOutcome::Rejected(reason) => assert_eq!(reason, RejectReason::Speed),
        other => panic!("expected speed rejection, got {other:?}"),
    }
}

#[test]
fn test_fare_bounds_inclusive() {
    assert_rejected(&row_with("fare_amount", "1.0"), RejectReason::Fare);
    assert_rejected(&row_with("fare_amount", "600.0"), RejectReason::Fare);
    assert!(validate(&row_with("fare_amount", "2.5")).is_accepted());
}

#[test]
fn test_passenger_bounds_and_missing_count() {
    assert_rejected(&row_with("passenger_count", "0"), RejectReason::Passengers);
    assert_rejected(&row_with("passenger_count", "7"), RejectReason::Passengers);
    // A missing count fails the range check, not the required-field check
    assert_rejected(&row_with("passenger_count", ""), RejectReason::Passengers);
    assert!(validate(&row_with("passenger_count", "6")).is_accepted());
}

#[test]
fn test_duration_bounds() {
    assert_rejected(
        &row_with("tpep_dropoff_datetime", "2019-01-15 08:00:30"),
        RejectReason::Duration,
    );
    assert_rejected(
        &row_with("tpep_dropoff_datetime", "2019-01-15 18:00:00"),
        RejectReason::Duration,
    );
}

#[test]
fn test_speed_ceiling() {
    // 50 miles in 10 minutes is 300 mph
    assert_rejected(&row_with("trip_distance", "50.0"), RejectReason::Speed);
}

#[test]
fn test_attribution_order_is_stable() {
    // Bad temporal and bad distance together attribute to temporal
    let mut values: Vec<String> = valid_row().iter().map(str::to_string).collect();
    values[2] = "2019-01-15 07:00:00".to_string();
    values[4] = "0.0".to_string();
    assert_rejected(&StringRecord::from(values), RejectReason::Temporal);
}

#[test]
fn test_validation_is_idempotent() {
    let header = test_header();
    let validator = Validator::new(ValidationThresholds::default());
    for record in [valid_row(), row_with("trip_distance", "0")] {
        let raw = RawRecord::new(&header, &record);
        assert_eq!(validator.validate(&raw), validator.validate(&raw));
    }
}

fn accepted_warnings(record: &StringRecord) -> Vec<Warning> {
    match validate(record) {
        ValidationOutcome::Accepted { warnings, .. } => warnings,
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn test_tip_ratio_warning() {
    // Tip three times the fare warns but never rejects
    let warnings = accepted_warnings(&row_with("tip_amount", "30.0"));
    assert!(warnings.contains(&Warning::TipRatio));
}

#[test]
fn test_total_mismatch_warning() {
    let warnings = accepted_warnings(&row_with("total_amount", "50.0"));
    assert!(warnings.contains(&Warning::TotalMismatch));
    // Within the surcharge tolerance there is no warning
    let warnings = accepted_warnings(&row_with("total_amount", "16.0"));
    assert!(!warnings.contains(&Warning::TotalMismatch));
}

#[test]
fn test_low_speed_warning() {
    // 0.2 miles over an hour is 0.2 mph, under the sanity floor
    let mut values: Vec<String> = valid_row().iter().map(str::to_string).collect();
    values[2] = "2019-01-15 09:00:00".to_string();
    values[4] = "0.2".to_string();
    let warnings = accepted_warnings(&StringRecord::from(values));
    assert!(warnings.contains(&Warning::LowSpeed));
}

#[test]
fn test_same_zone_distance_warning() {
    let warnings = accepted_warnings(&row_with("DOLocationID", "100"));
    assert!(warnings.contains(&Warning::SameZoneDistance));
}

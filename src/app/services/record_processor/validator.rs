//! Per-record validation
//!
//! Validation runs a fixed sequence of checks against one raw row: required
//! fields, field parsing, then the hard threshold checks in a stable order so
//! a record failing several checks is always attributed to the same reason.
//! Soft checks run last and only annotate accepted records with warnings.

use crate::app::models::TripCandidate;
use crate::app::services::record_processor::RejectReason;
use crate::app::services::trip_csv::RawRecord;
use crate::config::ValidationThresholds;
use crate::constants::{REQUIRED_COLUMNS, TOTAL_MISMATCH_TOLERANCE, TRIP_DATETIME_FORMAT, columns};
use chrono::NaiveDateTime;

/// Soft-check findings attached to an accepted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// Tip-to-fare ratio outside the plausible band
    TipRatio,
    /// Total differs from fare plus tip by more than the surcharge tolerance
    TotalMismatch,
    /// Derived speed below the sanity floor
    LowSpeed,
    /// Pickup and dropoff in the same zone despite a nonzero distance
    SameZoneDistance,
}

impl Warning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TipRatio => "tip_ratio",
            Self::TotalMismatch => "total_mismatch",
            Self::LowSpeed => "low_speed",
            Self::SameZoneDistance => "same_zone_distance",
        }
    }
}

/// Result of validating one raw record
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The record passed every hard check and parsed into a candidate
    Accepted {
        trip: TripCandidate,
        warnings: Vec<Warning>,
    },
    /// The record failed a hard check and is removed from the pipeline
    Rejected(RejectReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Stateless record validator configured with a threshold table
///
/// Validating the same record twice always yields the same outcome; the
/// validator carries no per-run state.
#[derive(Debug, Clone)]
pub struct Validator {
    thresholds: ValidationThresholds,
}

impl Validator {
    pub fn new(thresholds: ValidationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Validate one raw record and, on success, produce its typed candidate
    pub fn validate(&self, record: &RawRecord<'_>) -> ValidationOutcome {
        // Required fields first, on raw text, so a row missing a column is
        // attributed to `missing_field` rather than a parse failure.
        for column in REQUIRED_COLUMNS {
            if record.field(column).is_none() {
                return ValidationOutcome::Rejected(RejectReason::MissingField);
            }
        }

        let parsed = match self.parse_fields(record) {
            Ok(parsed) => parsed,
            Err(reason) => return ValidationOutcome::Rejected(reason),
        };

        if let Some(reason) = self.hard_checks(&parsed) {
            return ValidationOutcome::Rejected(reason);
        }

        let trip = parsed.into_candidate();
        let warnings = self.soft_checks(&trip);
        ValidationOutcome::Accepted { trip, warnings }
    }

    /// Parse every field into its typed form
    ///
    /// Required fields are known present at this point; optional fields parse
    /// to `None` when absent but reject the record when present and
    /// malformed.
    fn parse_fields(&self, record: &RawRecord<'_>) -> Result<ParsedTrip, RejectReason> {
        let pickup_datetime = parse_datetime(required(record, columns::PICKUP_DATETIME)?)?;
        let dropoff_datetime = parse_datetime(required(record, columns::DROPOFF_DATETIME)?)?;
        let trip_distance = parse_f64(required(record, columns::TRIP_DISTANCE)?)?;
        let fare_amount = parse_f64(required(record, columns::FARE_AMOUNT)?)?;
        let pu_location_id = parse_i64(required(record, columns::PU_LOCATION_ID)?)?;
        let do_location_id = parse_i64(required(record, columns::DO_LOCATION_ID)?)?;

        Ok(ParsedTrip {
            vendor_id: optional_i64(record, columns::VENDOR_ID)?,
            pickup_datetime,
            dropoff_datetime,
            passenger_count: optional_i64(record, columns::PASSENGER_COUNT)?,
            trip_distance,
            rate_code_id: optional_i64(record, columns::RATE_CODE_ID)?,
            store_and_fwd_flag: record
                .field(columns::STORE_AND_FWD_FLAG)
                .map(str::to_string),
            pu_location_id,
            do_location_id,
            payment_type: optional_i64(record, columns::PAYMENT_TYPE)?,
            fare_amount,
            extra: optional_f64(record, columns::EXTRA)?,
            mta_tax: optional_f64(record, columns::MTA_TAX)?,
            tip_amount: optional_f64(record, columns::TIP_AMOUNT)?.unwrap_or(0.0),
            tolls_amount: optional_f64(record, columns::TOLLS_AMOUNT)?,
            improvement_surcharge: optional_f64(record, columns::IMPROVEMENT_SURCHARGE)?,
            total_amount: optional_f64(record, columns::TOTAL_AMOUNT)?.unwrap_or(0.0),
            congestion_surcharge: optional_f64(record, columns::CONGESTION_SURCHARGE)?,
        })
    }

    /// The hard checks, in attribution order
    fn hard_checks(&self, trip: &ParsedTrip) -> Option<RejectReason> {
        let t = &self.thresholds;

        // Temporal: dropoff strictly after pickup
        if trip.dropoff_datetime <= trip.pickup_datetime {
            return Some(RejectReason::Temporal);
        }

        // Distance: exclusive lower bound, inclusive upper
        if trip.trip_distance <= t.min_distance || trip.trip_distance > t.max_distance {
            return Some(RejectReason::Distance);
        }

        if trip.fare_amount < t.min_fare || trip.fare_amount > t.max_fare {
            return Some(RejectReason::Fare);
        }

        // A missing passenger count fails the range check rather than
        // rejecting earlier as a parse failure.
        match trip.passenger_count {
            Some(n) if n >= t.min_passengers && n <= t.max_passengers => {}
            _ => return Some(RejectReason::Passengers),
        }

        let duration = trip.duration_minutes();
        if duration < t.min_duration_minutes || duration > t.max_duration_minutes {
            return Some(RejectReason::Duration);
        }

        let speed = trip.trip_distance / duration * 60.0;
        if speed > t.max_speed_mph {
            return Some(RejectReason::Speed);
        }

        None
    }

    /// Soft checks; findings never reject a record
    fn soft_checks(&self, trip: &TripCandidate) -> Vec<Warning> {
        let t = &self.thresholds;
        let mut warnings = Vec::new();

        if trip.fare_amount > 0.0 {
            let ratio = trip.tip_amount / trip.fare_amount;
            if ratio < t.min_tip_ratio || ratio > t.max_tip_ratio {
                warnings.push(Warning::TipRatio);
            }
        }

        let gap = (trip.total_amount - trip.fare_amount - trip.tip_amount).abs();
        if gap > TOTAL_MISMATCH_TOLERANCE {
            warnings.push(Warning::TotalMismatch);
        }

        if trip.speed_mph() < t.min_speed_mph {
            warnings.push(Warning::LowSpeed);
        }

        if trip.pu_location_id == trip.do_location_id && trip.trip_distance > 0.0 {
            warnings.push(Warning::SameZoneDistance);
        }

        warnings
    }
}

/// Parsed fields prior to the hard checks
///
/// Identical to [`TripCandidate`] except that the passenger count is still
/// optional: its absence is resolved by the passengers range check, not by
/// parsing.
#[derive(Debug)]
struct ParsedTrip {
    vendor_id: Option<i64>,
    pickup_datetime: NaiveDateTime,
    dropoff_datetime: NaiveDateTime,
    passenger_count: Option<i64>,
    trip_distance: f64,
    rate_code_id: Option<i64>,
    store_and_fwd_flag: Option<String>,
    pu_location_id: i64,
    do_location_id: i64,
    payment_type: Option<i64>,
    fare_amount: f64,
    extra: Option<f64>,
    mta_tax: Option<f64>,
    tip_amount: f64,
    tolls_amount: Option<f64>,
    improvement_surcharge: Option<f64>,
    total_amount: f64,
    congestion_surcharge: Option<f64>,
}

impl ParsedTrip {
    fn duration_minutes(&self) -> f64 {
        (self.dropoff_datetime - self.pickup_datetime).num_seconds() as f64 / 60.0
    }

    /// Convert into a candidate; only reachable after the passengers check
    /// guaranteed the count is present
    fn into_candidate(self) -> TripCandidate {
        TripCandidate {
            vendor_id: self.vendor_id,
            pickup_datetime: self.pickup_datetime,
            dropoff_datetime: self.dropoff_datetime,
            passenger_count: self.passenger_count.unwrap_or_default(),
            trip_distance: self.trip_distance,
            rate_code_id: self.rate_code_id,
            store_and_fwd_flag: self.store_and_fwd_flag,
            pu_location_id: self.pu_location_id,
            do_location_id: self.do_location_id,
            payment_type: self.payment_type,
            fare_amount: self.fare_amount,
            extra: self.extra,
            mta_tax: self.mta_tax,
            tip_amount: self.tip_amount,
            tolls_amount: self.tolls_amount,
            improvement_surcharge: self.improvement_surcharge,
            total_amount: self.total_amount,
            congestion_surcharge: self.congestion_surcharge,
        }
    }
}

fn required<'a>(record: &RawRecord<'a>, column: &str) -> Result<&'a str, RejectReason> {
    record.field(column).ok_or(RejectReason::MissingField)
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, RejectReason> {
    NaiveDateTime::parse_from_str(text, TRIP_DATETIME_FORMAT).map_err(|_| RejectReason::Parsing)
}

fn parse_f64(text: &str) -> Result<f64, RejectReason> {
    let value: f64 = text.parse().map_err(|_| RejectReason::Parsing)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RejectReason::Parsing)
    }
}

/// Integer parse that also accepts integral float text such as `"1.0"`,
/// which appears in re-exported trip files
fn parse_i64(text: &str) -> Result<i64, RejectReason> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    let value = parse_f64(text)?;
    if value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(RejectReason::Parsing)
    }
}

fn optional_i64(record: &RawRecord<'_>, column: &str) -> Result<Option<i64>, RejectReason> {
    record.field(column).map(parse_i64).transpose()
}

fn optional_f64(record: &RawRecord<'_>, column: &str) -> Result<Option<f64>, RejectReason> {
    record.field(column).map(parse_f64).transpose()
}

//! Core data models for the trip processing pipeline
//!
//! Records move through three shapes: the raw CSV row (handled by
//! [`crate::app::services::trip_csv`]), the typed [`TripCandidate`] produced
//! by validation, and the [`EnrichedTrip`] carrying derived features that the
//! batch writer persists.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed, not-yet-validated trip record
///
/// Optional fields mirror the input schema: they may be legitimately absent
/// from a row without rejecting it. A candidate is destroyed, never persisted,
/// if any pipeline stage rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCandidate {
    pub vendor_id: Option<i64>,
    pub pickup_datetime: NaiveDateTime,
    pub dropoff_datetime: NaiveDateTime,
    pub passenger_count: i64,
    pub trip_distance: f64,
    pub rate_code_id: Option<i64>,
    pub store_and_fwd_flag: Option<String>,
    pub pu_location_id: i64,
    pub do_location_id: i64,
    pub payment_type: Option<i64>,
    pub fare_amount: f64,
    pub extra: Option<f64>,
    pub mta_tax: Option<f64>,
    pub tip_amount: f64,
    pub tolls_amount: Option<f64>,
    pub improvement_surcharge: Option<f64>,
    pub total_amount: f64,
    pub congestion_surcharge: Option<f64>,
}

impl TripCandidate {
    /// Wall-clock trip duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        (self.dropoff_datetime - self.pickup_datetime).num_seconds() as f64 / 60.0
    }

    /// Derived speed in mph; 0 when the duration is not positive
    pub fn speed_mph(&self) -> f64 {
        let duration = self.duration_minutes();
        if duration > 0.0 {
            self.trip_distance / duration * 60.0
        } else {
            0.0
        }
    }

    /// Hour of day of the pickup timestamp
    pub fn pickup_hour(&self) -> u32 {
        self.pickup_datetime.hour()
    }
}

/// Time-of-day bucket assigned from the pickup hour
///
/// The five buckets partition `[0, 24)` with no gap or overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    MorningRush,
    Midday,
    EveningRush,
    Night,
    LateNight,
}

impl TimeCategory {
    /// Bucket a pickup hour; total over all 24 hours
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=9 => Self::MorningRush,
            10..=15 => Self::Midday,
            16..=19 => Self::EveningRush,
            20..=23 => Self::Night,
            _ => Self::LateNight,
        }
    }

    /// Label used in the cleaned output and the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MorningRush => "morning_rush",
            Self::Midday => "midday",
            Self::EveningRush => "evening_rush",
            Self::Night => "night",
            Self::LateNight => "late_night",
        }
    }
}

impl fmt::Display for TimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five derived analytical fields, all rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub speed_mph: f64,
    pub cost_per_mile: f64,
    pub time_category: TimeCategory,
    pub tip_percentage: f64,
    pub efficiency_score: f64,
}

/// A validated trip with its derived features attached
///
/// Owned exclusively by the pipeline until handed to the batch writer.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrip {
    pub trip: TripCandidate,
    pub features: DerivedFeatures,
}

/// Composite identity of a trip for duplicate suppression within one run
///
/// Built from raw field text rather than parsed values so that float
/// formatting differences cannot split or merge identities; this matches the
/// wire-level notion of "the same row seen twice". Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub vendor_id: Option<String>,
    pub pickup_datetime: String,
    pub dropoff_datetime: String,
    pub pu_location_id: String,
    pub do_location_id: String,
    pub passenger_count: Option<String>,
    pub trip_distance: String,
    pub fare_amount: String,
}

/// A zone reference entry from the lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub location_id: i64,
    pub borough: String,
    pub zone: String,
    pub service_zone: String,
}

/// A rate-code reference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCode {
    pub rate_code_id: i64,
    pub description: String,
}

//! Derived feature computation
//!
//! Enrichment is pure and total over validated candidates: it never fails
//! and never rejects. Each feature is rounded to 2 decimals as it is
//! computed, and the efficiency score is built from the already-rounded
//! values so the score matches what a reader of the cleaned output would
//! recompute by hand.

use crate::app::models::{DerivedFeatures, EnrichedTrip, TimeCategory, TripCandidate};

/// Speed that earns the full speed component of the efficiency score
const FULL_SPEED_MPH: f64 = 30.0;

/// Cost per mile at which the cost component reaches zero
const ZERO_COST_PER_MILE: f64 = 10.0;

/// Tip percentage that earns the full tip component
const FULL_TIP_PERCENTAGE: f64 = 20.0;

/// Round to 2 decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the five derived features for a validated candidate
pub fn derive_features(trip: &TripCandidate) -> DerivedFeatures {
    let duration = trip.duration_minutes();

    let speed_mph = if duration > 0.0 {
        round2(trip.trip_distance / duration * 60.0)
    } else {
        0.0
    };

    let cost_per_mile = if trip.trip_distance > 0.0 {
        round2(trip.fare_amount / trip.trip_distance)
    } else {
        0.0
    };

    let tip_percentage = if trip.fare_amount > 0.0 {
        round2(trip.tip_amount / trip.fare_amount * 100.0)
    } else {
        0.0
    };

    let time_category = TimeCategory::from_hour(trip.pickup_hour());

    // Weighted composite in [0, 100]: speed up to 40 points, cost up to 30,
    // tip up to 30. Zero when any input measure is not positive.
    let efficiency_score = if trip.trip_distance > 0.0 && duration > 0.0 && trip.fare_amount > 0.0 {
        let speed_score = (speed_mph / FULL_SPEED_MPH).min(1.0) * 40.0;
        let cost_score = (1.0 - cost_per_mile / ZERO_COST_PER_MILE).max(0.0) * 30.0;
        let tip_score = (tip_percentage / FULL_TIP_PERCENTAGE).min(1.0) * 30.0;
        round2(speed_score + cost_score + tip_score)
    } else {
        0.0
    };

    DerivedFeatures {
        speed_mph,
        cost_per_mile,
        time_category,
        tip_percentage,
        efficiency_score,
    }
}

/// Attach derived features to a validated candidate
pub fn enrich(trip: TripCandidate) -> EnrichedTrip {
    let features = derive_features(&trip);
    EnrichedTrip { trip, features }
}

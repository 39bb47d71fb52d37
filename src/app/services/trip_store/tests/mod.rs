//! Tests for store creation, reference loading, and batched trip writes


use crate::app::models::{DerivedFeatures, EnrichedTrip, TimeCategory, TripCandidate, Zone};
use crate::app::services::reference::{RateCodeRegistry, ZoneRegistry};
use crate::app::services::trip_store::TripStore;
use chrono::{NaiveDate, NaiveDateTime};

pub fn dt(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 1, 15)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn zone(location_id: i64) -> Zone {
    Zone {
        location_id,
        borough: "Queens".to_string(),
        zone: format!("Zone {location_id}"),
        service_zone: "Boro Zone".to_string(),
    }
}

/// In-memory store with both reference tables loaded
pub fn loaded_store() -> (TripStore, RateCodeRegistry) {
    let zones = ZoneRegistry::from_zones(vec![zone(100), zone(200)]);
    let rate_codes = RateCodeRegistry::default();
    let mut store = TripStore::in_memory().unwrap();
    store.load_zones(&zones).unwrap();
    store.load_rate_codes(&rate_codes).unwrap();
    (store, rate_codes)
}

/// An enriched trip whose pickup minute distinguishes it from its siblings
pub fn enriched_trip(minute: u32) -> EnrichedTrip {
    let trip = TripCandidate {
        vendor_id: Some(1),
        pickup_datetime: dt(8, minute),
        dropoff_datetime: dt(9, minute),
        passenger_count: 1,
        trip_distance: 2.0,
        rate_code_id: Some(1),
        store_and_fwd_flag: Some("N".to_string()),
        pu_location_id: 100,
        do_location_id: 200,
        payment_type: Some(1),
        fare_amount: 10.0,
        extra: Some(0.5),
        mta_tax: Some(0.5),
        tip_amount: 2.0,
        tolls_amount: None,
        improvement_surcharge: Some(0.3),
        total_amount: 13.3,
        congestion_surcharge: None,
    };
    EnrichedTrip {
        trip,
        features: DerivedFeatures {
            speed_mph: 2.0,
            cost_per_mile: 5.0,
            time_category: TimeCategory::MorningRush,
            tip_percentage: 20.0,
            efficiency_score: 47.67,
        },
    }
}

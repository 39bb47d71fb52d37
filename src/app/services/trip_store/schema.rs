//! Store schema definition
//!
//! Three tables: two reference tables loaded once per run, and the trips
//! fact table. Foreign keys are enforced, so reference tables must be
//! loaded before any trip insert.

use crate::{Error, Result};
use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE zones (
    location_id     INTEGER PRIMARY KEY,
    borough         TEXT NOT NULL,
    zone            TEXT NOT NULL,
    service_zone    TEXT NOT NULL
);

CREATE TABLE rate_codes (
    rate_code_id    INTEGER PRIMARY KEY,
    description     TEXT NOT NULL
);

CREATE TABLE trips (
    trip_id                 INTEGER PRIMARY KEY,
    vendor_id               INTEGER,
    pickup_datetime         TEXT NOT NULL,
    dropoff_datetime        TEXT NOT NULL,
    passenger_count         INTEGER NOT NULL,
    trip_distance           REAL NOT NULL,
    rate_code_id            INTEGER NOT NULL REFERENCES rate_codes(rate_code_id),
    store_and_fwd_flag      TEXT,
    pu_location_id          INTEGER NOT NULL REFERENCES zones(location_id),
    do_location_id          INTEGER NOT NULL REFERENCES zones(location_id),
    payment_type            INTEGER,
    fare_amount             REAL NOT NULL,
    extra                   REAL,
    mta_tax                 REAL,
    tip_amount              REAL NOT NULL,
    tolls_amount            REAL,
    improvement_surcharge   REAL,
    total_amount            REAL NOT NULL,
    congestion_surcharge    REAL,
    trip_speed_mph          REAL NOT NULL,
    cost_per_mile           REAL NOT NULL,
    time_category           TEXT NOT NULL,
    tip_percentage          REAL NOT NULL,
    efficiency_score        REAL NOT NULL
);

CREATE INDEX idx_trips_pickup_datetime ON trips(pickup_datetime);
CREATE INDEX idx_trips_pu_location ON trips(pu_location_id);
CREATE INDEX idx_trips_do_location ON trips(do_location_id);
CREATE INDEX idx_trips_time_category ON trips(time_category);
";

/// Create the schema on a fresh connection
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| Error::store("Failed to enable foreign keys".to_string(), e))?;
    conn.execute_batch(SCHEMA)
        .map_err(|e| Error::store("Failed to create store schema".to_string(), e))?;
    Ok(())
}

//! Transactional batch loader for the trips table
//!
//! Accumulates enriched trips and commits them in fixed-size batches, one
//! transaction per batch. Committed batches are durable even if a later
//! batch or the process fails; only uncommitted in-flight records are lost.

use crate::app::models::EnrichedTrip;
use crate::app::services::reference::RateCodeRegistry;
use crate::constants::TRIP_DATETIME_FORMAT;
use crate::{Error, Result};
use rusqlite::{Connection, params};
use tracing::debug;

const INSERT_TRIP: &str = "
INSERT INTO trips (
    vendor_id, pickup_datetime, dropoff_datetime, passenger_count,
    trip_distance, rate_code_id, store_and_fwd_flag, pu_location_id,
    do_location_id, payment_type, fare_amount, extra, mta_tax, tip_amount,
    tolls_amount, improvement_surcharge, total_amount, congestion_surcharge,
    trip_speed_mph, cost_per_mile, time_category, tip_percentage,
    efficiency_score
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
          ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)";

/// Totals for one completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows_written: usize,
    pub batches_committed: usize,
    pub rate_code_fallbacks: usize,
}

/// Batched, transactional writer over a store connection
///
/// Obtained from [`super::TripStore::batch_writer`]; holds the connection
/// exclusively until finished.
pub struct BatchWriter<'a> {
    conn: &'a mut Connection,
    rate_codes: &'a RateCodeRegistry,
    batch: Vec<EnrichedTrip>,
    batch_size: usize,
    rows_written: usize,
    batches_committed: usize,
    rate_code_fallbacks: usize,
}

impl<'a> BatchWriter<'a> {
    pub(super) fn new(
        conn: &'a mut Connection,
        rate_codes: &'a RateCodeRegistry,
        batch_size: usize,
    ) -> Self {
        Self {
            conn,
            rate_codes,
            batch: Vec::with_capacity(batch_size),
            batch_size,
            rows_written: 0,
            batches_committed: 0,
            rate_code_fallbacks: 0,
        }
    }

    /// Queue one enriched trip, committing a batch when full
    ///
    /// Resolves the trip's rate code against the registry; returns `true`
    /// when the fallback code was applied.
    pub fn add(&mut self, mut trip: EnrichedTrip) -> Result<bool> {
        let resolution = self.rate_codes.resolve(trip.trip.rate_code_id);
        let fallback = resolution.is_fallback();
        if fallback {
            self.rate_code_fallbacks += 1;
        }
        trip.trip.rate_code_id = Some(resolution.code());

        self.batch.push(trip);
        if self.batch.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(fallback)
    }

    /// Commit the current batch in a single transaction
    fn flush(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::store("Failed to begin trip batch".to_string(), e))?;
        {
            let mut stmt = tx
                .prepare_cached(INSERT_TRIP)
                .map_err(|e| Error::store("Failed to prepare trip insert".to_string(), e))?;
            for enriched in &self.batch {
                let trip = &enriched.trip;
                let features = &enriched.features;
                stmt.execute(params![
                    trip.vendor_id,
                    trip.pickup_datetime.format(TRIP_DATETIME_FORMAT).to_string(),
                    trip.dropoff_datetime
                        .format(TRIP_DATETIME_FORMAT)
                        .to_string(),
                    trip.passenger_count,
                    trip.trip_distance,
                    trip.rate_code_id,
                    trip.store_and_fwd_flag,
                    trip.pu_location_id,
                    trip.do_location_id,
                    trip.payment_type,
                    trip.fare_amount,
                    trip.extra,
                    trip.mta_tax,
                    trip.tip_amount,
                    trip.tolls_amount,
                    trip.improvement_surcharge,
                    trip.total_amount,
                    trip.congestion_surcharge,
                    features.speed_mph,
                    features.cost_per_mile,
                    features.time_category.as_str(),
                    features.tip_percentage,
                    features.efficiency_score,
                ])
                .map_err(|e| Error::store("Failed to insert trip".to_string(), e))?;
            }
        }
        tx.commit()
            .map_err(|e| Error::store("Failed to commit trip batch".to_string(), e))?;

        self.rows_written += self.batch.len();
        self.batches_committed += 1;
        debug!(
            "Committed batch {} ({} rows total)",
            self.batches_committed, self.rows_written
        );
        self.batch.clear();
        Ok(())
    }

    /// Commit any partial final batch and return load totals
    pub fn finish(mut self) -> Result<WriteSummary> {
        self.flush()?;
        Ok(WriteSummary {
            rows_written: self.rows_written,
            batches_committed: self.batches_committed,
            rate_code_fallbacks: self.rate_code_fallbacks,
        })
    }

    /// Rows committed so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

//! Queryable trip store backed by SQLite
//!
//! The store is rebuilt from scratch on every run: [`TripStore::create`]
//! removes any existing database file, creates the schema, and the caller
//! loads the reference tables before streaming trips in through a
//! [`BatchWriter`]. [`TripStore::verify`] reads back row counts after the
//! load for the end-of-run summary.

pub mod schema;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use writer::{BatchWriter, WriteSummary};

use crate::app::services::reference::{RateCodeRegistry, ZoneRegistry};
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::Path;
use tracing::info;

/// Row counts read back from a loaded store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCounts {
    pub zones: usize,
    pub rate_codes: usize,
    pub trips: usize,
    /// Earliest and latest pickup timestamps, when any trips are present
    pub pickup_range: Option<(String, String)>,
}

/// Owned connection to the trip database
pub struct TripStore {
    conn: Connection,
}

impl TripStore {
    /// Create a fresh database file, replacing any existing one
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)?;
            info!("Removed existing database at {}", path.display());
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::store(format!("Failed to create database at {}", path.display()), e))?;
        schema::initialize(&conn)?;
        info!("Created trip store at {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory store
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store("Failed to open in-memory store".to_string(), e))?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Load the zone reference table
    pub fn load_zones(&mut self, zones: &ZoneRegistry) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::store("Failed to begin zone load".to_string(), e))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO zones (location_id, borough, zone, service_zone)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(|e| Error::store("Failed to prepare zone insert".to_string(), e))?;
            for zone in zones.sorted_zones() {
                stmt.execute(params![
                    zone.location_id,
                    zone.borough,
                    zone.zone,
                    zone.service_zone
                ])
                .map_err(|e| Error::store("Failed to insert zone".to_string(), e))?;
            }
        }
        tx.commit()
            .map_err(|e| Error::store("Failed to commit zone load".to_string(), e))?;
        info!("Loaded {} zones into store", zones.len());
        Ok(zones.len())
    }

    /// Load the rate-code reference table
    pub fn load_rate_codes(&mut self, rate_codes: &RateCodeRegistry) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::store("Failed to begin rate code load".to_string(), e))?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO rate_codes (rate_code_id, description) VALUES (?1, ?2)")
                .map_err(|e| Error::store("Failed to prepare rate code insert".to_string(), e))?;
            for code in rate_codes.codes() {
                stmt.execute(params![code.rate_code_id, code.description])
                    .map_err(|e| Error::store("Failed to insert rate code".to_string(), e))?;
            }
        }
        tx.commit()
            .map_err(|e| Error::store("Failed to commit rate code load".to_string(), e))?;
        info!("Loaded {} rate codes into store", rate_codes.len());
        Ok(rate_codes.len())
    }

    /// Batched writer for the trips table
    pub fn batch_writer<'a>(
        &'a mut self,
        rate_codes: &'a RateCodeRegistry,
        batch_size: usize,
    ) -> BatchWriter<'a> {
        BatchWriter::new(&mut self.conn, rate_codes, batch_size)
    }

    /// Read back row counts and the pickup range after a load
    pub fn verify(&self) -> Result<StoreCounts> {
        let zones = self.count("zones")?;
        let rate_codes = self.count("rate_codes")?;
        let trips = self.count("trips")?;

        let pickup_range = self
            .conn
            .query_row(
                "SELECT MIN(pickup_datetime), MAX(pickup_datetime) FROM trips",
                [],
                |row| {
                    let min: Option<String> = row.get(0)?;
                    let max: Option<String> = row.get(1)?;
                    Ok(min.zip(max))
                },
            )
            .optional()
            .map_err(|e| Error::store("Failed to read pickup range".to_string(), e))?
            .flatten();

        Ok(StoreCounts {
            zones,
            rate_codes,
            trips,
            pickup_range,
        })
    }

    fn count(&self, table: &str) -> Result<usize> {
        // Table names come from this module only, never from input.
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Error::store(format!("Failed to count rows in {table}"), e))?;
        Ok(count as usize)
    }
}

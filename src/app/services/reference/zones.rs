//! Zone lookup table loading and membership checks
//!
//! The zone table drives the location referential check: a trip whose pickup
//! or dropoff location id is absent from the registry is rejected before it
//! reaches the batch writer.

use crate::app::models::Zone;
use crate::constants::zone_columns;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Read-only registry of valid taxi zones, keyed by location id
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: HashMap<i64, Zone>,
}

impl ZoneRegistry {
    /// Load the zone lookup table from a headered CSV
    ///
    /// Fails fatally if the file is unreadable or contains no usable zone
    /// rows. Rows with a malformed location id are skipped with a warning;
    /// they cannot participate in membership checks.
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::reference_data(format!(
                "Zone lookup file does not exist: {}",
                path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| {
                Error::csv_parsing(
                    path.to_string_lossy().to_string(),
                    "Failed to open zone lookup".to_string(),
                    Some(e),
                )
            })?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|c| c.trim() == name)
                .ok_or_else(|| {
                    Error::reference_data(format!("Zone lookup is missing column '{name}'"))
                })
        };
        let id_col = column(zone_columns::LOCATION_ID)?;
        let borough_col = column(zone_columns::BOROUGH)?;
        let zone_col = column(zone_columns::ZONE)?;
        let service_col = column(zone_columns::SERVICE_ZONE)?;

        let mut zones = HashMap::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                Error::csv_parsing(
                    path.to_string_lossy().to_string(),
                    "Failed to read zone record".to_string(),
                    Some(e),
                )
            })?;

            let raw_id = record.get(id_col).unwrap_or("").trim();
            let location_id: i64 = match raw_id.parse() {
                Ok(id) => id,
                Err(_) => {
                    warn!("Skipping zone row with invalid LocationID '{}'", raw_id);
                    continue;
                }
            };

            zones.insert(
                location_id,
                Zone {
                    location_id,
                    borough: record.get(borough_col).unwrap_or("").trim().to_string(),
                    zone: record.get(zone_col).unwrap_or("").trim().to_string(),
                    service_zone: record.get(service_col).unwrap_or("").trim().to_string(),
                },
            );
        }

        if zones.is_empty() {
            return Err(Error::reference_data(format!(
                "Zone lookup contains no zones: {}",
                path.display()
            )));
        }

        let registry = Self { zones };
        if let Some((min_id, max_id)) = registry.id_range() {
            info!(
                "Loaded {} zones (LocationID range {} to {})",
                registry.len(),
                min_id,
                max_id
            );
        }

        Ok(registry)
    }

    /// Whether a location id exists in the zone table
    pub fn contains(&self, location_id: i64) -> bool {
        self.zones.contains_key(&location_id)
    }

    pub fn get(&self, location_id: i64) -> Option<&Zone> {
        self.zones.get(&location_id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Minimum and maximum location ids, if any zones are loaded
    pub fn id_range(&self) -> Option<(i64, i64)> {
        let min = self.zones.keys().min()?;
        let max = self.zones.keys().max()?;
        Some((*min, *max))
    }

    /// All zones sorted by location id, for deterministic store loading
    pub fn sorted_zones(&self) -> Vec<&Zone> {
        let mut zones: Vec<&Zone> = self.zones.values().collect();
        zones.sort_by_key(|z| z.location_id);
        zones
    }
}

#[cfg(test)]
impl ZoneRegistry {
    /// Build a registry directly from zones, bypassing file loading
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.location_id, z)).collect(),
        }
    }
}

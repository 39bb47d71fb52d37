//! Reference datasets: zone lookup and rate codes
//!
//! Reference data is a run prerequisite, loaded once before any trip is
//! processed and read-only thereafter. An unreadable or empty zone source
//! aborts the run; it is not a per-record failure. The registries are safe to
//! share across independently keyed pipeline shards without synchronization.

pub mod rate_codes;
pub mod zones;

#[cfg(test)]
pub mod tests;

pub use rate_codes::RateCodeRegistry;
pub use zones::ZoneRegistry;

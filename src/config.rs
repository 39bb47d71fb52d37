//! Configuration management and validation.
//!
//! Provides the validation threshold table and run-level pipeline settings.
//! All thresholds are configurable; defaults come from [`crate::constants`]
//! and reflect domain knowledge about plausible NYC taxi trips.

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DUPLICATE_SAMPLE_CAP, DEFAULT_MAX_DISTANCE,
    DEFAULT_MAX_DURATION_MINUTES, DEFAULT_MAX_FARE, DEFAULT_MAX_PASSENGERS, DEFAULT_MAX_SPEED_MPH,
    DEFAULT_MAX_TIP_RATIO, DEFAULT_MIN_DISTANCE, DEFAULT_MIN_DURATION_MINUTES, DEFAULT_MIN_FARE,
    DEFAULT_MIN_PASSENGERS, DEFAULT_MIN_SPEED_MPH, DEFAULT_MIN_TIP_RATIO,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Hard and soft thresholds applied by the validator
///
/// Distance bounds are `(min, max]`; fare, passengers and duration bounds are
/// inclusive on both ends. `min_speed_mph` and the tip ratio bounds drive
/// warnings only and never reject a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationThresholds {
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_fare: f64,
    pub max_fare: f64,
    pub min_passengers: i64,
    pub max_passengers: i64,
    pub min_duration_minutes: f64,
    pub max_duration_minutes: f64,
    pub max_speed_mph: f64,
    pub min_speed_mph: f64,
    pub min_tip_ratio: f64,
    pub max_tip_ratio: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            min_fare: DEFAULT_MIN_FARE,
            max_fare: DEFAULT_MAX_FARE,
            min_passengers: DEFAULT_MIN_PASSENGERS,
            max_passengers: DEFAULT_MAX_PASSENGERS,
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            max_speed_mph: DEFAULT_MAX_SPEED_MPH,
            min_speed_mph: DEFAULT_MIN_SPEED_MPH,
            min_tip_ratio: DEFAULT_MIN_TIP_RATIO,
            max_tip_ratio: DEFAULT_MAX_TIP_RATIO,
        }
    }
}

impl ValidationThresholds {
    /// Check internal consistency of the threshold table
    pub fn validate(&self) -> Result<()> {
        if self.min_distance >= self.max_distance {
            return Err(Error::configuration(
                "min_distance must be less than max_distance".to_string(),
            ));
        }
        if self.min_fare > self.max_fare {
            return Err(Error::configuration(
                "min_fare must not exceed max_fare".to_string(),
            ));
        }
        if self.min_passengers > self.max_passengers {
            return Err(Error::configuration(
                "min_passengers must not exceed max_passengers".to_string(),
            ));
        }
        if self.min_duration_minutes > self.max_duration_minutes {
            return Err(Error::configuration(
                "min_duration_minutes must not exceed max_duration_minutes".to_string(),
            ));
        }
        if self.max_speed_mph <= 0.0 {
            return Err(Error::configuration(
                "max_speed_mph must be positive".to_string(),
            ));
        }
        if self.min_tip_ratio > self.max_tip_ratio {
            return Err(Error::configuration(
                "min_tip_ratio must not exceed max_tip_ratio".to_string(),
            ));
        }
        Ok(())
    }
}

/// Run-level configuration for the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Records per store transaction
    pub batch_size: usize,

    /// Maximum duplicate rows retained for the duplicates log
    pub duplicate_sample_cap: usize,

    /// Threshold table used by the validator
    pub thresholds: ValidationThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            duplicate_sample_cap: DEFAULT_DUPLICATE_SAMPLE_CAP,
            thresholds: ValidationThresholds::default(),
        }
    }
}

impl PipelineConfig {
    /// Create configuration with a custom batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Create configuration with a custom duplicate sample cap
    pub fn with_duplicate_sample_cap(mut self, cap: usize) -> Self {
        self.duplicate_sample_cap = cap;
        self
    }

    /// Create configuration with a custom threshold table
    pub fn with_thresholds(mut self, thresholds: ValidationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Check internal consistency of the configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::configuration(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        self.thresholds.validate()
    }
}

//! Rate-code reference enumeration and fallback resolution
//!
//! Rate codes are handled asymmetrically to locations by design: an unknown
//! rate code is resolved to the standard code and counted as a warning,
//! never rejected.

use crate::app::models::RateCode;
use crate::constants::{DEFAULT_RATE_CODE, RATE_CODES};
use std::collections::HashSet;

/// Outcome of resolving a record's rate code against the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCodeResolution {
    /// The record carried a known code
    Known(i64),
    /// The record's code was missing or unknown; the default applies
    Fallback(i64),
}

impl RateCodeResolution {
    /// The code to persist
    pub fn code(&self) -> i64 {
        match self {
            Self::Known(code) | Self::Fallback(code) => *code,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Read-only registry of the fixed rate-code enumeration
#[derive(Debug, Clone)]
pub struct RateCodeRegistry {
    codes: Vec<RateCode>,
    valid_ids: HashSet<i64>,
}

impl Default for RateCodeRegistry {
    fn default() -> Self {
        let codes: Vec<RateCode> = RATE_CODES
            .iter()
            .map(|(id, description)| RateCode {
                rate_code_id: *id,
                description: description.to_string(),
            })
            .collect();
        let valid_ids = codes.iter().map(|c| c.rate_code_id).collect();
        Self { codes, valid_ids }
    }
}

impl RateCodeRegistry {
    pub fn contains(&self, rate_code_id: i64) -> bool {
        self.valid_ids.contains(&rate_code_id)
    }

    /// Resolve a record's rate code, falling back to the standard code when
    /// the record carries none or an unknown one
    pub fn resolve(&self, rate_code_id: Option<i64>) -> RateCodeResolution {
        match rate_code_id {
            Some(code) if self.contains(code) => RateCodeResolution::Known(code),
            _ => RateCodeResolution::Fallback(DEFAULT_RATE_CODE),
        }
    }

    /// All rate codes in id order, for store loading
    pub fn codes(&self) -> &[RateCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

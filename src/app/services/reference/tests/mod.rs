//! Tests for reference dataset loading and lookups

pub mod rate_codes_tests;

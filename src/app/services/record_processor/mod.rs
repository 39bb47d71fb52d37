//! Record validation, deduplication, enrichment, and run statistics
//!
//! The pipeline treats per-record failures as data: a record failing any
//! check is counted under a single reject reason and dropped, and the run
//! carries on. The stage order is fixed - validate, deduplicate, enrich,
//! then the store's location gate - so reject attribution is deterministic.

pub mod deduplication;
pub mod enrichment;
pub mod processor;
pub mod stats;
pub mod validator;

#[cfg(test)]
pub mod tests;

pub use deduplication::Deduplicator;
pub use enrichment::{derive_features, enrich};
pub use processor::{PipelineOutcome, TripPipeline};
pub use stats::{RejectReason, RunStats};
pub use validator::{ValidationOutcome, Validator, Warning};

//! End-to-end pipeline flow over an in-memory store

use super::TEST_COLUMNS;
use crate::app::models::Zone;
use crate::app::services::record_processor::processor::PipelineOutcome;
use crate::app::services::record_processor::TripPipeline;
use crate::app::services::reference::{RateCodeRegistry, ZoneRegistry};
use crate::app::services::trip_csv::{CleanedWriter, TripHeader};
use crate::app::services::trip_store::{StoreCounts, TripStore};
use crate::config::PipelineConfig;
use tempfile::TempDir;

fn zone(location_id: i64) -> Zone {
    Zone {
        location_id,
        borough: "Manhattan".to_string(),
        zone: format!("Zone {location_id}"),
        service_zone: "Yellow Zone".to_string(),
    }
}

fn input_with_rows(rows: &[&str]) -> String {
    let mut input = TEST_COLUMNS.join(",");
    input.push('\n');
    for row in rows {
        input.push_str(row);
        input.push('\n');
    }
    input
}

fn run_pipeline(input: &str) -> (PipelineOutcome, StoreCounts, String) {
    let temp_dir = TempDir::new().unwrap();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    let header = TripHeader::from_record(&reader.headers().unwrap().clone()).unwrap();

    let cleaned_path = temp_dir.path().join("cleaned.csv");
    let mut cleaned = CleanedWriter::create(&cleaned_path, &header).unwrap();

    let zones = ZoneRegistry::from_zones(vec![zone(100), zone(200)]);
    let rate_codes = RateCodeRegistry::default();
    let mut store = TripStore::in_memory().unwrap();
    store.load_zones(&zones).unwrap();
    store.load_rate_codes(&rate_codes).unwrap();

    let config = PipelineConfig::default().with_batch_size(2);
    let mut writer = store.batch_writer(&rate_codes, config.batch_size);
    let pipeline = TripPipeline::new(&config, &zones);
    let outcome = pipeline
        .run(&mut reader, &header, &mut cleaned, &mut writer, None)
        .unwrap();
    writer.finish().unwrap();
    cleaned.finish().unwrap();

    let counts = store.verify().unwrap();
    let cleaned_content = std::fs::read_to_string(&cleaned_path).unwrap();
    (outcome, counts, cleaned_content)
}

#[test]
fn test_full_flow_counts_every_fate() {
    let input = input_with_rows(&[
        // Kept
        "1,2019-01-15 08:00:00,2019-01-15 08:10:00,1,2.0,1,N,100,200,1,10.0,2.0,12.0",
        // Exact duplicate of the row above
        "1,2019-01-15 08:00:00,2019-01-15 08:10:00,1,2.0,1,N,100,200,1,10.0,2.0,12.0",
        // Zero distance
        "2,2019-01-15 09:00:00,2019-01-15 09:10:00,1,0,1,N,100,200,1,10.0,2.0,12.0",
        // Dropoff location not in the zone table
        "2,2019-01-15 10:00:00,2019-01-15 10:10:00,1,2.0,1,N,100,999,1,10.0,2.0,12.0",
        // Unknown rate code, kept with the fallback
        "1,2019-01-15 11:00:00,2019-01-15 11:10:00,1,2.0,99,N,100,200,1,15.0,2.0,17.0",
    ]);

    let (outcome, counts, cleaned) = run_pipeline(&input);
    let stats = &outcome.stats;

    assert_eq!(stats.total, 5);
    assert_eq!(stats.kept, 2);
    assert_eq!(stats.duplicate, 1);
    assert_eq!(stats.distance, 1);
    assert_eq!(stats.location, 1);
    assert_eq!(stats.removed(), 3);
    assert_eq!(stats.rate_code_fallbacks, 1);

    // The location-rejected row still reaches the cleaned output
    let cleaned_rows = cleaned.lines().count() - 1;
    assert_eq!(cleaned_rows, 3);

    // Only location-valid records reach the store
    assert_eq!(counts.trips, 2);
    assert_eq!(counts.zones, 2);
    assert_eq!(counts.rate_codes, 6);
    assert_eq!(
        counts.pickup_range,
        Some((
            "2019-01-15 08:00:00".to_string(),
            "2019-01-15 11:00:00".to_string()
        ))
    );

    assert_eq!(outcome.duplicate_samples.len(), 1);
}

#[test]
fn test_cleaned_output_appends_derived_columns() {
    let input = input_with_rows(&[
        "1,2019-01-15 08:00:00,2019-01-15 08:10:00,1,2.0,1,N,100,200,1,10.0,2.0,12.0",
    ]);
    let (_, _, cleaned) = run_pipeline(&input);

    let mut lines = cleaned.lines();
    let header = lines.next().unwrap();
    assert!(header.ends_with(
        "trip_speed_mph,cost_per_mile,time_category,tip_percentage,efficiency_score"
    ));
    let row = lines.next().unwrap();
    assert!(row.ends_with("12.00,5.00,morning_rush,20.00,61.00"));
}

#[test]
fn test_warnings_survive_location_rejection() {
    // A 30.0 tip on a 10.0 fare trips the tip-ratio warning; dropoff 999
    // is absent from the zone table so the store gate removes the record.
    let input = input_with_rows(&[
        "1,2019-01-15 08:00:00,2019-01-15 08:10:00,1,2.0,1,N,100,999,1,10.0,30.0,40.0",
    ]);
    let (outcome, counts, _) = run_pipeline(&input);

    assert_eq!(outcome.stats.location, 1);
    assert_eq!(outcome.stats.kept, 0);
    assert_eq!(outcome.stats.warnings, 1);
    assert_eq!(counts.trips, 0);
}

#[test]
fn test_unreadable_row_counts_as_other() {
    let input = input_with_rows(&[
        "1,2019-01-15 08:00:00,2019-01-15 08:10:00,1,2.0,1,N,100,200,1,10.0,2.0,12.0",
        // Wrong field count; the reader cannot produce this row
        "1,2019-01-15 09:00:00,broken",
        "1,2019-01-15 10:00:00,2019-01-15 10:10:00,1,3.0,1,N,100,200,1,10.0,2.0,12.0",
    ]);
    let (outcome, counts, _) = run_pipeline(&input);

    assert_eq!(outcome.stats.other, 1);
    // Rows after the broken one are still processed
    assert_eq!(outcome.stats.kept, 2);
    assert_eq!(counts.trips, 2);
}

#[test]
fn test_empty_input_produces_empty_outputs() {
    let (outcome, counts, cleaned) = run_pipeline(&input_with_rows(&[]));
    assert_eq!(outcome.stats.total, 0);
    assert_eq!(outcome.stats.kept_rate(), 0.0);
    assert_eq!(counts.trips, 0);
    assert_eq!(counts.pickup_range, None);
    // Header only
    assert_eq!(cleaned.lines().count(), 1);
    assert!(outcome.duplicate_samples.is_empty());
}

//! Raw record access by column name
//!
//! A [`RawRecord`] is a transient, borrowed view over one CSV row. It exists
//! only while that row is being processed and is never stored.

use super::header::TripHeader;
use crate::app::models::DedupKey;
use crate::constants::columns;
use csv::StringRecord;

/// Borrowed view over one input row with by-name field access
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    header: &'a TripHeader,
    record: &'a StringRecord,
}

impl<'a> RawRecord<'a> {
    pub fn new(header: &'a TripHeader, record: &'a StringRecord) -> Self {
        Self { header, record }
    }

    /// Field value by column name; `None` when the column is absent from the
    /// header or the value is empty after trimming
    pub fn field(&self, name: &str) -> Option<&'a str> {
        let index = self.header.index_of(name)?;
        let value = self.record.get(index)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// The underlying CSV record
    pub fn inner(&self) -> &'a StringRecord {
        self.record
    }

    /// Composite identity key for duplicate suppression
    ///
    /// Built from raw field text; required fields fall back to the empty
    /// string so a malformed row still produces a stable key.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            vendor_id: self.field(columns::VENDOR_ID).map(str::to_string),
            pickup_datetime: self
                .field(columns::PICKUP_DATETIME)
                .unwrap_or_default()
                .to_string(),
            dropoff_datetime: self
                .field(columns::DROPOFF_DATETIME)
                .unwrap_or_default()
                .to_string(),
            pu_location_id: self
                .field(columns::PU_LOCATION_ID)
                .unwrap_or_default()
                .to_string(),
            do_location_id: self
                .field(columns::DO_LOCATION_ID)
                .unwrap_or_default()
                .to_string(),
            passenger_count: self.field(columns::PASSENGER_COUNT).map(str::to_string),
            trip_distance: self
                .field(columns::TRIP_DISTANCE)
                .unwrap_or_default()
                .to_string(),
            fare_amount: self
                .field(columns::FARE_AMOUNT)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

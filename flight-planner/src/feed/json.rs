//! JSON-file-backed flight feed.
//!
//! Loads a flight schedule from a JSON file once at construction and
//! serves date-range queries from memory. This is the offline data path:
//! no network access is needed after the file is read.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Airport, Flight};

use super::{FeedError, FlightFeed};

/// One schedule record as it appears in the JSON file.
///
/// Timestamps are RFC 3339 with an explicit offset, normalized to UTC on
/// deserialization.
#[derive(Debug, Deserialize)]
struct ScheduleRecord {
    flight_number: String,
    origin: String,
    destination: String,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    aircraft_type: String,
}

impl ScheduleRecord {
    fn into_flight(self) -> Result<Flight, String> {
        let origin = Airport::parse(&self.origin).map_err(|e| e.to_string())?;
        let destination = Airport::parse(&self.destination).map_err(|e| e.to_string())?;

        Flight::new(
            self.flight_number,
            origin,
            destination,
            self.departure,
            self.arrival,
            self.aircraft_type,
        )
        .map_err(|e| e.to_string())
    }
}

/// Flight feed backed by a JSON schedule file.
///
/// The file holds a JSON array of records:
///
/// ```json
/// [
///   {
///     "flight_number": "UA100",
///     "origin": "EWR",
///     "destination": "ORD",
///     "departure": "2025-01-15T09:00:00Z",
///     "arrival": "2025-01-15T11:00:00Z",
///     "aircraft_type": "737"
///   }
/// ]
/// ```
///
/// Individual records that fail validation (bad airport code,
/// non-positive duration) are skipped with a warning; an unreadable file
/// or invalid JSON fails the whole load.
#[derive(Debug)]
pub struct JsonFlightFeed {
    flights: Vec<Flight>,
}

impl JsonFlightFeed {
    /// Load a schedule file.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or is not a JSON array
    /// of schedule records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FeedError::Unavailable(format!("{}: {e}", path.display())))?;

        let records: Vec<ScheduleRecord> = serde_json::from_str(&contents)
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        let total = records.len();
        let mut flights = Vec::with_capacity(total);
        for record in records {
            let number = record.flight_number.clone();
            match record.into_flight() {
                Ok(flight) => flights.push(flight),
                Err(reason) => {
                    warn!(flight = %number, %reason, "skipping invalid schedule record");
                }
            }
        }

        debug!(
            loaded = flights.len(),
            skipped = total - flights.len(),
            path = %path.display(),
            "schedule loaded"
        );

        Ok(Self { flights })
    }

    /// Number of flights loaded.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// True if no flights were loaded.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

impl FlightFeed for JsonFlightFeed {
    fn flights_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Flight>, FeedError> {
        if start > end {
            return Err(FeedError::InvalidDateRange { start, end });
        }

        Ok(self
            .flights
            .iter()
            .filter(|f| {
                let date = f.departure().date_naive();
                date >= start && date <= end
            })
            .cloned()
            .collect())
    }
}

//! Flight schedule data providers.
//!
//! The planner consumes flight data through the [`FlightFeed`] trait so
//! it can be driven by any source: a schedule file, an API client, or a
//! mock in tests.

mod json;

pub use json::JsonFlightFeed;

use chrono::NaiveDate;

use crate::domain::{Airport, Flight};

/// Error from a flight data provider.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Start date falls after end date
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// The underlying source could not be read
    #[error("schedule data unavailable: {0}")]
    Unavailable(String),

    /// The source was readable but not parseable
    #[error("malformed schedule data: {0}")]
    Malformed(String),
}

/// Provider of flight schedule data.
///
/// Implementations return `Flight` records with all timestamps
/// normalized to UTC.
pub trait FlightFeed {
    /// Every scheduled flight whose departure date falls in the
    /// inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the range is inverted or the source cannot be
    /// read.
    fn flights_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Flight>, FeedError>;

    /// Flights departing from or arriving at `airport` in the inclusive
    /// date range.
    ///
    /// Default implementation filters [`FlightFeed::flights_in_range`];
    /// providers with a narrower native query may override.
    fn flights_touching_airport(
        &self,
        airport: Airport,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Flight>, FeedError> {
        Ok(self
            .flights_in_range(start, end)?
            .into_iter()
            .filter(|f| f.origin() == airport || f.destination() == airport)
            .collect())
    }
}

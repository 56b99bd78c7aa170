//! Flight record type.
//!
//! A `Flight` is a single scheduled leg with origin, destination, and
//! timing. All timestamps are UTC. Flights are validated at construction
//! and never mutated afterwards, so they can be shared freely (the graph
//! and many live search states reference the same `Arc<Flight>`).

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::{Airport, DomainError};

/// A single scheduled flight.
///
/// # Invariants
///
/// - Departure strictly precedes arrival (zero or negative duration is
///   rejected at construction).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use flight_planner::domain::{Airport, Flight};
///
/// let flight = Flight::new(
///     "UA100",
///     Airport::parse("EWR").unwrap(),
///     Airport::parse("ORD").unwrap(),
///     Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 1, 15, 11, 0, 0).unwrap(),
///     "737",
/// )
/// .unwrap();
///
/// assert_eq!(flight.duration(), chrono::Duration::hours(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    flight_number: String,
    origin: Airport,
    destination: Airport,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    aircraft_type: String,
}

impl Flight {
    /// Construct a flight, validating that it departs before it arrives.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrival <= departure`.
    pub fn new(
        flight_number: impl Into<String>,
        origin: Airport,
        destination: Airport,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        aircraft_type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let flight_number = flight_number.into();

        if departure >= arrival {
            return Err(DomainError::NonPositiveFlightDuration {
                flight_number,
                departure,
                arrival,
            });
        }

        Ok(Flight {
            flight_number,
            origin,
            destination,
            departure,
            arrival,
            aircraft_type: aircraft_type.into(),
        })
    }

    /// Returns the flight number.
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Returns the origin airport.
    pub fn origin(&self) -> Airport {
        self.origin
    }

    /// Returns the destination airport.
    pub fn destination(&self) -> Airport {
        self.destination
    }

    /// Returns the departure time (UTC).
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the arrival time (UTC).
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the aircraft type label.
    pub fn aircraft_type(&self) -> &str {
        &self.aircraft_type
    }

    /// Returns the flight duration (guaranteed positive).
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.flight_number, self.origin, self.destination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    #[test]
    fn valid_flight() {
        let flight = Flight::new("UA100", airport("EWR"), airport("ORD"), ts(9, 0), ts(11, 0), "737")
            .unwrap();

        assert_eq!(flight.flight_number(), "UA100");
        assert_eq!(flight.origin(), airport("EWR"));
        assert_eq!(flight.destination(), airport("ORD"));
        assert_eq!(flight.duration(), Duration::hours(2));
        assert_eq!(flight.aircraft_type(), "737");
    }

    #[test]
    fn reject_arrival_before_departure() {
        let result = Flight::new("UA100", airport("EWR"), airport("ORD"), ts(11, 0), ts(9, 0), "737");
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveFlightDuration { .. })
        ));
    }

    #[test]
    fn reject_zero_duration() {
        let result = Flight::new("UA100", airport("EWR"), airport("ORD"), ts(9, 0), ts(9, 0), "737");
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveFlightDuration { .. })
        ));
    }

    #[test]
    fn display_format() {
        let flight = Flight::new("UA100", airport("EWR"), airport("ORD"), ts(9, 0), ts(11, 0), "737")
            .unwrap();
        assert_eq!(flight.to_string(), "UA100 EWR -> ORD");
    }
}

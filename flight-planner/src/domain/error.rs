//! Domain error types.
//!
//! These errors represent validation failures at construction time.
//! They are distinct from search/feed errors.

use chrono::{DateTime, Utc};

use super::Airport;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Flight arrives at or before its own departure
    #[error("flight {flight_number} departs at {departure} but arrives at {arrival}")]
    NonPositiveFlightDuration {
        flight_number: String,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    /// Segment sequence numbers are 1-based
    #[error("sequence number must be at least 1")]
    ZeroSequenceNumber,

    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,

    /// Segment numbering has a gap or is out of order
    #[error("segments must be numbered sequentially from 1, found {found} at position {position}")]
    SequenceGap { found: u32, position: u32 },

    /// Adjacent segments do not share an airport
    #[error("segment {position} departs from {found} but the previous segment arrives at {expected}")]
    BrokenContinuity {
        position: u32,
        expected: Airport,
        found: Airport,
    },

    /// Adjacent segments with a zero or negative connection
    #[error("segment {position} departs at {departure}, not after the previous arrival at {previous_arrival}")]
    NonPositiveConnection {
        position: u32,
        departure: DateTime<Utc>,
        previous_arrival: DateTime<Utc>,
    },
}

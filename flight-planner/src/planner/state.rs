//! Search state for beam search.
//!
//! A `SearchState` is an immutable snapshot of a partial itinerary under
//! construction: where the search currently is, when, and how it got
//! there. Expansion produces a new state and never mutates the source,
//! so states can be shared freely within a frontier.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::constraints::PartialState;
use crate::domain::{Airport, Flight, Segment};

/// Error from an inadmissible state expansion.
///
/// The engine treats these as per-candidate skips, never as fatal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StateTransitionError {
    /// Flight does not depart from the state's current airport
    #[error("flight {flight} departs from {flight_origin}, state is at {current}")]
    OriginMismatch {
        flight: String,
        flight_origin: Airport,
        current: Airport,
    },

    /// Flight departs before the state's current time
    #[error("flight {flight} departs at {departure}, before current time {current}")]
    DepartsInPast {
        flight: String,
        departure: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// A partial path during beam search.
///
/// Scoring is deliberately not part of the state: the engine computes a
/// score at frontier-insertion time, keeping states pure data.
#[derive(Debug, Clone)]
pub struct SearchState {
    current_airport: Airport,
    current_time: DateTime<Utc>,
    segments: Vec<Segment>,
    origin_airport: Airport,
    legs_used: u32,
    elapsed: Duration,
}

impl SearchState {
    /// Create the zero-leg starting state at the origin airport.
    pub fn initial(origin: Airport, start_time: DateTime<Utc>) -> Self {
        SearchState {
            current_airport: origin,
            current_time: start_time,
            segments: Vec::new(),
            origin_airport: origin,
            legs_used: 0,
            elapsed: Duration::zero(),
        }
    }

    /// Expand this state by one flight, producing a new state.
    ///
    /// A departure exactly at the current time is admissible here; the
    /// engine's layover cutoff is what enforces separation between legs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the flight doesn't depart from the current
    /// airport, or departs strictly before the current time.
    pub fn expand(&self, flight: &Arc<Flight>) -> Result<Self, StateTransitionError> {
        if flight.origin() != self.current_airport {
            return Err(StateTransitionError::OriginMismatch {
                flight: flight.flight_number().to_string(),
                flight_origin: flight.origin(),
                current: self.current_airport,
            });
        }

        if flight.departure() < self.current_time {
            return Err(StateTransitionError::DepartsInPast {
                flight: flight.flight_number().to_string(),
                departure: flight.departure(),
                current: self.current_time,
            });
        }

        // Safe: legs_used + 1 is always at least 1
        let segment = Segment::new(flight.clone(), self.legs_used + 1).unwrap();

        // Elapsed runs from the first departure; for the first leg that
        // is this flight's own departure.
        let first_departure = self
            .segments
            .first()
            .map(|s| s.flight().departure())
            .unwrap_or_else(|| flight.departure());
        let elapsed = flight.arrival() - first_departure;

        let mut segments = self.segments.clone();
        segments.push(segment);

        Ok(SearchState {
            current_airport: flight.destination(),
            current_time: flight.arrival(),
            segments,
            origin_airport: self.origin_airport,
            legs_used: self.legs_used + 1,
            elapsed,
        })
    }

    /// True if this state has used exactly `target_legs` legs and is back
    /// at the original origin airport.
    ///
    /// This check is independent of `ReturnToOriginConstraint`: the
    /// engine only completes loop states, while the constraint remains
    /// separately configurable (including `required = false`).
    pub fn is_complete(&self, target_legs: u32) -> bool {
        self.legs_used == target_legs && self.current_airport == self.origin_airport
    }

    /// Typed snapshot for constraint partial checks.
    pub fn partial(&self, target_legs: u32) -> PartialState {
        PartialState {
            airport: self.current_airport,
            origin: self.origin_airport,
            current_time: self.current_time,
            elapsed: self.elapsed,
            legs_used: self.legs_used,
            legs_remaining: target_legs.saturating_sub(self.legs_used),
        }
    }

    /// Returns the current airport.
    pub fn current_airport(&self) -> Airport {
        self.current_airport
    }

    /// Returns the current time (last arrival, or the search start).
    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    /// Returns the accumulated segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the original origin airport.
    pub fn origin_airport(&self) -> Airport {
        self.origin_airport
    }

    /// Returns the number of legs used so far.
    pub fn legs_used(&self) -> u32 {
        self.legs_used
    }

    /// Returns the elapsed time since the first departure.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

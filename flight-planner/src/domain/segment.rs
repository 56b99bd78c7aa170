//! Itinerary segment type.
//!
//! A `Segment` is a flight occupying a 1-based position within an
//! itinerary. It uses `Arc<Flight>` for cheap cloning during beam search.

use std::fmt;
use std::sync::Arc;

use super::{DomainError, Flight};

/// A flight leg with its position in an itinerary (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    flight: Arc<Flight>,
    sequence_number: u32,
}

impl Segment {
    /// Construct a segment, validating the sequence number.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `sequence_number` is 0 (numbering starts at 1).
    pub fn new(flight: Arc<Flight>, sequence_number: u32) -> Result<Self, DomainError> {
        if sequence_number < 1 {
            return Err(DomainError::ZeroSequenceNumber);
        }

        Ok(Segment {
            flight,
            sequence_number,
        })
    }

    /// Returns the flight for this segment.
    pub fn flight(&self) -> &Arc<Flight> {
        &self.flight
    }

    /// Returns the 1-based position within the itinerary.
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sequence_number, self.flight)
    }
}

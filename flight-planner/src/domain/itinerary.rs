//! Itinerary type.
//!
//! An `Itinerary` represents a complete multi-leg flight journey. Its
//! segments are validated at construction to be sequentially numbered,
//! spatially continuous, and temporally feasible, so every derived
//! accessor can trust the structure.

use chrono::{DateTime, Duration, Utc};

use super::{Airport, DomainError, Segment};

/// A complete, validated flight itinerary.
///
/// # Invariants
///
/// - At least one segment
/// - Sequence numbers are exactly 1..N with no gaps
/// - Each segment's origin equals the previous segment's destination
/// - Each segment departs strictly after the previous segment arrives
#[derive(Debug, Clone)]
pub struct Itinerary {
    segments: Vec<Segment>,
}

impl Itinerary {
    /// Construct an itinerary from segments, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the segment list is empty, the numbering is not
    /// exactly 1..N, adjacent segments don't share an airport, or a
    /// segment departs at or before the previous segment's arrival.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for (i, segment) in segments.iter().enumerate() {
            let expected = i as u32 + 1;
            if segment.sequence_number() != expected {
                return Err(DomainError::SequenceGap {
                    found: segment.sequence_number(),
                    position: expected,
                });
            }
        }

        for window in segments.windows(2) {
            let prev = window[0].flight();
            let curr = window[1].flight();
            let position = window[1].sequence_number();

            if prev.destination() != curr.origin() {
                return Err(DomainError::BrokenContinuity {
                    position,
                    expected: prev.destination(),
                    found: curr.origin(),
                });
            }

            if curr.departure() <= prev.arrival() {
                return Err(DomainError::NonPositiveConnection {
                    position,
                    departure: curr.departure(),
                    previous_arrival: prev.arrival(),
                });
            }
        }

        Ok(Itinerary { segments })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the origin airport (first segment's origin).
    pub fn origin(&self) -> Airport {
        // Safe: validated non-empty at construction
        self.segments.first().unwrap().flight().origin()
    }

    /// Returns the destination airport (last segment's destination).
    pub fn destination(&self) -> Airport {
        // Safe: validated non-empty at construction
        self.segments.last().unwrap().flight().destination()
    }

    /// Returns the departure time of the first segment.
    pub fn departure_time(&self) -> DateTime<Utc> {
        // Safe: validated non-empty at construction
        self.segments.first().unwrap().flight().departure()
    }

    /// Returns the arrival time of the last segment.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        // Safe: validated non-empty at construction
        self.segments.last().unwrap().flight().arrival()
    }

    /// Returns the total elapsed time (last arrival minus first departure).
    pub fn total_elapsed(&self) -> Duration {
        self.arrival_time() - self.departure_time()
    }

    /// Returns the total time spent in the air (sum of flight durations).
    pub fn total_airtime(&self) -> Duration {
        self.segments
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.flight().duration())
    }

    /// Returns the total time spent at connecting airports.
    pub fn total_layover(&self) -> Duration {
        self.layover_times()
            .into_iter()
            .fold(Duration::zero(), |acc, l| acc + l)
    }

    /// Returns the layover before each segment after the first.
    ///
    /// Empty for single-leg itineraries. Every entry is strictly positive,
    /// guaranteed by construction.
    pub fn layover_times(&self) -> Vec<Duration> {
        self.segments
            .windows(2)
            .map(|w| w[1].flight().departure() - w[0].flight().arrival())
            .collect()
    }
}

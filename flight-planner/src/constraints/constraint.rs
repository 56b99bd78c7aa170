//! Constraint trait and partial-state snapshot.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Airport, Itinerary};

/// Error returned when constraint parameters are invalid.
///
/// Raised eagerly at constraint construction, before any search begins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    /// Leg count constraint needs at least one bound
    #[error("at least one of exact, minimum, or maximum must be specified")]
    NoLegBound,

    /// Leg count bounds are 1-based
    #[error("{name} must be at least 1, got {value}")]
    LegBoundBelowOne { name: &'static str, value: u32 },

    /// Minimum leg bound exceeds maximum
    #[error("minimum ({minimum}) cannot exceed maximum ({maximum})")]
    LegBoundsInverted { minimum: u32, maximum: u32 },

    /// Exact leg bound falls outside [minimum, maximum]
    #[error("exact ({exact}) is incompatible with {name} ({bound})")]
    ExactOutsideBounds {
        exact: u32,
        name: &'static str,
        bound: u32,
    },

    /// Layover minutes must be non-negative
    #[error("minimum layover must be at least 0 minutes, got {0}")]
    NegativeLayover(i64),

    /// Elapsed hours must be positive
    #[error("maximum elapsed time must be greater than 0 hours, got {0}")]
    NonPositiveElapsed(f64),

    /// Time window must have positive extent
    #[error("window start {start} must be before window end {end}")]
    EmptyTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Snapshot of a partial search state, passed to `Constraint::partial_ok`.
///
/// This is the fully-typed view of where the search currently stands:
/// enough for a constraint to decide whether any completion of this
/// partial path could still satisfy it.
#[derive(Debug, Clone, Copy)]
pub struct PartialState {
    /// Current airport.
    pub airport: Airport,
    /// Original origin airport of the search.
    pub origin: Airport,
    /// Current time (arrival of the last leg, or the search start).
    pub current_time: DateTime<Utc>,
    /// Elapsed time since the first departure.
    pub elapsed: Duration,
    /// Legs used so far.
    pub legs_used: u32,
    /// Legs remaining until the target count.
    pub legs_remaining: u32,
}

/// A validation rule over itineraries.
///
/// Implementations are stateless or parameter-holding; they hold no
/// mutable state across calls and are safe to share between concurrent
/// searches.
pub trait Constraint: Send + Sync {
    /// Check whether a complete itinerary satisfies this constraint.
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool;

    /// Return a human-readable violation reason, or `None` if satisfied.
    fn violation(&self, itinerary: &Itinerary) -> Option<String>;

    /// Check whether a partial search state can still satisfy this
    /// constraint.
    ///
    /// Defaults to `true` (continue): not every constraint can be judged
    /// from a partial state. Overrides must never return `false` for a
    /// state that could still yield a satisfying complete itinerary.
    fn partial_ok(&self, state: &PartialState) -> bool {
        let _ = state;
        true
    }
}

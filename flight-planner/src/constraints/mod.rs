//! Constraint system for itinerary validation.
//!
//! Constraints judge complete itineraries (`is_satisfied` / `violation`)
//! and optionally prune partial search states early (`partial_ok`). The
//! partial check must be a safe over-approximation: it may pass a state
//! that later fails full validation, but it must never prune a state that
//! could still complete into a satisfying itinerary.

mod constraint;
mod rules;

pub use constraint::{Constraint, ConstraintError, PartialState};
pub use rules::{
    LegCountConstraint, MaxElapsedConstraint, MinLayoverConstraint, ReturnToOriginConstraint,
    TimeWindowConstraint,
};

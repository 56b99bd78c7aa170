//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod airport;
mod error;
mod flight;
mod itinerary;
mod segment;

pub use airport::{Airport, InvalidAirport};
pub use error::DomainError;
pub use flight::Flight;
pub use itinerary::Itinerary;
pub use segment::Segment;

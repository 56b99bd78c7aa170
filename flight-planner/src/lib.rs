//! Flight loop itinerary planner.
//!
//! Finds multi-leg "loop" routings from a fixed origin airport: flight
//! sequences that satisfy hard structural constraints (exact leg count,
//! minimum connection time, maximum total elapsed time, return to
//! origin) within a bounded time window, ranked by total elapsed time.

pub mod cli;
pub mod constraints;
pub mod domain;
pub mod feed;
pub mod output;
pub mod planner;

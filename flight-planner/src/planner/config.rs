//! Search parameters and the deep-search widening policy.
//!
//! Loop searches with four or more legs explore a combinatorially larger
//! state space and need wider beams, larger candidate budgets, and more
//! days of schedule data to find a return flight. That widening lives
//! here as pure functions over the target leg count, so the thresholds
//! are testable in isolation.

/// Leg count at or above which a search counts as "deep".
const DEEP_SEARCH_LEGS: u32 = 4;

/// Beam width floor for deep searches.
const DEEP_BEAM_WIDTH: usize = 1000;

/// Candidate budget floor for deep searches.
const DEEP_MAX_CANDIDATES: usize = 500_000;

/// Tunable parameters for the beam search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum number of partial-path states retained between depth levels.
    pub beam_width: usize,

    /// Global cap on candidate expansions per search, bounding worst-case
    /// work.
    pub max_candidates: usize,
}

impl SearchParams {
    /// Create parameters with explicit values.
    pub fn new(beam_width: usize, max_candidates: usize) -> Self {
        Self {
            beam_width,
            max_candidates,
        }
    }

    /// Returns the parameters to actually search with for a given target
    /// leg count.
    ///
    /// Below [`DEEP_SEARCH_LEGS`] the parameters pass through unchanged;
    /// at or above it, beam width and candidate budget are raised to at
    /// least the deep-search floors (never lowered).
    pub fn effective_for(self, target_legs: u32) -> Self {
        if target_legs < DEEP_SEARCH_LEGS {
            return self;
        }

        Self {
            beam_width: self.beam_width.max(DEEP_BEAM_WIDTH),
            max_candidates: self.max_candidates.max(DEEP_MAX_CANDIDATES),
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            beam_width: 200,
            max_candidates: 10_000,
        }
    }
}

/// Extra days of schedule data to load beyond the nominal time window.
///
/// Deep searches need schedule data past the window end to find return
/// flights for loops spanning several days; shallow searches need none.
/// This widens only the data range, never the time-window constraint.
pub fn extra_schedule_days(target_legs: u32) -> i64 {
    if target_legs < DEEP_SEARCH_LEGS {
        0
    } else {
        (target_legs as i64 - 2).max(2)
    }
}

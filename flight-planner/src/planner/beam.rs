//! Beam search engine.
//!
//! Explores the flight graph depth-by-depth up to a target leg count,
//! keeping only the top-K scoring partial paths at each level. Candidate
//! expansion is bounded by a global budget, partial states are pruned by
//! the constraint set, and completed loops are validated in full before
//! being collected.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::constraints::Constraint;
use crate::domain::{Airport, Itinerary};

use super::config::SearchParams;
use super::graph::FlightGraph;
use super::state::SearchState;

/// Weight on the fraction of target legs already flown.
const PROGRESS_WEIGHT: f64 = 100.0;

/// Score penalty per elapsed hour.
const ELAPSED_PENALTY_PER_HOUR: f64 = 0.1;

/// Bonus for being back at the origin with exactly the target leg count.
const AT_ORIGIN_BONUS: f64 = 50.0;

/// Counters describing one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Successor candidates generated across all depths.
    pub candidates_generated: u64,
    /// Frontier states expanded across all depths.
    pub states_expanded: u64,
    /// Candidates discarded by a constraint's partial check (or the
    /// hard time-window cutoff).
    pub states_pruned_by_constraints: u64,
    /// Candidates discarded by beam truncation.
    pub states_pruned_by_beam: u64,
    /// Complete itineraries that passed full validation.
    pub complete_itineraries_found: u64,
}

impl SearchStats {
    /// The counters as a name-keyed map, for diagnostics output.
    pub fn as_map(&self) -> BTreeMap<&'static str, u64> {
        BTreeMap::from([
            ("candidates_generated", self.candidates_generated),
            ("states_expanded", self.states_expanded),
            (
                "states_pruned_by_constraints",
                self.states_pruned_by_constraints,
            ),
            ("states_pruned_by_beam", self.states_pruned_by_beam),
            (
                "complete_itineraries_found",
                self.complete_itineraries_found,
            ),
        ])
    }
}

/// Result of one engine run: validated itineraries plus statistics.
#[derive(Debug)]
pub struct BeamOutcome {
    /// Found itineraries, sorted ascending by total elapsed time.
    pub itineraries: Vec<Itinerary>,
    /// Counters for diagnostics.
    pub stats: SearchStats,
}

/// A frontier entry: a partial path with its insertion-time score.
#[derive(Debug)]
struct ScoredState {
    score: f64,
    state: SearchState,
}

/// Beam search over a flight graph under a constraint set.
///
/// The graph and constraints are read-only for the duration of a run,
/// so one engine can serve concurrent searches.
pub struct BeamSearch<'a> {
    graph: &'a FlightGraph,
    constraints: &'a [Box<dyn Constraint>],
    beam_width: usize,
    max_candidates: usize,
}

impl<'a> BeamSearch<'a> {
    /// Create an engine over a graph and constraint set.
    pub fn new(
        graph: &'a FlightGraph,
        constraints: &'a [Box<dyn Constraint>],
        params: SearchParams,
    ) -> Self {
        Self {
            graph,
            constraints,
            beam_width: params.beam_width,
            max_candidates: params.max_candidates,
        }
    }

    /// Run the search.
    ///
    /// Explores depth levels 0..`target_legs`, one full level at a time:
    /// beam truncation at each depth determines exactly which states are
    /// considered at the next. A single malformed candidate (failed
    /// transition or itinerary construction) is skipped, never fatal.
    pub fn run(
        &self,
        origin: Airport,
        start_time: DateTime<Utc>,
        target_legs: u32,
        min_layover: Duration,
        window_end: DateTime<Utc>,
    ) -> BeamOutcome {
        info!(
            %origin,
            target_legs,
            beam_width = self.beam_width,
            "starting beam search"
        );

        let mut stats = SearchStats::default();
        let mut beam = vec![SearchState::initial(origin, start_time)];
        let mut itineraries: Vec<Itinerary> = Vec::new();

        for depth in 0..target_legs {
            if beam.is_empty() {
                warn!(depth, "beam empty, terminating search early");
                break;
            }

            let mut next_beam: Vec<ScoredState> = Vec::new();

            for state in &beam {
                stats.states_expanded += 1;

                // A layover exists only between legs: the first departure
                // is bounded by the start time alone, every later one by
                // the previous arrival plus the minimum connection.
                let cutoff = if state.legs_used() == 0 {
                    state.current_time()
                } else {
                    state.current_time() + min_layover
                };
                let candidates = self.graph.outgoing_flights(state.current_airport(), cutoff);

                for flight in candidates {
                    if stats.candidates_generated >= self.max_candidates as u64 {
                        break;
                    }
                    stats.candidates_generated += 1;

                    let new_state = match state.expand(flight) {
                        Ok(s) => s,
                        Err(_) => continue,
                    };

                    if !self.partial_feasible(&new_state, window_end, target_legs) {
                        stats.states_pruned_by_constraints += 1;
                        continue;
                    }

                    if new_state.is_complete(target_legs) {
                        if let Ok(itinerary) = Itinerary::new(new_state.segments().to_vec()) {
                            if self.fully_feasible(&itinerary) {
                                itineraries.push(itinerary);
                                stats.complete_itineraries_found += 1;
                            }
                        }
                    } else if new_state.legs_used() < target_legs {
                        let score = score_state(&new_state, target_legs);
                        next_beam.push(ScoredState {
                            score,
                            state: new_state,
                        });
                    }
                }
            }

            // Stable sort: ties keep insertion order, which is itself
            // deterministic given the graph's query ordering.
            next_beam.sort_by(|a, b| b.score.total_cmp(&a.score));
            if next_beam.len() > self.beam_width {
                stats.states_pruned_by_beam += (next_beam.len() - self.beam_width) as u64;
                next_beam.truncate(self.beam_width);
            }

            debug!(
                depth,
                frontier = next_beam.len(),
                found = itineraries.len(),
                "depth level complete"
            );

            beam = next_beam.into_iter().map(|s| s.state).collect();
        }

        itineraries.sort_by_key(|it| it.total_elapsed());
        info!(found = itineraries.len(), "beam search complete");

        BeamOutcome { itineraries, stats }
    }

    /// Hard window cutoff plus every constraint's partial check.
    fn partial_feasible(
        &self,
        state: &SearchState,
        window_end: DateTime<Utc>,
        target_legs: u32,
    ) -> bool {
        if state.current_time() > window_end {
            return false;
        }

        let partial = state.partial(target_legs);
        self.constraints.iter().all(|c| c.partial_ok(&partial))
    }

    fn fully_feasible(&self, itinerary: &Itinerary) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(itinerary))
    }
}

/// Heuristic score for beam ranking; higher is better.
///
/// Used only to rank states within one depth level, never for
/// correctness.
fn score_state(state: &SearchState, target_legs: u32) -> f64 {
    let progress = state.legs_used() as f64 / target_legs as f64;
    let elapsed_hours = state.elapsed().num_seconds() as f64 / 3600.0;

    let mut score = progress * PROGRESS_WEIGHT - elapsed_hours * ELAPSED_PENALTY_PER_HOUR;
    if state.legs_used() == target_legs && state.current_airport() == state.origin_airport() {
        score += AT_ORIGIN_BONUS;
    }

    score
}

//! Search orchestrator.
//!
//! Wires the pieces together for one search: loads schedule data for a
//! wide-enough date window, builds the flight graph, snaps the start
//! time to the first real departure, widens search parameters for deep
//! queries, runs the beam search engine, and packages results with
//! statistics, plus a human-readable diagnosis when nothing was found.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::constraints::Constraint;
use crate::domain::{Airport, Itinerary};
use crate::feed::FlightFeed;

use super::beam::{BeamSearch, SearchStats};
use super::config::{SearchParams, extra_schedule_days};
use super::graph::FlightGraph;

/// Parameters for one itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Origin airport for the loop.
    pub origin: Airport,

    /// Search start time (UTC).
    pub start_time: DateTime<Utc>,

    /// Exact number of legs to fly.
    pub target_legs: u32,

    /// Minimum connection time between legs.
    pub min_layover: Duration,

    /// Maximum total elapsed time; also fixes the search time window.
    pub max_elapsed: Duration,

    /// Engine tuning (widened automatically for deep searches).
    pub params: SearchParams,

    /// Maximum number of itineraries to return.
    pub max_results: usize,
}

impl SearchRequest {
    /// Create a request with default layover, window, tuning, and cap.
    pub fn new(origin: Airport, start_time: DateTime<Utc>, target_legs: u32) -> Self {
        Self {
            origin,
            start_time,
            target_legs,
            min_layover: Duration::minutes(45),
            max_elapsed: Duration::hours(48),
            params: SearchParams::default(),
            max_results: 100,
        }
    }
}

/// Result of an itinerary search.
///
/// An empty result is a valid business outcome, not an error: when no
/// itineraries were found, `no_solution_reason` explains why.
#[derive(Debug)]
pub struct SearchResult {
    /// Feasible itineraries, sorted ascending by total elapsed time.
    pub itineraries: Vec<Itinerary>,

    /// Engine statistics for this search.
    pub stats: SearchStats,

    /// Explanation when no itineraries were found.
    pub no_solution_reason: Option<String>,
}

impl SearchResult {
    /// True if any itineraries were found.
    pub fn found_solutions(&self) -> bool {
        !self.itineraries.is_empty()
    }

    fn no_solution(reason: String) -> Self {
        Self {
            itineraries: Vec::new(),
            stats: SearchStats::default(),
            no_solution_reason: Some(reason),
        }
    }
}

/// Orchestrator for itinerary searches over a flight feed.
///
/// Stateless between invocations: every search loads its own data and
/// returns everything in the `SearchResult`.
pub struct ItinerarySearch<F> {
    feed: F,
}

impl<F: FlightFeed> ItinerarySearch<F> {
    /// Create an orchestrator over a flight feed.
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Search for feasible loop itineraries.
    pub fn search(
        &self,
        request: &SearchRequest,
        constraints: &[Box<dyn Constraint>],
    ) -> SearchResult {
        info!(
            origin = %request.origin,
            start = %request.start_time,
            target_legs = request.target_legs,
            "starting itinerary search"
        );

        // The window end is fixed by the requested start, even if the
        // start itself is snapped forward below.
        let window_end = request.start_time + request.max_elapsed;

        // Deep searches need schedule data past the window end to find
        // return flights; the window constraint itself is unchanged.
        let load_start = request.start_time.date_naive();
        let load_end = (window_end + Duration::days(extra_schedule_days(request.target_legs)))
            .date_naive();

        let flights = match self.feed.flights_in_range(load_start, load_end) {
            Ok(flights) => flights,
            Err(e) => {
                warn!(error = %e, "flight data load failed");
                return SearchResult::no_solution(format!("Flight data unavailable: {e}"));
            }
        };

        if flights.is_empty() {
            warn!(origin = %request.origin, "no flights in date range");
            return SearchResult::no_solution(format!(
                "No flights available from {} in date range",
                request.origin
            ));
        }

        let graph = FlightGraph::new(flights);
        info!(
            airports = graph.airport_count(),
            flights = graph.flight_count(),
            "flight graph built"
        );

        if !graph.has_airport(request.origin) {
            return SearchResult::no_solution(format!(
                "Origin airport {} not found in flight data",
                request.origin
            ));
        }

        // Snap the start forward to the first real departure so a
        // midnight start doesn't burn hours of empty time; the window
        // end stays anchored to the original start.
        let mut start_time = request.start_time;
        if let Some(first) = graph.outgoing_flights(request.origin, start_time).first() {
            if first.departure() > start_time {
                info!(
                    from = %start_time,
                    to = %first.departure(),
                    "snapped start to first available departure"
                );
                start_time = first.departure();
            }
        }

        let params = request.params.effective_for(request.target_legs);
        if params != request.params {
            info!(
                beam_width = params.beam_width,
                max_candidates = params.max_candidates,
                "widened parameters for deep search"
            );
        }

        let engine = BeamSearch::new(&graph, constraints, params);
        let outcome = engine.run(
            request.origin,
            start_time,
            request.target_legs,
            request.min_layover,
            window_end,
        );

        debug!(stats = ?outcome.stats.as_map(), "engine statistics");

        let mut itineraries = outcome.itineraries;
        if itineraries.len() > request.max_results {
            info!(cap = request.max_results, "truncating results");
            itineraries.truncate(request.max_results);
        }

        let no_solution_reason = if itineraries.is_empty() {
            Some(diagnose_no_solution(&outcome.stats, request.target_legs))
        } else {
            None
        };

        info!(found = itineraries.len(), "search complete");

        SearchResult {
            itineraries,
            stats: outcome.stats,
            no_solution_reason,
        }
    }
}

/// Build a human-readable explanation of why a search found nothing.
fn diagnose_no_solution(stats: &SearchStats, target_legs: u32) -> String {
    let mut reasons = Vec::new();

    if stats.candidates_generated == 0 {
        reasons.push("No candidate paths could be generated".to_string());
    }

    if stats.states_pruned_by_constraints > 0 {
        reasons.push(format!(
            "{} paths violated constraints",
            stats.states_pruned_by_constraints
        ));
    }

    if stats.complete_itineraries_found == 0 && stats.candidates_generated > 0 {
        reasons.push(format!(
            "No paths returned to origin with exactly {target_legs} legs"
        ));
    }

    if reasons.is_empty() {
        reasons.push("Unknown reason - no feasible itineraries found".to_string());
    }

    let mut explanation = reasons.join("; ");

    // When pruning dominated, the constraints are the likeliest culprit.
    if stats.states_pruned_by_constraints as f64 > stats.candidates_generated as f64 * 0.8 {
        explanation.push_str(
            ". Suggestions: Try relaxing constraints (e.g., increase max elapsed time)",
        );
    }

    explanation
}

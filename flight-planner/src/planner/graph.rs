//! Flight graph index.
//!
//! A directed graph over airports whose edges are scheduled flights.
//! Built once per search from a flight list; per-airport adjacency
//! vectors are sorted at build time so that repeated time-cutoff queries
//! reduce to a binary search plus a slice.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Airport, Flight};

/// Immutable index of flights keyed by airport.
///
/// Supports the two queries the search needs: "flights departing X at or
/// after T" and "flights arriving at X at or before T", both in
/// chronological order. Multiple flights on the same origin/destination
/// pair are all retained.
#[derive(Debug)]
pub struct FlightGraph {
    /// Flights departing each airport, sorted by departure time.
    outgoing: HashMap<Airport, Vec<Arc<Flight>>>,
    /// Flights arriving at each airport, sorted by arrival time.
    incoming: HashMap<Airport, Vec<Arc<Flight>>>,
    airports: HashSet<Airport>,
    flight_count: usize,
}

impl FlightGraph {
    /// Build the graph from a list of flights.
    ///
    /// Each flight is wrapped in `Arc` so it can be shared between the
    /// index and every search state that references it.
    pub fn new(flights: Vec<Flight>) -> Self {
        let flight_count = flights.len();
        let mut outgoing: HashMap<Airport, Vec<Arc<Flight>>> = HashMap::new();
        let mut incoming: HashMap<Airport, Vec<Arc<Flight>>> = HashMap::new();
        let mut airports = HashSet::new();

        for flight in flights {
            let flight = Arc::new(flight);
            airports.insert(flight.origin());
            airports.insert(flight.destination());
            outgoing
                .entry(flight.origin())
                .or_default()
                .push(flight.clone());
            incoming.entry(flight.destination()).or_default().push(flight);
        }

        // Stable sorts keep insertion order among equal timestamps, which
        // in turn keeps query results deterministic for a given input order.
        for flights in outgoing.values_mut() {
            flights.sort_by_key(|f| f.departure());
        }
        for flights in incoming.values_mut() {
            flights.sort_by_key(|f| f.arrival());
        }

        FlightGraph {
            outgoing,
            incoming,
            airports,
            flight_count,
        }
    }

    /// Flights departing `airport` at or after `not_before`, ordered by
    /// departure time ascending. Empty if the airport is unknown.
    pub fn outgoing_flights(&self, airport: Airport, not_before: DateTime<Utc>) -> &[Arc<Flight>] {
        match self.outgoing.get(&airport) {
            Some(flights) => {
                let idx = flights.partition_point(|f| f.departure() < not_before);
                &flights[idx..]
            }
            None => &[],
        }
    }

    /// Flights arriving at `airport` at or before `not_after`, ordered by
    /// arrival time ascending. Empty if the airport is unknown.
    pub fn incoming_flights(&self, airport: Airport, not_after: DateTime<Utc>) -> &[Arc<Flight>] {
        match self.incoming.get(&airport) {
            Some(flights) => {
                let idx = flights.partition_point(|f| f.arrival() <= not_after);
                &flights[..idx]
            }
            None => &[],
        }
    }

    /// Returns true if the airport has any flights (in or out).
    pub fn has_airport(&self, airport: Airport) -> bool {
        self.airports.contains(&airport)
    }

    /// Number of distinct airports in the graph.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    /// Total number of flights in the graph.
    pub fn flight_count(&self) -> usize {
        self.flight_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    fn flight(number: &str, from: &str, to: &str, dep: DateTime<Utc>, arr: DateTime<Utc>) -> Flight {
        Flight::new(number, airport(from), airport(to), dep, arr, "737").unwrap()
    }

    fn sample_graph() -> FlightGraph {
        FlightGraph::new(vec![
            flight("UA100", "EWR", "ORD", ts(9, 0), ts(11, 0)),
            flight("UA200", "EWR", "ORD", ts(13, 0), ts(15, 0)),
            flight("UA300", "EWR", "DEN", ts(10, 0), ts(14, 0)),
            flight("UA400", "ORD", "EWR", ts(12, 0), ts(15, 30)),
        ])
    }

    #[test]
    fn counts() {
        let graph = sample_graph();

        assert_eq!(graph.flight_count(), 4);
        assert_eq!(graph.airport_count(), 3);
        assert!(graph.has_airport(airport("EWR")));
        assert!(graph.has_airport(airport("DEN")));
        assert!(!graph.has_airport(airport("SFO")));
    }

    #[test]
    fn outgoing_sorted_and_filtered() {
        let graph = sample_graph();

        let all = graph.outgoing_flights(airport("EWR"), ts(0, 0));
        let numbers: Vec<_> = all.iter().map(|f| f.flight_number()).collect();
        assert_eq!(numbers, vec!["UA100", "UA300", "UA200"]);

        // Cutoff is inclusive
        let from_ten = graph.outgoing_flights(airport("EWR"), ts(10, 0));
        let numbers: Vec<_> = from_ten.iter().map(|f| f.flight_number()).collect();
        assert_eq!(numbers, vec!["UA300", "UA200"]);

        let late = graph.outgoing_flights(airport("EWR"), ts(14, 0));
        assert!(late.is_empty());
    }

    #[test]
    fn incoming_sorted_and_filtered() {
        let graph = sample_graph();

        let all = graph.incoming_flights(airport("ORD"), ts(23, 59));
        let numbers: Vec<_> = all.iter().map(|f| f.flight_number()).collect();
        assert_eq!(numbers, vec!["UA100", "UA200"]);

        // Cutoff is inclusive
        let until_eleven = graph.incoming_flights(airport("ORD"), ts(11, 0));
        let numbers: Vec<_> = until_eleven.iter().map(|f| f.flight_number()).collect();
        assert_eq!(numbers, vec!["UA100"]);
    }

    #[test]
    fn unknown_airport_is_empty() {
        let graph = sample_graph();

        assert!(graph.outgoing_flights(airport("SFO"), ts(0, 0)).is_empty());
        assert!(graph.incoming_flights(airport("SFO"), ts(23, 0)).is_empty());
    }

    #[test]
    fn duplicate_routes_are_retained() {
        let graph = FlightGraph::new(vec![
            flight("UA100", "EWR", "ORD", ts(9, 0), ts(11, 0)),
            flight("UA500", "EWR", "ORD", ts(9, 0), ts(11, 5)),
        ]);

        assert_eq!(graph.flight_count(), 2);
        assert_eq!(graph.outgoing_flights(airport("EWR"), ts(9, 0)).len(), 2);
    }

    #[test]
    fn empty_graph() {
        let graph = FlightGraph::new(vec![]);

        assert_eq!(graph.flight_count(), 0);
        assert_eq!(graph.airport_count(), 0);
        assert!(!graph.has_airport(airport("EWR")));
    }
}

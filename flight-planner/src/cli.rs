//! Command-line interface.
//!
//! Argument parsing and validation, plus the translation from CLI flags
//! into the constraint set the search runs with.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser};

use crate::constraints::{
    Constraint, ConstraintError, LegCountConstraint, MaxElapsedConstraint, MinLayoverConstraint,
    ReturnToOriginConstraint,
};
use crate::domain::Airport;

/// Default minimum layover in minutes.
pub const DEFAULT_MIN_LAYOVER_MINUTES: i64 = 45;

/// Default maximum elapsed time in hours.
pub const DEFAULT_MAX_ELAPSED_HOURS: f64 = 48.0;

/// Extended window for deep searches started with the default window.
const DEEP_SEARCH_MAX_ELAPSED_HOURS: f64 = 72.0;

/// Error from CLI argument validation that clap cannot express.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    /// Date range given in the wrong order
    #[error("start date {start} must be on or before end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}

/// Find multi-leg loop flight itineraries from a fixed origin airport.
#[derive(Debug, Parser)]
#[command(name = "flight-planner", version)]
#[command(group(ArgGroup::new("when").required(true).args(["date", "date_range"])))]
pub struct Cli {
    /// Origin airport IATA code (e.g., EWR)
    #[arg(long, value_parser = Airport::parse)]
    pub origin: Airport,

    /// Departure date in YYYY-MM-DD format
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Date range: START END (both in YYYY-MM-DD format)
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub date_range: Option<Vec<NaiveDate>>,

    /// Exact number of flight legs
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub legs: u32,

    /// Minimum layover time in minutes
    #[arg(long, default_value_t = DEFAULT_MIN_LAYOVER_MINUTES, value_parser = clap::value_parser!(i64).range(0..))]
    pub min_layover: i64,

    /// Maximum total elapsed time in hours
    #[arg(long, default_value_t = DEFAULT_MAX_ELAPSED_HOURS)]
    pub max_elapsed: f64,

    /// Maximum number of results to display
    #[arg(long, default_value_t = 10)]
    pub max_results: usize,

    /// Destination airport IATA code (defaults to the origin, for loops)
    #[arg(long, value_parser = Airport::parse)]
    pub destination: Option<Airport>,

    /// Path to the JSON schedule file
    #[arg(long, default_value = "data/schedule.json")]
    pub schedule: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The search start date, from `--date` or the start of `--date-range`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the date range is inverted.
    pub fn start_date(&self) -> Result<NaiveDate, CliError> {
        if let Some(date) = self.date {
            return Ok(date);
        }

        // Safe: clap requires exactly one of date/date_range, with two values
        let range = self.date_range.as_ref().unwrap();
        let (start, end) = (range[0], range[1]);
        if start > end {
            return Err(CliError::InvertedDateRange { start, end });
        }

        Ok(start)
    }

    /// The elapsed-time ceiling to search with.
    ///
    /// Deep searches (4+ legs) started with the default window get an
    /// extended one, since multi-leg loops routinely span extra days. An
    /// explicit `--max-elapsed` always wins.
    pub fn effective_max_elapsed_hours(&self) -> f64 {
        if self.legs >= 4 && self.max_elapsed == DEFAULT_MAX_ELAPSED_HOURS {
            DEEP_SEARCH_MAX_ELAPSED_HOURS
        } else {
            self.max_elapsed
        }
    }

    /// True if this is a loop search (no destination, or destination
    /// equals origin).
    pub fn is_loop_search(&self) -> bool {
        match self.destination {
            None => true,
            Some(destination) => destination == self.origin,
        }
    }
}

/// Build the constraint set for a search from CLI parameters.
///
/// The time window is deliberately not a constraint here: the engine
/// already enforces it via its window-end parameter, and adding it as a
/// constraint would fight the orchestrator's start-time snapping.
///
/// # Errors
///
/// Returns `Err` if any constraint parameter is invalid.
pub fn build_constraints(cli: &Cli) -> Result<Vec<Box<dyn Constraint>>, ConstraintError> {
    let mut constraints: Vec<Box<dyn Constraint>> = Vec::new();

    constraints.push(Box::new(LegCountConstraint::exactly(cli.legs)?));

    if cli.is_loop_search() {
        constraints.push(Box::new(ReturnToOriginConstraint::new(true)));
    }

    constraints.push(Box::new(MinLayoverConstraint::new(cli.min_layover)?));
    constraints.push(Box::new(MaxElapsedConstraint::new(
        cli.effective_max_elapsed_hours(),
    )?));

    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn minimal_invocation() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "4",
        ]);

        assert_eq!(cli.origin.as_str(), "EWR");
        assert_eq!(cli.legs, 4);
        assert_eq!(cli.min_layover, 45);
        assert_eq!(cli.max_elapsed, 48.0);
        assert_eq!(cli.max_results, 10);
        assert!(cli.destination.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn origin_is_normalized() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "ewr",
            "--date",
            "2025-01-15",
            "--legs",
            "2",
        ]);
        assert_eq!(cli.origin.as_str(), "EWR");
    }

    #[test]
    fn rejects_invalid_airport() {
        assert!(
            Cli::try_parse_from([
                "flight-planner",
                "--origin",
                "NEWARK",
                "--date",
                "2025-01-15",
                "--legs",
                "2",
            ])
            .is_err()
        );
    }

    #[test]
    fn rejects_zero_legs() {
        assert!(
            Cli::try_parse_from([
                "flight-planner",
                "--origin",
                "EWR",
                "--date",
                "2025-01-15",
                "--legs",
                "0",
            ])
            .is_err()
        );
    }

    #[test]
    fn requires_a_date() {
        assert!(
            Cli::try_parse_from(["flight-planner", "--origin", "EWR", "--legs", "2"]).is_err()
        );
    }

    #[test]
    fn date_and_range_are_mutually_exclusive() {
        assert!(
            Cli::try_parse_from([
                "flight-planner",
                "--origin",
                "EWR",
                "--date",
                "2025-01-15",
                "--date-range",
                "2025-01-15",
                "2025-01-17",
                "--legs",
                "2",
            ])
            .is_err()
        );
    }

    #[test]
    fn start_date_from_single_date() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "2",
        ]);
        assert_eq!(
            cli.start_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn start_date_from_range() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date-range",
            "2025-01-15",
            "2025-01-17",
            "--legs",
            "2",
        ]);
        assert_eq!(
            cli.start_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date-range",
            "2025-01-17",
            "2025-01-15",
            "--legs",
            "2",
        ]);
        assert!(matches!(
            cli.start_date(),
            Err(CliError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn deep_search_extends_default_window() {
        let shallow = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "3",
        ]);
        assert_eq!(shallow.effective_max_elapsed_hours(), 48.0);

        let deep = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "4",
        ]);
        assert_eq!(deep.effective_max_elapsed_hours(), 72.0);
    }

    #[test]
    fn explicit_window_is_never_overridden() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "5",
            "--max-elapsed",
            "24",
        ]);
        assert_eq!(cli.effective_max_elapsed_hours(), 24.0);
    }

    #[test]
    fn loop_search_adds_return_constraint() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "2",
        ]);
        assert!(cli.is_loop_search());
        // LegCount + ReturnToOrigin + MinLayover + MaxElapsed
        assert_eq!(build_constraints(&cli).unwrap().len(), 4);
    }

    #[test]
    fn explicit_destination_matching_origin_is_a_loop() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "2",
            "--destination",
            "ewr",
        ]);
        assert!(cli.is_loop_search());
    }

    #[test]
    fn different_destination_drops_return_constraint() {
        let cli = parse(&[
            "flight-planner",
            "--origin",
            "EWR",
            "--date",
            "2025-01-15",
            "--legs",
            "2",
            "--destination",
            "SFO",
        ]);
        assert!(!cli.is_loop_search());
        assert_eq!(build_constraints(&cli).unwrap().len(), 3);
    }
}

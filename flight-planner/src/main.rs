use std::process::ExitCode;

use chrono::Duration;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flight_planner::cli::{Cli, build_constraints};
use flight_planner::feed::JsonFlightFeed;
use flight_planner::output::format_results;
use flight_planner::planner::{ItinerarySearch, SearchRequest};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(found) => {
            if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let start_date = cli.start_date()?;
    // Searches start at midnight UTC; the orchestrator snaps forward to
    // the first real departure.
    let start_time = start_date.and_time(chrono::NaiveTime::MIN).and_utc();

    let max_elapsed_hours = cli.effective_max_elapsed_hours();
    let constraints = build_constraints(cli)?;

    let feed = JsonFlightFeed::load(&cli.schedule)?;
    let search = ItinerarySearch::new(feed);

    let mut request = SearchRequest::new(cli.origin, start_time, cli.legs);
    request.min_layover = Duration::minutes(cli.min_layover);
    request.max_elapsed = Duration::seconds((max_elapsed_hours * 3600.0).round() as i64);
    request.max_results = cli.max_results;

    let result = search.search(&request, &constraints);

    println!("{}", format_results(&result, cli.max_results));

    Ok(result.found_solutions())
}

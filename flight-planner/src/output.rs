//! Result formatting for the CLI.
//!
//! Renders search results as readable text, grouped by departure date so
//! that near-identical loops on different days don't crowd each other
//! out of the listing.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{Itinerary, Segment};
use crate::planner::SearchResult;

/// Format a duration as "2h 30m", "2h", or "45m".
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Format a timestamp as "2025-01-15 08:00 UTC".
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn format_segment(segment: &Segment) -> String {
    let flight = segment.flight();
    format!(
        "  Leg {}: {}  {} -> {}  ({} -> {}, {})",
        segment.sequence_number(),
        flight.flight_number(),
        flight.origin(),
        flight.destination(),
        flight.departure().format("%H:%M"),
        flight.arrival().format("%H:%M"),
        format_duration(flight.duration()),
    )
}

/// Format one itinerary with its rank, segments, layovers, and summary.
pub fn format_itinerary(itinerary: &Itinerary, rank: usize, show_date: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    let elapsed = format_duration(itinerary.total_elapsed());
    if show_date {
        let _ = writeln!(
            out,
            "Itinerary {rank} - {} - Total Time: {elapsed}",
            itinerary.departure_time().date_naive()
        );
    } else {
        let _ = writeln!(out, "Itinerary {rank} - Total Time: {elapsed}");
    }
    out.push_str(&rule);

    let layovers = itinerary.layover_times();
    for (i, segment) in itinerary.segments().iter().enumerate() {
        out.push('\n');
        out.push_str(&format_segment(segment));
        if let Some(layover) = layovers.get(i) {
            let _ = write!(
                out,
                "\n    -> Layover: {} at {}",
                format_duration(*layover),
                segment.flight().destination()
            );
        }
    }

    let _ = write!(
        out,
        "\n\nSummary: {} total | {} airtime | {} layovers",
        format_duration(itinerary.total_elapsed()),
        format_duration(itinerary.total_airtime()),
        format_duration(itinerary.total_layover()),
    );

    out
}

fn format_no_solutions(reason: &str) -> String {
    [
        "No feasible itineraries found.",
        "",
        &format!("Reason: {reason}"),
        "",
        "Suggestions:",
        "  - Try relaxing constraints (e.g., increase --max-elapsed)",
        "  - Try a different date or date range",
        "  - Try a different origin airport",
        "  - Try adjusting --min-layover to allow tighter connections",
    ]
    .join("\n")
}

/// Format search results, grouped by departure date.
///
/// At most `max_results` itineraries are shown per departure date; day
/// headers appear only when the results span multiple dates.
pub fn format_results(result: &SearchResult, max_results: usize) -> String {
    if !result.found_solutions() {
        let reason = result.no_solution_reason.as_deref().unwrap_or("Unknown reason");
        return format_no_solutions(reason);
    }

    // Itineraries are already sorted by elapsed time; a stable grouping
    // keeps the per-day ordering intact.
    let mut by_date: BTreeMap<NaiveDate, Vec<&Itinerary>> = BTreeMap::new();
    for itinerary in &result.itineraries {
        by_date
            .entry(itinerary.departure_time().date_naive())
            .or_default()
            .push(itinerary);
    }

    let multi_day = by_date.len() > 1;
    let total = result.itineraries.len();

    let mut out = String::new();
    out.push('\n');
    if total > max_results * by_date.len() {
        let _ = writeln!(out, "Found {total} itineraries (showing top {max_results} per day):");
    } else if total == 1 {
        out.push_str("Found 1 itinerary:\n");
    } else {
        let _ = writeln!(out, "Found {total} itineraries:");
    }

    let mut rank = 0;
    for (date, itineraries) in &by_date {
        let shown = itineraries.len().min(max_results);
        if multi_day {
            let rule = "#".repeat(80);
            let _ = write!(
                out,
                "\n{rule}\n# Departure Date: {date} ({} itineraries found, showing top {shown})\n{rule}",
                itineraries.len()
            );
        }
        for itinerary in itineraries.iter().take(shown) {
            rank += 1;
            out.push_str(&format_itinerary(itinerary, rank, multi_day));
            out.push('\n');
        }
    }

    out
}

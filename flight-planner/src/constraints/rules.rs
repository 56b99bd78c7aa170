//! The built-in constraint rules.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Itinerary;

use super::{Constraint, ConstraintError, PartialState};

/// Constraint enforcing exact, minimum, or maximum leg count.
#[derive(Debug, Clone)]
pub struct LegCountConstraint {
    exact: Option<u32>,
    minimum: Option<u32>,
    maximum: Option<u32>,
}

impl LegCountConstraint {
    /// Construct with any combination of bounds; at least one is required.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no bound is given, a bound is below 1, minimum
    /// exceeds maximum, or exact falls outside [minimum, maximum].
    pub fn new(
        exact: Option<u32>,
        minimum: Option<u32>,
        maximum: Option<u32>,
    ) -> Result<Self, ConstraintError> {
        if exact.is_none() && minimum.is_none() && maximum.is_none() {
            return Err(ConstraintError::NoLegBound);
        }

        for (name, bound) in [("exact", exact), ("minimum", minimum), ("maximum", maximum)] {
            if let Some(value) = bound {
                if value < 1 {
                    return Err(ConstraintError::LegBoundBelowOne { name, value });
                }
            }
        }

        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(ConstraintError::LegBoundsInverted {
                    minimum: min,
                    maximum: max,
                });
            }
        }
        if let Some(e) = exact {
            if let Some(min) = minimum {
                if e < min {
                    return Err(ConstraintError::ExactOutsideBounds {
                        exact: e,
                        name: "minimum",
                        bound: min,
                    });
                }
            }
            if let Some(max) = maximum {
                if e > max {
                    return Err(ConstraintError::ExactOutsideBounds {
                        exact: e,
                        name: "maximum",
                        bound: max,
                    });
                }
            }
        }

        Ok(LegCountConstraint {
            exact,
            minimum,
            maximum,
        })
    }

    /// Construct a constraint requiring exactly `legs` legs.
    pub fn exactly(legs: u32) -> Result<Self, ConstraintError> {
        Self::new(Some(legs), None, None)
    }
}

impl Constraint for LegCountConstraint {
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool {
        let legs = itinerary.leg_count() as u32;

        if self.exact.is_some_and(|e| legs != e) {
            return false;
        }
        if self.minimum.is_some_and(|min| legs < min) {
            return false;
        }
        if self.maximum.is_some_and(|max| legs > max) {
            return false;
        }

        true
    }

    fn violation(&self, itinerary: &Itinerary) -> Option<String> {
        let legs = itinerary.leg_count() as u32;

        if let Some(e) = self.exact {
            if legs != e {
                return Some(format!("leg count is {legs}, required exactly {e}"));
            }
        }
        if let Some(min) = self.minimum {
            if legs < min {
                return Some(format!("leg count is {legs}, required at least {min}"));
            }
        }
        if let Some(max) = self.maximum {
            if legs > max {
                return Some(format!("leg count is {legs}, required at most {max}"));
            }
        }

        None
    }

    fn partial_ok(&self, state: &PartialState) -> bool {
        // A partial path that already overshoots the ceiling can never
        // recover; anything at or below it still can.
        if self.maximum.is_some_and(|max| state.legs_used > max) {
            return false;
        }
        if self.exact.is_some_and(|e| state.legs_used > e) {
            return false;
        }

        true
    }
}

/// Constraint requiring the itinerary to return to its origin airport.
#[derive(Debug, Clone)]
pub struct ReturnToOriginConstraint {
    required: bool,
}

impl ReturnToOriginConstraint {
    /// Construct; with `required = false` the constraint always passes,
    /// which keeps it composable for non-loop searches.
    pub fn new(required: bool) -> Self {
        Self { required }
    }
}

impl Constraint for ReturnToOriginConstraint {
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool {
        !self.required || itinerary.origin() == itinerary.destination()
    }

    fn violation(&self, itinerary: &Itinerary) -> Option<String> {
        if self.required && itinerary.origin() != itinerary.destination() {
            return Some(format!(
                "itinerary does not return to origin: starts at {}, ends at {}",
                itinerary.origin(),
                itinerary.destination()
            ));
        }

        None
    }

    fn partial_ok(&self, state: &PartialState) -> bool {
        // Only the final position is decisive; any earlier airport can
        // still route back to the origin.
        if !self.required {
            return true;
        }

        state.legs_remaining > 0 || state.airport == state.origin
    }
}

/// Constraint requiring all layovers to be at least a minimum duration.
#[derive(Debug, Clone)]
pub struct MinLayoverConstraint {
    min_minutes: i64,
    minimum: Duration,
}

impl MinLayoverConstraint {
    /// Construct from a minimum in minutes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `min_minutes` is negative.
    pub fn new(min_minutes: i64) -> Result<Self, ConstraintError> {
        if min_minutes < 0 {
            return Err(ConstraintError::NegativeLayover(min_minutes));
        }

        Ok(Self {
            min_minutes,
            minimum: Duration::minutes(min_minutes),
        })
    }
}

impl Constraint for MinLayoverConstraint {
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool {
        itinerary
            .layover_times()
            .into_iter()
            .all(|layover| layover >= self.minimum)
    }

    fn violation(&self, itinerary: &Itinerary) -> Option<String> {
        let violations: Vec<String> = itinerary
            .layover_times()
            .into_iter()
            .enumerate()
            .filter(|(_, layover)| *layover < self.minimum)
            .map(|(i, layover)| {
                format!(
                    "layover {} is {} minutes (minimum {} minutes)",
                    i + 1,
                    layover.num_minutes(),
                    self.min_minutes
                )
            })
            .collect();

        if violations.is_empty() {
            None
        } else {
            Some(violations.join("; "))
        }
    }

    // No partial_ok override: the engine already queries the graph only
    // for departures at or after (current time + minimum layover), so a
    // partial state can never contain a short connection.
}

/// Constraint requiring total elapsed time to be at most a maximum.
#[derive(Debug, Clone)]
pub struct MaxElapsedConstraint {
    max_hours: f64,
    maximum: Duration,
}

impl MaxElapsedConstraint {
    /// Construct from a maximum in hours.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `max_hours` is not strictly positive.
    pub fn new(max_hours: f64) -> Result<Self, ConstraintError> {
        if max_hours.is_nan() || max_hours <= 0.0 {
            return Err(ConstraintError::NonPositiveElapsed(max_hours));
        }

        Ok(Self {
            max_hours,
            maximum: Duration::seconds((max_hours * 3600.0).round() as i64),
        })
    }
}

impl Constraint for MaxElapsedConstraint {
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool {
        itinerary.total_elapsed() <= self.maximum
    }

    fn violation(&self, itinerary: &Itinerary) -> Option<String> {
        let elapsed = itinerary.total_elapsed();
        if elapsed > self.maximum {
            let elapsed_hours = elapsed.num_seconds() as f64 / 3600.0;
            return Some(format!(
                "total elapsed time is {:.1} hours (maximum {} hours)",
                elapsed_hours, self.max_hours
            ));
        }

        None
    }

    fn partial_ok(&self, state: &PartialState) -> bool {
        // Elapsed time only grows with each leg.
        state.elapsed <= self.maximum
    }
}

/// Constraint requiring the itinerary to fit within a time window.
#[derive(Debug, Clone)]
pub struct TimeWindowConstraint {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindowConstraint {
    /// Construct from inclusive window bounds.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `start` is not strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConstraintError> {
        if start >= end {
            return Err(ConstraintError::EmptyTimeWindow { start, end });
        }

        Ok(Self { start, end })
    }
}

impl Constraint for TimeWindowConstraint {
    fn is_satisfied(&self, itinerary: &Itinerary) -> bool {
        itinerary.departure_time() >= self.start && itinerary.arrival_time() <= self.end
    }

    fn violation(&self, itinerary: &Itinerary) -> Option<String> {
        if itinerary.departure_time() < self.start {
            return Some(format!(
                "departure time {} is before window start {}",
                itinerary.departure_time(),
                self.start
            ));
        }
        if itinerary.arrival_time() > self.end {
            return Some(format!(
                "arrival time {} is after window end {}",
                itinerary.arrival_time(),
                self.end
            ));
        }

        None
    }

    fn partial_ok(&self, state: &PartialState) -> bool {
        if state.current_time < self.start {
            return true;
        }
        if state.current_time > self.end {
            return false;
        }

        // Use elapsed-so-far as the remaining-budget estimate for the
        // final arrival.
        state.current_time + state.elapsed <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airport, Flight, Segment};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn airport(s: &str) -> Airport {
        Airport::parse(s).unwrap()
    }

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    fn segment(from: &str, to: &str, dep: DateTime<Utc>, arr: DateTime<Utc>, seq: u32) -> Segment {
        let flight = Arc::new(
            Flight::new(format!("UA{}", 100 + seq), airport(from), airport(to), dep, arr, "737")
                .unwrap(),
        );
        Segment::new(flight, seq).unwrap()
    }

    /// EWR -> ORD -> EWR loop with one-hour layover, elapsed 6h.
    fn loop_itinerary() -> Itinerary {
        Itinerary::new(vec![
            segment("EWR", "ORD", ts(9, 0), ts(11, 0), 1),
            segment("ORD", "EWR", ts(12, 0), ts(15, 0), 2),
        ])
        .unwrap()
    }

    /// EWR -> ORD one-way.
    fn one_way_itinerary() -> Itinerary {
        Itinerary::new(vec![segment("EWR", "ORD", ts(9, 0), ts(11, 0), 1)]).unwrap()
    }

    fn partial(airport_code: &str, legs_used: u32, legs_remaining: u32) -> PartialState {
        PartialState {
            airport: airport(airport_code),
            origin: airport("EWR"),
            current_time: ts(11, 0),
            elapsed: Duration::hours(2),
            legs_used,
            legs_remaining,
        }
    }

    // LegCountConstraint

    #[test]
    fn leg_count_requires_a_bound() {
        assert_eq!(
            LegCountConstraint::new(None, None, None).unwrap_err(),
            ConstraintError::NoLegBound
        );
    }

    #[test]
    fn leg_count_rejects_zero_bounds() {
        assert!(matches!(
            LegCountConstraint::new(Some(0), None, None),
            Err(ConstraintError::LegBoundBelowOne { name: "exact", .. })
        ));
        assert!(matches!(
            LegCountConstraint::new(None, Some(0), None),
            Err(ConstraintError::LegBoundBelowOne { name: "minimum", .. })
        ));
    }

    #[test]
    fn leg_count_rejects_inverted_bounds() {
        assert!(matches!(
            LegCountConstraint::new(None, Some(3), Some(2)),
            Err(ConstraintError::LegBoundsInverted { .. })
        ));
    }

    #[test]
    fn leg_count_rejects_exact_outside_bounds() {
        assert!(matches!(
            LegCountConstraint::new(Some(1), Some(2), None),
            Err(ConstraintError::ExactOutsideBounds { .. })
        ));
        assert!(matches!(
            LegCountConstraint::new(Some(5), None, Some(4)),
            Err(ConstraintError::ExactOutsideBounds { .. })
        ));
    }

    #[test]
    fn leg_count_exact() {
        let constraint = LegCountConstraint::exactly(2).unwrap();

        assert!(constraint.is_satisfied(&loop_itinerary()));
        assert!(constraint.violation(&loop_itinerary()).is_none());

        assert!(!constraint.is_satisfied(&one_way_itinerary()));
        assert_eq!(
            constraint.violation(&one_way_itinerary()).unwrap(),
            "leg count is 1, required exactly 2"
        );
    }

    #[test]
    fn leg_count_min_max() {
        let constraint = LegCountConstraint::new(None, Some(2), Some(3)).unwrap();

        assert!(constraint.is_satisfied(&loop_itinerary()));
        assert!(!constraint.is_satisfied(&one_way_itinerary()));
        assert_eq!(
            constraint.violation(&one_way_itinerary()).unwrap(),
            "leg count is 1, required at least 2"
        );
    }

    #[test]
    fn leg_count_partial_prunes_overshoot_only() {
        let constraint = LegCountConstraint::exactly(3).unwrap();

        assert!(constraint.partial_ok(&partial("ORD", 0, 3)));
        assert!(constraint.partial_ok(&partial("ORD", 3, 0)));
        assert!(!constraint.partial_ok(&partial("ORD", 4, 0)));
    }

    // ReturnToOriginConstraint

    #[test]
    fn return_to_origin_required() {
        let constraint = ReturnToOriginConstraint::new(true);

        assert!(constraint.is_satisfied(&loop_itinerary()));
        assert!(!constraint.is_satisfied(&one_way_itinerary()));
        assert_eq!(
            constraint.violation(&one_way_itinerary()).unwrap(),
            "itinerary does not return to origin: starts at EWR, ends at ORD"
        );
    }

    #[test]
    fn return_to_origin_not_required() {
        let constraint = ReturnToOriginConstraint::new(false);

        assert!(constraint.is_satisfied(&one_way_itinerary()));
        assert!(constraint.violation(&one_way_itinerary()).is_none());
        assert!(constraint.partial_ok(&partial("ORD", 2, 0)));
    }

    #[test]
    fn return_to_origin_partial_prunes_only_at_final_leg() {
        let constraint = ReturnToOriginConstraint::new(true);

        // Away from origin with legs remaining: could still return
        assert!(constraint.partial_ok(&partial("ORD", 1, 2)));
        // Away from origin with no legs remaining: dead end
        assert!(!constraint.partial_ok(&partial("ORD", 3, 0)));
        // Back at origin with no legs remaining: complete
        assert!(constraint.partial_ok(&partial("EWR", 3, 0)));
    }

    // MinLayoverConstraint

    #[test]
    fn min_layover_rejects_negative() {
        assert!(matches!(
            MinLayoverConstraint::new(-1),
            Err(ConstraintError::NegativeLayover(-1))
        ));
    }

    #[test]
    fn min_layover_satisfied() {
        let constraint = MinLayoverConstraint::new(45).unwrap();

        // Loop itinerary has a 60-minute layover
        assert!(constraint.is_satisfied(&loop_itinerary()));
        assert!(constraint.violation(&loop_itinerary()).is_none());
    }

    #[test]
    fn min_layover_violated() {
        let constraint = MinLayoverConstraint::new(90).unwrap();

        assert!(!constraint.is_satisfied(&loop_itinerary()));
        assert_eq!(
            constraint.violation(&loop_itinerary()).unwrap(),
            "layover 1 is 60 minutes (minimum 90 minutes)"
        );
    }

    #[test]
    fn min_layover_single_leg_trivially_satisfied() {
        let constraint = MinLayoverConstraint::new(240).unwrap();
        assert!(constraint.is_satisfied(&one_way_itinerary()));
    }

    #[test]
    fn min_layover_never_prunes_partials() {
        let constraint = MinLayoverConstraint::new(600).unwrap();
        assert!(constraint.partial_ok(&partial("ORD", 1, 2)));
    }

    // MaxElapsedConstraint

    #[test]
    fn max_elapsed_rejects_non_positive() {
        assert!(MaxElapsedConstraint::new(0.0).is_err());
        assert!(MaxElapsedConstraint::new(-2.0).is_err());
    }

    #[test]
    fn max_elapsed_boundary() {
        // Loop itinerary elapsed is exactly 6h
        assert!(MaxElapsedConstraint::new(6.0).unwrap().is_satisfied(&loop_itinerary()));
        assert!(!MaxElapsedConstraint::new(5.5).unwrap().is_satisfied(&loop_itinerary()));
    }

    #[test]
    fn max_elapsed_violation_message() {
        let constraint = MaxElapsedConstraint::new(5.5).unwrap();
        assert_eq!(
            constraint.violation(&loop_itinerary()).unwrap(),
            "total elapsed time is 6.0 hours (maximum 5.5 hours)"
        );
    }

    #[test]
    fn max_elapsed_partial_prunes_overlong_states() {
        let constraint = MaxElapsedConstraint::new(1.5).unwrap();

        // partial() has elapsed 2h
        assert!(!constraint.partial_ok(&partial("ORD", 1, 2)));
        assert!(MaxElapsedConstraint::new(2.0).unwrap().partial_ok(&partial("ORD", 1, 2)));
    }

    // TimeWindowConstraint

    #[test]
    fn time_window_rejects_empty_window() {
        assert!(TimeWindowConstraint::new(ts(12, 0), ts(12, 0)).is_err());
        assert!(TimeWindowConstraint::new(ts(13, 0), ts(12, 0)).is_err());
    }

    #[test]
    fn time_window_full_check() {
        let constraint = TimeWindowConstraint::new(ts(8, 0), ts(16, 0)).unwrap();
        assert!(constraint.is_satisfied(&loop_itinerary()));

        let late_window = TimeWindowConstraint::new(ts(10, 0), ts(16, 0)).unwrap();
        assert!(!late_window.is_satisfied(&loop_itinerary()));
        assert!(
            late_window
                .violation(&loop_itinerary())
                .unwrap()
                .contains("before window start")
        );

        let short_window = TimeWindowConstraint::new(ts(8, 0), ts(14, 0)).unwrap();
        assert!(!short_window.is_satisfied(&loop_itinerary()));
        assert!(
            short_window
                .violation(&loop_itinerary())
                .unwrap()
                .contains("after window end")
        );
    }

    #[test]
    fn time_window_partial_prunes_past_end() {
        let constraint = TimeWindowConstraint::new(ts(8, 0), ts(10, 0)).unwrap();
        // partial() is at 11:00, past the window end
        assert!(!constraint.partial_ok(&partial("ORD", 1, 2)));
    }

    #[test]
    fn time_window_partial_allows_before_start() {
        let constraint = TimeWindowConstraint::new(ts(12, 0), ts(23, 0)).unwrap();
        // partial() is at 11:00, before the window even opens
        assert!(constraint.partial_ok(&partial("ORD", 1, 2)));
    }

    #[test]
    fn time_window_partial_uses_elapsed_estimate() {
        // partial() is at 11:00 with 2h elapsed; estimate lands at 13:00
        let tight = TimeWindowConstraint::new(ts(8, 0), ts(12, 30)).unwrap();
        assert!(!tight.partial_ok(&partial("ORD", 1, 2)));

        let roomy = TimeWindowConstraint::new(ts(8, 0), ts(13, 0)).unwrap();
        assert!(roomy.partial_ok(&partial("ORD", 1, 2)));
    }
}

//! Weekly driver of the assignment engine.
//!
//! # Algorithm
//!
//! 1. Validate every trip; malformed trips are recorded and skipped.
//! 2. Order the rest by day, then departure (stable for equal departures).
//! 3. Feed them one by one to a fresh [`AssignmentEngine`].
//! 4. Collect assignments, per-trip errors, and the final pools.
//!
//! Processing order is part of the result: rest cadence and duty accrual
//! both depend on what was committed earlier in the week.

use super::AssignmentEngine;
use crate::config::RosterConfig;
use crate::error::{RosterError, TripError};
use crate::models::{Trip, WeeklyPlan};
use crate::validation::validate_trip;

/// Runs one planning week.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::models::Trip;
/// use u_roster::scheduler::WeeklyAssigner;
///
/// let assigner = WeeklyAssigner::new(RosterConfig::default()).unwrap();
/// let plan = assigner.run(&[
///     Trip::new(1, 0, 8 * 60, 9 * 60),
///     Trip::new(0, 0, 8 * 60, 9 * 60),
/// ]);
/// assert_eq!(plan.assignment_count(), 2);
/// assert_eq!(plan.assignments[0].trip.day, 0);
/// ```
#[derive(Debug, Clone)]
pub struct WeeklyAssigner {
    config: RosterConfig,
}

impl WeeklyAssigner {
    /// Creates an assigner after validating the configuration.
    ///
    /// # Errors
    /// `ConfigurationError` if any category or timetable value is unsound.
    pub fn new(config: RosterConfig) -> Result<Self, RosterError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Assigns drivers and buses to a week of trips.
    ///
    /// Each call starts from empty pools, so identical input yields an
    /// identical plan.
    pub fn run(&self, trips: &[Trip]) -> WeeklyPlan {
        let mut plan = WeeklyPlan::new();

        let mut ordered: Vec<&Trip> = Vec::with_capacity(trips.len());
        for trip in trips {
            match validate_trip(trip) {
                Ok(()) => ordered.push(trip),
                Err(e) => {
                    log::warn!("{e}");
                    plan.add_issue(e);
                }
            }
        }
        ordered.sort_by_key(|t| (t.day, t.start_min));

        let mut engine = AssignmentEngine::new(&self.config);
        for trip in ordered {
            match engine.assign(trip) {
                Ok(assignment) => plan.add_assignment(assignment),
                Err(e) => {
                    log::warn!("{e}");
                    plan.add_issue(e);
                }
            }
        }

        let (drivers, buses) = engine.into_resources();
        plan.drivers = drivers;
        plan.buses = buses;

        log::info!(
            "assigned {} trips with {} drivers and {} buses ({} unstaffed, {} invalid)",
            plan.assignment_count(),
            plan.drivers.len(),
            plan.bus_count(),
            plan.unstaffed_count(),
            plan.invalid_count()
        );
        plan
    }
}

/// Trips of a plan that ended up without staff, in processing order.
pub fn unstaffed_trips(plan: &WeeklyPlan) -> Vec<Trip> {
    plan.issues
        .iter()
        .filter(|e| matches!(e, TripError::UnstaffableTrip { .. }))
        .map(|e| *e.trip())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        intervals_touch, DriverCategory, DriverRef, DAYS_IN_WEEK, FIRST_WEEKEND_DAY,
    };
    use crate::timetable::DepartureGrid;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn hm(h: i64, m: i64) -> i64 {
        h * 60 + m
    }

    fn assigner() -> WeeklyAssigner {
        WeeklyAssigner::new(RosterConfig::default()).unwrap()
    }

    fn random_week(seed: u64, count: usize) -> Vec<Trip> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                let day = rng.random_range(0..DAYS_IN_WEEK);
                let start = rng.random_range(hm(5, 0)..hm(26, 0));
                let len = rng.random_range(20..=120);
                Trip::new(day, (i % 8) as u32, start, start + len)
            })
            .collect()
    }

    fn default_week() -> Vec<Trip> {
        DepartureGrid::new(&RosterConfig::default().timetable)
            .unwrap()
            .week()
    }

    fn assert_invariants(plan: &WeeklyPlan) {
        for d in &plan.drivers {
            for (&day, &minutes) in d.daily_minutes() {
                assert!(minutes <= d.params.work_max, "{} over on day {day}", DriverRef::from(d));
                let routes: Vec<_> = d.routes_on(day).collect();
                // span from first departure to last arrival equals the accrued duty
                let span = routes.last().unwrap().end_min - routes[0].start_min;
                assert_eq!(span, minutes);
                for (i, a) in routes.iter().enumerate() {
                    for b in &routes[i + 1..] {
                        assert!(!intervals_touch(a.start_min, a.end_min, b.start_min, b.end_min));
                    }
                }
            }
            let days = d.worked_days();
            match d.category {
                DriverCategory::A => {
                    assert!(days.iter().all(|&day| day < FIRST_WEEKEND_DAY));
                }
                DriverCategory::B => {
                    assert!(days.windows(2).all(|w| w[1] - w[0] >= 2), "{days:?}");
                }
            }
            assert_eq!(d.total_minutes(), d.daily_minutes().values().sum::<i64>());
        }
    }

    #[test]
    fn test_rejects_unsound_config() {
        let mut config = RosterConfig::default();
        config.category_b.work_min = 800;
        assert!(matches!(
            WeeklyAssigner::new(config),
            Err(RosterError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_invalid_trips_are_reported_not_fatal() {
        let plan = assigner().run(&[
            Trip::new(0, 0, hm(8, 0), hm(9, 0)),
            Trip::new(9, 0, hm(8, 0), hm(9, 0)),
            Trip::new(1, 0, hm(9, 0), hm(8, 0)),
            Trip::new(1, 0, i64::MAX - 1, i64::MAX),
        ]);
        assert_eq!(plan.assignment_count(), 1);
        assert_eq!(plan.invalid_count(), 3);
        assert!(unstaffed_trips(&plan).is_empty());
    }

    #[test]
    fn test_orders_by_day_then_start_stable() {
        let trips = [
            Trip::new(2, 0, hm(9, 0), hm(10, 0)),
            Trip::new(0, 1, hm(8, 0), hm(9, 0)),
            Trip::new(0, 0, hm(8, 0), hm(9, 0)),
            Trip::new(0, 2, hm(7, 0), hm(8, 0)),
        ];
        let plan = assigner().run(&trips);
        let order: Vec<_> = plan
            .assignments
            .iter()
            .map(|a| (a.trip.day, a.trip.bus_slot))
            .collect();
        assert_eq!(order, vec![(0, 2), (0, 1), (0, 0), (2, 0)]);
    }

    #[test]
    fn test_rest_cadence_across_days() {
        // a night trip only B can take, on Monday, Tuesday and Wednesday
        let night = |day| Trip::new(day, 0, hm(22, 0), hm(23, 0));
        let plan = assigner().run(&[night(0), night(1), night(2)]);

        let drivers: Vec<_> = plan.assignments.iter().map(|a| a.driver).collect();
        let b1 = DriverRef::new(DriverCategory::B, 1);
        let b2 = DriverRef::new(DriverCategory::B, 2);
        assert_eq!(drivers, vec![b1, b2, b1]);
    }

    #[test]
    fn test_category_a_daily_counters_are_per_day() {
        let day_shift = |day| {
            vec![
                Trip::new(day, 0, hm(7, 0), hm(8, 0)),
                Trip::new(day, 0, hm(15, 0), hm(16, 0)),
            ]
        };
        let trips: Vec<_> = (0..5).flat_map(day_shift).collect();
        let plan = assigner().run(&trips);

        assert_eq!(plan.driver_count(DriverCategory::A), 1);
        let a1 = plan.driver(DriverRef::new(DriverCategory::A, 1)).unwrap();
        assert_eq!(a1.minutes_on(0), 540);
        assert_eq!(a1.total_minutes(), 5 * 540);
    }

    #[test]
    fn test_default_week_is_fully_staffed_and_legal() {
        let plan = assigner().run(&default_week());
        assert!(plan.is_complete());
        assert!(plan.driver_count(DriverCategory::A) > 0);
        assert!(plan.driver_count(DriverCategory::B) > 0);
        assert!(plan.assignments.iter().all(|a| {
            !(a.trip.is_weekend() && a.driver.category == DriverCategory::A)
        }));
        assert_invariants(&plan);
    }

    #[test]
    fn test_random_weeks_respect_invariants() {
        for seed in 0..20 {
            let plan = assigner().run(&random_week(seed, 300));
            assert_eq!(plan.assignment_count() + plan.issues.len(), 300);
            assert_invariants(&plan);
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        let trips = random_week(7, 250);
        let a = assigner().run(&trips);
        let b = assigner().run(&trips);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.driver_summaries(), b.driver_summaries());
        assert_eq!(a.buses, b.buses);
    }

    #[test]
    fn test_total_minutes_never_decrease() {
        let trips = random_week(11, 200);
        let config = RosterConfig::default();
        let mut engine = AssignmentEngine::new(&config);
        let mut ordered = trips.clone();
        ordered.sort_by_key(|t| (t.day, t.start_min));

        let mut last_totals = std::collections::HashMap::new();
        for trip in &ordered {
            if let Ok(a) = engine.assign(trip) {
                let pool = match a.driver.category {
                    DriverCategory::A => engine.drivers_a(),
                    DriverCategory::B => engine.drivers_b(),
                };
                let total = pool.get(a.driver.id).map(|d| d.total_minutes()).unwrap_or(0);
                let prev = last_totals.insert(a.driver, total).unwrap_or(0);
                assert!(total >= prev);
            }
        }
    }

    #[test]
    fn test_plan_serializes() {
        let plan = assigner().run(&[Trip::new(0, 0, hm(8, 0), hm(9, 0))]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["assignments"][0]["bus_id"], 1);
        assert_eq!(json["assignments"][0]["driver"]["category"], "A");
        assert_eq!(json["drivers"][0]["total_minutes"], 60);
    }
}

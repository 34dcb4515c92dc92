//! Roster quality metrics (KPIs).
//!
//! Computes staffing indicators from a completed weekly plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Drivers A / B | Pool sizes at the end of the week |
//! | Buses | Fleet size at the end of the week |
//! | Trips per bus | Mean and maximum trips driven per bus |
//! | Staffed / Unstaffed | Trips with and without a driver and bus |
//! | Duty minutes | Sum of accrued duty over all drivers |
//! | Avg daily duty | Mean duty per worked driver-day, per category |
//! | Short days | Worked driver-days below `work_min` |
//! | Break minutes | `break_duration` × worked days |

use serde::{Deserialize, Serialize};

use crate::models::{DriverCategory, WeeklyPlan};

/// Roster performance indicators for one driver category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryKpi {
    /// Number of drivers.
    pub drivers: usize,
    /// Worked driver-days.
    pub worked_days: usize,
    /// Accrued duty (minutes).
    pub duty_minutes: i64,
    /// Mean duty per worked driver-day (minutes).
    pub avg_daily_minutes: f64,
    /// Worked driver-days below `work_min`.
    pub short_days: usize,
    /// Paid break owed over the week (minutes).
    pub break_minutes: i64,
}

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterKpi {
    /// Category A indicators.
    pub category_a: CategoryKpi,
    /// Category B indicators.
    pub category_b: CategoryKpi,
    /// Fleet size.
    pub buses: usize,
    /// Mean trips driven per bus.
    pub avg_trips_per_bus: f64,
    /// Trips driven by the busiest bus.
    pub max_trips_per_bus: u32,
    /// Staffed trips.
    pub staffed_trips: usize,
    /// Valid trips left unstaffed.
    pub unstaffed_trips: usize,
    /// Malformed trips.
    pub invalid_trips: usize,
    /// Accrued duty over all drivers (minutes).
    pub duty_minutes: i64,
}

impl RosterKpi {
    /// Computes KPIs from a plan.
    pub fn calculate(plan: &WeeklyPlan) -> Self {
        let category_a = category_kpi(plan, DriverCategory::A);
        let category_b = category_kpi(plan, DriverCategory::B);
        let bus_trips: u32 = plan.buses.iter().map(|b| b.trip_count()).sum();
        let avg_trips_per_bus = if plan.buses.is_empty() {
            0.0
        } else {
            f64::from(bus_trips) / plan.buses.len() as f64
        };
        let max_trips_per_bus = plan.buses.iter().map(|b| b.trip_count()).max().unwrap_or(0);
        Self {
            duty_minutes: category_a.duty_minutes + category_b.duty_minutes,
            category_a,
            category_b,
            buses: plan.bus_count(),
            avg_trips_per_bus,
            max_trips_per_bus,
            staffed_trips: plan.assignment_count(),
            unstaffed_trips: plan.unstaffed_count(),
            invalid_trips: plan.invalid_count(),
        }
    }

    /// Total number of drivers.
    pub fn drivers(&self) -> usize {
        self.category_a.drivers + self.category_b.drivers
    }

    /// Fraction of valid trips that were staffed (1.0 for an empty week).
    pub fn coverage(&self) -> f64 {
        let valid = self.staffed_trips + self.unstaffed_trips;
        if valid == 0 {
            1.0
        } else {
            self.staffed_trips as f64 / valid as f64
        }
    }
}

fn category_kpi(plan: &WeeklyPlan, category: DriverCategory) -> CategoryKpi {
    let mut kpi = CategoryKpi::default();
    for driver in plan.drivers_of(category) {
        kpi.drivers += 1;
        for &minutes in driver.daily_minutes().values() {
            kpi.worked_days += 1;
            if minutes < driver.params.work_min {
                kpi.short_days += 1;
            }
            kpi.break_minutes += driver.params.break_duration;
        }
        kpi.duty_minutes += driver.total_minutes();
    }
    if kpi.worked_days > 0 {
        kpi.avg_daily_minutes = kpi.duty_minutes as f64 / kpi.worked_days as f64;
    }
    kpi
}

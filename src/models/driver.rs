//! Driver model.
//!
//! Drivers are the human resources of a roster. Each driver belongs to a
//! category whose labor parameters are fixed at creation:
//!
//! | Category | Shift (min) | Break | Days | Window |
//! |----------|-------------|-------|------|--------|
//! | A | 480..540 | 60 | Mon–Fri | first departure 07–19, arrivals 01–18 |
//! | B | 660..720 | 0 | any | none, one rest day between work days |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{ArrivalLimits, HourWindow, Trip, MINUTES_PER_DAY};

/// Driver category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DriverCategory {
    /// Short-shift weekday driver with a paid break.
    A,
    /// Long-shift driver with a rest-day cadence.
    B,
}

impl fmt::Display for DriverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverCategory::A => write!(f, "A"),
            DriverCategory::B => write!(f, "B"),
        }
    }
}

/// Labor parameters of a driver category.
///
/// Deserialized on its own, the work bounds and break are required and the
/// optional rules default to "off". Configuration files go through
/// `RosterConfig`, which fills missing keys from the category defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryParams {
    /// Minimum expected duty per worked day (minutes).
    pub work_min: i64,
    /// Maximum duty per day (minutes).
    pub work_max: i64,
    /// Paid break owed per worked day (minutes).
    pub break_duration: i64,
    /// Window the first departure of a day must start in. `None` = any hour.
    #[serde(default)]
    pub start_window: Option<HourWindow>,
    /// Arrival-hour limits, checked on every trip. `None` = any hour.
    #[serde(default)]
    pub arrival_limits: Option<ArrivalLimits>,
    /// Refuse Saturday and Sunday trips.
    #[serde(default)]
    pub weekdays_only: bool,
    /// Minimum distance in days between two distinct worked days.
    /// `None` disables the cadence rule.
    #[serde(default)]
    pub rest_gap_days: Option<u8>,
}

impl CategoryParams {
    /// Category A defaults: 8–9 h shifts, weekdays, daytime window.
    pub fn category_a() -> Self {
        Self {
            work_min: 8 * 60,
            work_max: 9 * 60,
            break_duration: 60,
            start_window: Some(HourWindow::new(7, 19)),
            arrival_limits: Some(ArrivalLimits::new(18, 1)),
            weekdays_only: true,
            rest_gap_days: None,
        }
    }

    /// Category B defaults: 11–12 h shifts, any day, rest day in between.
    pub fn category_b() -> Self {
        Self {
            work_min: 11 * 60,
            work_max: 12 * 60,
            break_duration: 0,
            start_window: None,
            arrival_limits: None,
            weekdays_only: false,
            rest_gap_days: Some(2),
        }
    }

    /// Defaults for the given category.
    pub fn for_category(category: DriverCategory) -> Self {
        match category {
            DriverCategory::A => Self::category_a(),
            DriverCategory::B => Self::category_b(),
        }
    }
}

/// A route committed to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Service day.
    pub day: u8,
    /// Vehicle driving the route.
    pub bus_id: u32,
    /// Departure (minutes from service-day midnight).
    pub start_min: i64,
    /// Arrival (minutes from service-day midnight).
    pub end_min: i64,
}

impl RouteRecord {
    /// Route duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Departure in minutes from Monday 00:00.
    #[inline]
    pub fn week_start_min(&self) -> i64 {
        i64::from(self.day) * MINUTES_PER_DAY + self.start_min
    }

    /// Arrival in minutes from Monday 00:00.
    #[inline]
    pub fn week_end_min(&self) -> i64 {
        i64::from(self.day) * MINUTES_PER_DAY + self.end_min
    }
}

/// A driver and the routes assigned so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Sequential id within the category (starting at 1).
    pub id: u32,
    /// Category.
    pub category: DriverCategory,
    /// Labor parameters fixed at creation.
    pub params: CategoryParams,
    routes: Vec<RouteRecord>,
    daily_minutes: BTreeMap<u8, i64>,
    total_minutes: i64,
    last_worked_day: Option<u8>,
}

impl Driver {
    /// Creates a driver with no routes.
    pub fn new(id: u32, category: DriverCategory, params: CategoryParams) -> Self {
        Self {
            id,
            category,
            params,
            routes: Vec::new(),
            daily_minutes: BTreeMap::new(),
            total_minutes: 0,
            last_worked_day: None,
        }
    }

    /// Routes in assignment order.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Routes on a given day.
    pub fn routes_on(&self, day: u8) -> impl Iterator<Item = &RouteRecord> {
        self.routes.iter().filter(move |r| r.day == day)
    }

    /// Duty minutes accrued on a day (0 if not worked).
    pub fn minutes_on(&self, day: u8) -> i64 {
        self.daily_minutes.get(&day).copied().unwrap_or(0)
    }

    /// Duty minutes per worked day.
    pub fn daily_minutes(&self) -> &BTreeMap<u8, i64> {
        &self.daily_minutes
    }

    /// Duty minutes accrued over the week.
    pub fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    /// Last day this driver worked, if any.
    pub fn last_worked_day(&self) -> Option<u8> {
        self.last_worked_day
    }

    /// Days with at least one route, ascending.
    pub fn worked_days(&self) -> Vec<u8> {
        self.daily_minutes.keys().copied().collect()
    }

    /// Whether the driver has no route on `day` yet.
    #[inline]
    pub fn is_first_trip_of_day(&self, day: u8) -> bool {
        self.routes_on(day).next().is_none()
    }

    /// Minutes a trip would add to the driver's duty if committed.
    ///
    /// Duty runs from the end of the previous route when that route is on the
    /// same day, so idle gaps between routes are counted.
    pub fn accrual_for(&self, trip: &Trip) -> i64 {
        let effective_start = match self.routes.last() {
            Some(last) if last.day == trip.day => last.end_min,
            _ => trip.start_min,
        };
        trip.end_min - effective_start
    }

    /// Records a trip against this driver.
    pub(crate) fn record_trip(&mut self, trip: &Trip, bus_id: u32) {
        let accrued = self.accrual_for(trip);
        self.routes.push(RouteRecord {
            day: trip.day,
            bus_id,
            start_min: trip.start_min,
            end_min: trip.end_min,
        });
        self.total_minutes += accrued;
        *self.daily_minutes.entry(trip.day).or_insert(0) += accrued;
        if self.params.rest_gap_days.is_some() {
            self.last_worked_day = Some(trip.day);
        }
    }
}

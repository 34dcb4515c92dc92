//! Eligibility rules.
//!
//! Pure predicates deciding whether a resource may legally take a trip.
//! Nothing here mutates state; commits happen in [`crate::pool`].
//!
//! # Driver rules (checked in order)
//! 1. Weekday-only categories refuse Saturday and Sunday.
//! 2. The first departure of a day must start inside the category window.
//! 3. Arrival hours outside the category limits are refused on every trip.
//! 4. Rest cadence: a distinct day closer than `rest_gap_days` to the last
//!    worked day is refused; the same day is always allowed.
//! 5. The duty the commit would accrue must keep the day within `work_max`.
//! 6. No overlap with any committed route, compared in week minutes so a
//!    post-midnight route also blocks the next service day (shared
//!    endpoints overlap).
//!
//! # Bus rule
//! A bus is free when it was never used or its last arrival is not after
//! the departure.

use std::fmt;

use crate::models::{intervals_touch, Bus, Driver, Trip};

/// A resource that can be screened against a trip.
pub trait Eligible {
    /// Whether this resource may take the trip.
    fn can_take(&self, trip: &Trip) -> bool;
}

/// Why a resource refused a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Category does not work weekends.
    Weekend,
    /// First trip of the day starts outside the category window.
    OutsideStartWindow,
    /// Arrival hour outside the category limits.
    ArrivalHour,
    /// Too soon after the last worked day.
    RestCadence,
    /// Daily duty would exceed `work_max`.
    DailyLimit,
    /// Overlaps a committed route.
    Overlap,
    /// Bus still on its previous trip.
    BusBusy,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::Weekend => "weekend",
            Rejection::OutsideStartWindow => "outside start window",
            Rejection::ArrivalHour => "arrival hour",
            Rejection::RestCadence => "rest cadence",
            Rejection::DailyLimit => "daily limit",
            Rejection::Overlap => "overlap",
            Rejection::BusBusy => "bus busy",
        };
        write!(f, "{text}")
    }
}

/// Screens a driver against a trip, returning the first rule that fails.
pub fn check_driver(driver: &Driver, trip: &Trip) -> Result<(), Rejection> {
    let params = &driver.params;

    if params.weekdays_only && trip.is_weekend() {
        return Err(Rejection::Weekend);
    }
    if let Some(window) = params.start_window {
        if driver.is_first_trip_of_day(trip.day) && !window.contains(trip.start_hour()) {
            return Err(Rejection::OutsideStartWindow);
        }
    }
    if let Some(limits) = params.arrival_limits {
        if limits.refuses(trip.end_hour()) {
            return Err(Rejection::ArrivalHour);
        }
    }
    if let (Some(gap), Some(last)) = (params.rest_gap_days, driver.last_worked_day()) {
        if trip.day != last && u16::from(trip.day) < u16::from(last) + u16::from(gap) {
            return Err(Rejection::RestCadence);
        }
    }
    if driver.minutes_on(trip.day) + driver.accrual_for(trip) > params.work_max {
        return Err(Rejection::DailyLimit);
    }
    let (start, end) = (trip.week_start_min(), trip.week_end_min());
    if driver
        .routes()
        .iter()
        .any(|r| intervals_touch(start, end, r.week_start_min(), r.week_end_min()))
    {
        return Err(Rejection::Overlap);
    }
    Ok(())
}

/// Screens a bus against a trip.
pub fn check_bus(bus: &Bus, trip: &Trip) -> Result<(), Rejection> {
    match bus.busy_until() {
        Some(until) if until > trip.week_start_min() => Err(Rejection::BusBusy),
        _ => Ok(()),
    }
}

impl Eligible for Driver {
    fn can_take(&self, trip: &Trip) -> bool {
        check_driver(self, trip).is_ok()
    }
}

impl Eligible for Bus {
    fn can_take(&self, trip: &Trip) -> bool {
        check_bus(self, trip).is_ok()
    }
}

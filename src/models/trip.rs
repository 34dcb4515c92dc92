//! Trip model.
//!
//! A trip is one scheduled departure–arrival pair of a bus run on a given
//! service day. Trips are produced once by the timetable and never mutated.
//!
//! # Time Representation
//! Times are minutes from midnight of the trip's service day. A service day
//! that runs past midnight keeps counting: 01:30 after midnight is `1530`.

use serde::{Deserialize, Serialize};

/// Number of service days in a planning week (Monday = 0).
pub const DAYS_IN_WEEK: u8 = 7;

/// First weekend day index (Saturday).
pub const FIRST_WEEKEND_DAY: u8 = 5;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A single bus departure on a service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trip {
    /// Service day (0 = Monday .. 6 = Sunday).
    pub day: u8,
    /// Physical run this departure belongs to (not a specific vehicle).
    pub bus_slot: u32,
    /// Departure time (minutes from service-day midnight).
    pub start_min: i64,
    /// Arrival time (minutes from service-day midnight, may exceed 1440).
    pub end_min: i64,
}

impl Trip {
    /// Creates a new trip.
    pub fn new(day: u8, bus_slot: u32, start_min: i64, end_min: i64) -> Self {
        Self {
            day,
            bus_slot,
            start_min,
            end_min,
        }
    }

    /// Trip duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Wall-clock hour (0..24) of the departure.
    #[inline]
    pub fn start_hour(&self) -> u32 {
        hour_of(self.start_min)
    }

    /// Wall-clock hour (0..24) of the arrival.
    #[inline]
    pub fn end_hour(&self) -> u32 {
        hour_of(self.end_min)
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

    /// Whether the trip runs on Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.day)
    }
}

/// Wall-clock hour of a service-day minute, wrapping past midnight.
#[inline]
pub fn hour_of(minute: i64) -> u32 {
    (minute.rem_euclid(MINUTES_PER_DAY) / 60) as u32
}

/// Whether a day index falls on the weekend.
#[inline]
pub fn is_weekend(day: u8) -> bool {
    day >= FIRST_WEEKEND_DAY
}

/// Closed-interval overlap test used for driver routes.
///
/// Two intervals overlap unless one ends strictly before the other starts,
/// so back-to-back intervals sharing an endpoint do overlap.
#[inline]
pub fn intervals_touch(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    !(a_end < b_start || a_start > b_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_hours_wrap_past_midnight() {
        let t = Trip::new(0, 0, 23 * 60 + 30, 24 * 60 + 30);
        assert_eq!(t.start_hour(), 23);
        assert_eq!(t.end_hour(), 0);
        assert_eq!(t.duration_min(), 60);
    }

    #[test]
    fn test_week_minutes() {
        // Monday's 02:00 arrival sits before Tuesday's 06:00 departure
        let late = Trip::new(0, 0, 25 * 60, 26 * 60);
        let early = Trip::new(1, 0, 6 * 60, 7 * 60);
        assert_eq!(late.week_end_min(), 26 * 60);
        assert_eq!(early.week_start_min(), 30 * 60);
        assert!(late.week_end_min() < early.week_start_min());
    }

    #[test]
    fn test_weekend_days() {
        assert!(!Trip::new(4, 0, 0, 60).is_weekend());
        assert!(Trip::new(5, 0, 0, 60).is_weekend());
        assert!(is_weekend(6));
    }

    #[test]
    fn test_intervals_touch() {
        assert!(intervals_touch(420, 480, 480, 540)); // shared endpoint
        assert!(intervals_touch(420, 500, 480, 540));
        assert!(!intervals_touch(420, 479, 480, 540));
        assert!(!intervals_touch(600, 660, 480, 540));
    }
}

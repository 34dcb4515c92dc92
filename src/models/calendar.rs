//! Wall-clock windows used by driver categories and the timetable.
//!
//! # Time Model
//! Windows are expressed in whole hours of the day and are half-open:
//! `[start_hour, end_hour)`. Hours are compared after wrapping service-day
//! minutes back into `0..24`, so an arrival at 00:30 after midnight has hour 0.

use serde::{Deserialize, Serialize};

/// An hour interval `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourWindow {
    /// First hour inside the window.
    pub start_hour: u32,
    /// First hour after the window.
    pub end_hour: u32,
}

impl HourWindow {
    /// Creates a new hour window.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Number of hours covered.
    #[inline]
    pub fn len_hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    /// Whether an hour falls within this window.
    #[inline]
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Whether the bounds describe a non-empty window inside one day.
    pub fn is_well_formed(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }
}

/// Arrival-hour limits for a driver category.
///
/// A trip is refused when its arrival hour is later than `latest_end_hour`
/// or earlier than `earliest_end_hour`. Both tests apply independently of
/// the start-window check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArrivalLimits {
    /// Arrivals with an hour strictly above this are refused.
    pub latest_end_hour: u32,
    /// Arrivals with an hour strictly below this are refused.
    pub earliest_end_hour: u32,
}

impl ArrivalLimits {
    /// Creates arrival limits.
    pub fn new(latest_end_hour: u32, earliest_end_hour: u32) -> Self {
        Self {
            latest_end_hour,
            earliest_end_hour,
        }
    }

    /// Whether an arrival hour is refused by these limits.
    #[inline]
    pub fn refuses(&self, end_hour: u32) -> bool {
        end_hour > self.latest_end_hour || end_hour < self.earliest_end_hour
    }
}

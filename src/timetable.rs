//! Departure grid generation.
//!
//! Builds the week of trips the roster is planned against.
//!
//! # Algorithm
//!
//! For each day the clock walks from service start to service end. The step
//! is the peak headway when the current hour falls in a peak range, the
//! off-peak headway otherwise. Each tick is handed to the first bus slot that
//! is back from its previous run (previous departure plus travel time strictly
//! before the tick). Ticks with no free slot are dropped.
//!
//! Weekends have no peak ranges and run at the off-peak headway all day.

use crate::config::TimetableConfig;
use crate::error::RosterError;
use crate::models::{hour_of, is_weekend, HourWindow, Trip, DAYS_IN_WEEK};
use crate::validation::{validate_timetable, ValidationError, ValidationErrorKind};

/// Weekly departure grid.
///
/// # Example
///
/// ```
/// use u_roster::config::TimetableConfig;
/// use u_roster::timetable::DepartureGrid;
///
/// let grid = DepartureGrid::new(&TimetableConfig::default()).unwrap();
/// let monday = grid.day(0);
/// assert_eq!(monday[0].start_min, 6 * 60);
/// assert_eq!(monday[0].end_min, 7 * 60);
/// ```
#[derive(Debug, Clone)]
pub struct DepartureGrid {
    start_min: i64,
    end_min: i64,
    peak_headway_min: i64,
    off_peak_headway_min: i64,
    peak_hours: Vec<HourWindow>,
    bus_slots: u32,
    travel_min: i64,
}

impl DepartureGrid {
    /// Creates a grid from timetable parameters.
    ///
    /// # Errors
    /// `ConfigurationError` if a clock value does not parse or a headway,
    /// slot count, travel time, or peak range is unsound.
    pub fn new(config: &TimetableConfig) -> Result<Self, RosterError> {
        validate_timetable(config).map_err(RosterError::ConfigurationError)?;
        let (start_min, end_min) = config.service_window_min().ok_or_else(|| {
            RosterError::ConfigurationError(vec![ValidationError::new(
                ValidationErrorKind::ClockFormat,
                "timetable: service window does not parse",
            )])
        })?;

        Ok(Self {
            start_min,
            end_min,
            peak_headway_min: config.peak_headway_min,
            off_peak_headway_min: config.off_peak_headway_min,
            peak_hours: config.peak_hours.clone(),
            bus_slots: config.bus_slots,
            travel_min: config.travel_min,
        })
    }

    /// Service window in service-day minutes.
    pub fn service_window(&self) -> (i64, i64) {
        (self.start_min, self.end_min)
    }

    /// Trips of one day, in departure order.
    pub fn day(&self, day: u8) -> Vec<Trip> {
        let weekend = is_weekend(day);
        let mut last_departure: Vec<Option<i64>> = vec![None; self.bus_slots as usize];
        let mut trips = Vec::new();
        let mut skipped = 0usize;

        let mut tick = self.start_min;
        while tick < self.end_min {
            let headway = if !weekend && self.is_peak(tick) {
                self.peak_headway_min
            } else {
                self.off_peak_headway_min
            };

            let free = last_departure
                .iter()
                .position(|last| last.map_or(true, |dep| tick > dep + self.travel_min));
            match free {
                Some(slot) => {
                    last_departure[slot] = Some(tick);
                    trips.push(Trip::new(day, slot as u32, tick, tick + self.travel_min));
                }
                None => skipped += 1,
            }

            tick += headway;
        }

        if skipped > 0 {
            log::debug!("day {day}: {skipped} departures dropped, no bus slot free");
        }
        trips
    }

    /// Trips of the whole week, ordered by `(day, start)`.
    pub fn week(&self) -> Vec<Trip> {
        let trips: Vec<Trip> = (0..DAYS_IN_WEEK).flat_map(|day| self.day(day)).collect();
        log::info!("generated {} trips over {} days", trips.len(), DAYS_IN_WEEK);
        trips
    }

    fn is_peak(&self, minute: i64) -> bool {
        let hour = hour_of(minute);
        self.peak_hours.iter().any(|w| w.contains(hour))
    }
}

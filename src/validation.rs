//! Input validation for rostering runs.
//!
//! Two entry points:
//! - [`validate_config`] checks the configuration before any assignment and
//!   reports every issue it finds at once.
//! - [`validate_trip`] checks a single trip; a malformed trip is reported and
//!   skipped without stopping the run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{parse_clock, RosterConfig, TimetableConfig};
use crate::error::TripError;
use crate::models::{CategoryParams, DriverCategory, Trip, DAYS_IN_WEEK, MINUTES_PER_DAY};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A configuration validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// `work_min`/`work_max` are not positive or out of order.
    WorkBounds,
    /// Break is negative or does not fit in a shift.
    BreakDuration,
    /// An hour window is empty or extends past 24:00.
    HourWindow,
    /// Arrival limits outside 0..24.
    ArrivalLimits,
    /// Rest gap of zero days.
    RestGap,
    /// A clock value is not "HH:MM".
    ClockFormat,
    /// A headway is not positive.
    Headway,
    /// Bus slots or travel time are not positive.
    Timetable,
    /// A pool cap of zero.
    PoolLimit,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validates a run configuration.
///
/// Checks:
/// 1. Work bounds positive and `work_min ≤ work_max` for both categories
/// 2. Break durations non-negative and shorter than `work_max`
/// 3. Start windows non-empty within one day, arrival limits within 0..24
/// 4. Rest gaps of at least one day
/// 5. Service start/end parse as "HH:MM"
/// 6. Positive headways, bus slots and travel time; well-formed peak ranges
/// 7. Pool caps, when set, are at least one
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &RosterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for category in [DriverCategory::A, DriverCategory::B] {
        validate_category(category, config.params(category), &mut errors);
    }

    if let Err(timetable_errors) = validate_timetable(&config.timetable) {
        errors.extend(timetable_errors);
    }

    let limits = &config.limits;
    for (name, cap) in [
        ("max_drivers_a", limits.max_drivers_a),
        ("max_drivers_b", limits.max_drivers_b),
        ("max_buses", limits.max_buses),
    ] {
        if cap == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PoolLimit,
                format!("limits: {name} must be at least 1 when set"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates departure grid parameters.
///
/// Checks that service bounds parse as "HH:MM", headways, bus slots and
/// travel time are positive, and peak ranges are windows within one day.
pub fn validate_timetable(tt: &TimetableConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, value) in [
        ("service_start", &tt.service_start),
        ("service_end", &tt.service_end),
    ] {
        if parse_clock(value).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::ClockFormat,
                format!("timetable: {name} '{value}' is not HH:MM"),
            ));
        }
    }
    if tt.peak_headway_min <= 0 || tt.off_peak_headway_min <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::Headway,
            format!(
                "timetable: headways must be positive (peak {}, off-peak {})",
                tt.peak_headway_min, tt.off_peak_headway_min
            ),
        ));
    }
    if tt.bus_slots == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::Timetable,
            "timetable: bus_slots must be at least 1",
        ));
    }
    if tt.travel_min <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::Timetable,
            format!("timetable: travel_min must be positive, got {}", tt.travel_min),
        ));
    }
    for window in &tt.peak_hours {
        if !window.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::HourWindow,
                format!(
                    "timetable: peak range {}..{} is not a window within one day",
                    window.start_hour, window.end_hour
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_category(
    category: DriverCategory,
    params: &CategoryParams,
    errors: &mut Vec<ValidationError>,
) {
    if params.work_min <= 0 || params.work_max <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::WorkBounds,
            format!("category {category}: work bounds must be positive"),
        ));
    }
    if params.work_min > params.work_max {
        errors.push(ValidationError::new(
            ValidationErrorKind::WorkBounds,
            format!(
                "category {category}: work_min {} > work_max {}",
                params.work_min, params.work_max
            ),
        ));
    }
    if params.break_duration < 0 || params.break_duration >= params.work_max.max(1) {
        errors.push(ValidationError::new(
            ValidationErrorKind::BreakDuration,
            format!(
                "category {category}: break_duration {} does not fit in a shift",
                params.break_duration
            ),
        ));
    }
    if let Some(window) = params.start_window {
        if !window.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::HourWindow,
                format!(
                    "category {category}: start window {}..{} is not a window within one day",
                    window.start_hour, window.end_hour
                ),
            ));
        }
    }
    if let Some(limits) = params.arrival_limits {
        if limits.latest_end_hour > 23 || limits.earliest_end_hour > 23 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ArrivalLimits,
                format!("category {category}: arrival limits must be hours 0..23"),
            ));
        }
    }
    if params.rest_gap_days == Some(0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::RestGap,
            format!("category {category}: rest_gap_days must be at least 1"),
        ));
    }
}

/// Latest arrival a trip may have, in service-day minutes.
pub const MAX_ARRIVAL_MIN: i64 = 2 * MINUTES_PER_DAY;

/// Validates a single trip.
///
/// A trip is malformed if its day is outside `0..7`, it departs before the
/// service-day midnight, does not arrive after it departs, or arrives more
/// than one day past the end of its service day.
pub fn validate_trip(trip: &Trip) -> Result<(), TripError> {
    let reason = if trip.day >= DAYS_IN_WEEK {
        format!("day {} is outside 0..{}", trip.day, DAYS_IN_WEEK - 1)
    } else if trip.start_min < 0 {
        format!("departure {} is before midnight", trip.start_min)
    } else if trip.end_min > MAX_ARRIVAL_MIN {
        format!(
            "arrival {} is past the following day ({MAX_ARRIVAL_MIN})",
            trip.end_min
        )
    } else if trip.end_min <= trip.start_min {
        format!(
            "arrival {} is not after departure {}",
            trip.end_min, trip.start_min
        )
    } else {
        return Ok(());
    };
    Err(TripError::InvalidTrip {
        trip: *trip,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArrivalLimits, HourWindow};

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&RosterConfig::default()).is_ok());
    }

    #[test]
    fn test_work_min_above_work_max() {
        let mut config = RosterConfig::default();
        config.category_a.work_min = 600;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::WorkBounds);
        assert!(errors[0].message.contains("category A"));
    }

    #[test]
    fn test_bad_windows() {
        let mut config = RosterConfig::default();
        config.category_a.start_window = Some(HourWindow::new(19, 7));
        config.category_a.arrival_limits = Some(ArrivalLimits::new(30, 1));
        config.timetable.peak_hours.push(HourWindow::new(20, 26));

        let errors = validate_config(&config).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::HourWindow,
                ValidationErrorKind::ArrivalLimits,
                ValidationErrorKind::HourWindow,
            ]
        );
    }

    #[test]
    fn test_zero_rest_gap_and_caps() {
        let mut config = RosterConfig::default();
        config.category_b.rest_gap_days = Some(0);
        config.limits.max_buses = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::RestGap));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::PoolLimit));
    }

    #[test]
    fn test_timetable_errors_collected() {
        let mut config = RosterConfig::default();
        config.timetable.service_start = "6am".into();
        config.timetable.peak_headway_min = 0;
        config.timetable.bus_slots = 0;
        config.timetable.travel_min = -5;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 4);
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::ClockFormat));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::Headway));
    }

    #[test]
    fn test_break_longer_than_shift() {
        let mut config = RosterConfig::default();
        config.category_b.break_duration = 720;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::BreakDuration);
    }

    #[test]
    fn test_validate_trip() {
        assert!(validate_trip(&Trip::new(0, 0, 360, 420)).is_ok());
        assert!(validate_trip(&Trip::new(6, 0, 1500, 1560)).is_ok());
        assert!(validate_trip(&Trip::new(6, 0, 2800, MAX_ARRIVAL_MIN)).is_ok());

        for bad in [
            Trip::new(7, 0, 360, 420),
            Trip::new(0, 0, 420, 420),
            Trip::new(0, 0, 420, 360),
            Trip::new(0, 0, -10, 50),
            Trip::new(1, 0, i64::MAX - 1, i64::MAX),
            Trip::new(1, 0, 1400, MAX_ARRIVAL_MIN + 1),
        ] {
            match validate_trip(&bad) {
                Err(TripError::InvalidTrip { trip, .. }) => assert_eq!(trip, bad),
                other => panic!("expected InvalidTrip, got {other:?}"),
            }
        }
    }
}

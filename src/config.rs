//! Run configuration.
//!
//! All values have defaults matching a typical urban line (06:00–03:00
//! service, 10/20 minute headways, eight runs of one hour). A TOML file may
//! override any section:
//!
//! ```toml
//! [timetable]
//! service_start = "05:30"
//! peak_headway_min = 8
//!
//! [category_b]
//! work_min = 600
//! rest_gap_days = 3
//!
//! [limits]
//! max_buses = 12
//! ```

use chrono::{NaiveTime, Timelike};
use config::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RosterError;
use crate::models::{ArrivalLimits, CategoryParams, DriverCategory, HourWindow};
use crate::validation;

/// Complete configuration of a weekly run.
///
/// A `[category_a]` or `[category_b]` section only overrides the keys it
/// names; every other field keeps that category's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RosterConfigFile")]
pub struct RosterConfig {
    /// Category A labor parameters.
    pub category_a: CategoryParams,
    /// Category B labor parameters.
    pub category_b: CategoryParams,
    /// Departure grid parameters.
    pub timetable: TimetableConfig,
    /// Optional pool caps.
    pub limits: PoolLimits,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            category_a: CategoryParams::category_a(),
            category_b: CategoryParams::category_b(),
            timetable: TimetableConfig::default(),
            limits: PoolLimits::default(),
        }
    }
}

/// On-disk shape of [`RosterConfig`]: every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RosterConfigFile {
    category_a: CategoryOverrides,
    category_b: CategoryOverrides,
    timetable: TimetableConfig,
    limits: PoolLimits,
}

/// Keys of a category section, each replacing the category default when set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryOverrides {
    work_min: Option<i64>,
    work_max: Option<i64>,
    break_duration: Option<i64>,
    start_window: Option<HourWindow>,
    arrival_limits: Option<ArrivalLimits>,
    weekdays_only: Option<bool>,
    rest_gap_days: Option<u8>,
}

impl CategoryOverrides {
    fn apply(self, mut params: CategoryParams) -> CategoryParams {
        if let Some(v) = self.work_min {
            params.work_min = v;
        }
        if let Some(v) = self.work_max {
            params.work_max = v;
        }
        if let Some(v) = self.break_duration {
            params.break_duration = v;
        }
        if let Some(v) = self.start_window {
            params.start_window = Some(v);
        }
        if let Some(v) = self.arrival_limits {
            params.arrival_limits = Some(v);
        }
        if let Some(v) = self.weekdays_only {
            params.weekdays_only = v;
        }
        if let Some(v) = self.rest_gap_days {
            params.rest_gap_days = Some(v);
        }
        params
    }
}

impl From<RosterConfigFile> for RosterConfig {
    fn from(file: RosterConfigFile) -> Self {
        Self {
            category_a: file.category_a.apply(CategoryParams::category_a()),
            category_b: file.category_b.apply(CategoryParams::category_b()),
            timetable: file.timetable,
            limits: file.limits,
        }
    }
}

impl RosterConfig {
    /// Reads a TOML configuration file and validates it.
    pub fn from_file(path: &Path) -> Result<Self, RosterError> {
        let filepath = path.to_string_lossy();
        let source = config::File::new(&filepath, config::FileFormat::Toml);
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| RosterError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        let roster_config = config
            .try_deserialize::<RosterConfig>()
            .map_err(|e| RosterError::ConfigReadError {
                msg: format!("failed decoding '{filepath}'"),
                source: e,
            })?;
        roster_config.validate()?;
        log::debug!("loaded roster configuration from '{filepath}'");
        Ok(roster_config)
    }

    /// Checks basic sanity of every section.
    pub fn validate(&self) -> Result<(), RosterError> {
        validation::validate_config(self).map_err(RosterError::ConfigurationError)
    }

    /// Labor parameters of a category.
    pub fn params(&self, category: DriverCategory) -> &CategoryParams {
        match category {
            DriverCategory::A => &self.category_a,
            DriverCategory::B => &self.category_b,
        }
    }
}

/// Departure grid parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// First departure of a service day ("HH:MM").
    pub service_start: String,
    /// End of service ("HH:MM"); earlier than the start means next day.
    pub service_end: String,
    /// Headway inside peak hours (minutes).
    pub peak_headway_min: i64,
    /// Headway outside peak hours and on weekends (minutes).
    pub off_peak_headway_min: i64,
    /// Weekday peak hour ranges.
    pub peak_hours: Vec<HourWindow>,
    /// Number of bus runs the grid distributes departures over.
    pub bus_slots: u32,
    /// Travel time of one trip (minutes).
    pub travel_min: i64,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            service_start: String::from("06:00"),
            service_end: String::from("03:00"),
            peak_headway_min: 10,
            off_peak_headway_min: 20,
            peak_hours: vec![HourWindow::new(7, 9), HourWindow::new(17, 19)],
            bus_slots: 8,
            travel_min: 60,
        }
    }
}

impl TimetableConfig {
    /// Service window in service-day minutes, `end > start`.
    ///
    /// Returns `None` if either bound is not a valid "HH:MM" time.
    pub fn service_window_min(&self) -> Option<(i64, i64)> {
        let start = parse_clock(&self.service_start)?;
        let mut end = parse_clock(&self.service_end)?;
        if end < start {
            end += crate::models::MINUTES_PER_DAY;
        }
        Some((start, end))
    }
}

/// Optional caps on pool sizes. `None` = unlimited minting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolLimits {
    pub max_drivers_a: Option<usize>,
    pub max_drivers_b: Option<usize>,
    pub max_buses: Option<usize>,
}

impl PoolLimits {
    /// Cap for a driver category.
    pub fn drivers(&self, category: DriverCategory) -> Option<usize> {
        match category {
            DriverCategory::A => self.max_drivers_a,
            DriverCategory::B => self.max_drivers_b,
        }
    }
}

/// Parses "HH:MM" into minutes from midnight.
pub fn parse_clock(value: &str) -> Option<i64> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .ok()
        .map(|t| i64::from(t.num_seconds_from_midnight() / 60))
}

/// Formats a service-day minute as wall-clock "HH:MM".
pub fn format_clock(minute: i64) -> String {
    let wrapped = minute.rem_euclid(crate::models::MINUTES_PER_DAY) as u32;
    match NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0) {
        Some(t) => t.format("%H:%M").to_string(),
        None => format!("{minute}"),
    }
}

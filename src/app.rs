//! Command line surface of the `u-roster` binary.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{format_clock, RosterConfig};
use crate::error::RosterError;
use crate::models::{Trip, WeeklyPlan};
use crate::scheduler::{RosterKpi, WeeklyAssigner};
use crate::timetable::DepartureGrid;

/// weekly driver and bus rostering for a single transit line
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct RosterApp {
    #[command(subcommand)]
    pub op: RosterOperation,
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RosterOperation {
    /// print the generated week of departures
    Timetable {
        /// write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// generate the week and assign drivers and buses
    Assign {
        /// include roster KPIs next to the plan
        #[arg(long, default_value_t = false)]
        kpi: bool,
        /// write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// A departure as printed by the `timetable` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableRow {
    pub day: u8,
    pub bus_slot: u32,
    pub departure: String,
    pub arrival: String,
}

impl From<&Trip> for TimetableRow {
    fn from(trip: &Trip) -> Self {
        Self {
            day: trip.day,
            bus_slot: trip.bus_slot,
            departure: format_clock(trip.start_min),
            arrival: format_clock(trip.end_min),
        }
    }
}

#[derive(Serialize)]
struct AssignOutput<'a> {
    plan: &'a WeeklyPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    kpi: Option<RosterKpi>,
}

impl RosterApp {
    /// Loads the configuration and runs the selected operation.
    pub fn run(&self) -> Result<(), RosterError> {
        let config = match &self.config {
            Some(path) => RosterConfig::from_file(path)?,
            None => {
                log::debug!("no configuration file given, using defaults");
                RosterConfig::default()
            }
        };
        self.op.run(config)
    }
}

impl RosterOperation {
    pub fn run(&self, config: RosterConfig) -> Result<(), RosterError> {
        match self {
            RosterOperation::Timetable { output } => {
                let trips = DepartureGrid::new(&config.timetable)?.week();
                let rows: Vec<TimetableRow> = trips.iter().map(TimetableRow::from).collect();
                write_json(&rows, output.as_deref())
            }
            RosterOperation::Assign { kpi, output } => {
                let trips = DepartureGrid::new(&config.timetable)?.week();
                let plan = WeeklyAssigner::new(config)?.run(&trips);
                let kpi = kpi.then(|| RosterKpi::calculate(&plan));
                if let Some(k) = &kpi {
                    log::info!(
                        "drivers A={} B={}, buses={}, coverage={:.3}",
                        k.category_a.drivers,
                        k.category_b.drivers,
                        k.buses,
                        k.coverage()
                    );
                }
                write_json(&AssignOutput { plan: &plan, kpi }, output.as_deref())
            }
        }
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), RosterError> {
    let result = match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                RosterError::OutputError(format!("failed creating '{}': {e}", path.display()))
            })?;
            serde_json::to_writer_pretty(file, value)
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)
                .and_then(|()| writeln!(stdout).map_err(serde_json::Error::io))
        }
    };
    result.map_err(|e| RosterError::OutputError(e.to_string()))
}

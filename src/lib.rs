//! Weekly crew and vehicle rostering for a single transit line.
//!
//! Given a week of timetabled trips, assigns each trip a driver and a bus
//! under labor rules that differ between two driver categories, growing the
//! driver and bus pools only when no existing member can take the trip.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Trip`, `Driver`, `Bus`, `WeeklyPlan`,
//!   `CategoryParams`, `HourWindow`
//! - **`eligibility`**: Per-category labor rules and bus availability
//! - **`pool`**: Append-only resource pools with first-fit lookup
//! - **`scheduler`**: Assignment engine, weekly driver, and KPIs
//! - **`timetable`**: Departure grid generation from headways
//! - **`config`**: Run configuration with TOML loading
//! - **`validation`**: Configuration and trip integrity checks
//! - **`error`**: Fatal and per-trip error types
//! - **`app`**: Command line operations behind the `u-roster` binary
//!
//! # Example
//!
//! ```
//! use u_roster::config::RosterConfig;
//! use u_roster::scheduler::{RosterKpi, WeeklyAssigner};
//! use u_roster::timetable::DepartureGrid;
//!
//! let config = RosterConfig::default();
//! let trips = DepartureGrid::new(&config.timetable).unwrap().week();
//! let plan = WeeklyAssigner::new(config).unwrap().run(&trips);
//!
//! assert!(plan.is_complete());
//! assert!(RosterKpi::calculate(&plan).drivers() > 0);
//! ```

pub mod app;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod pool;
pub mod scheduler;
pub mod timetable;
pub mod validation;

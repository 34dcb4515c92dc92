//! Greedy roster assignment and KPI evaluation.
//!
//! # Algorithm
//!
//! `WeeklyAssigner` walks the week day by day and hands each trip, in
//! departure order, to an `AssignmentEngine`. The engine picks the first
//! eligible driver and bus in creation order and mints new ones when none
//! qualifies. It is a single deterministic pass without backtracking: the
//! resource count is not minimal, but the result is reproducible.
//!
//! # KPI
//!
//! `RosterKpi` summarizes a plan: pool sizes, coverage, and duty per
//! category.

mod engine;
mod kpi;
mod weekly;

pub use engine::AssignmentEngine;
pub use kpi::{CategoryKpi, RosterKpi};
pub use weekly::{unstaffed_trips, WeeklyAssigner};

//! Weekly plan (solution) model.
//!
//! A plan records, for every trip of the week, either the driver and bus
//! that operate it or the reason it could not be staffed. It also carries
//! the final driver and bus pools so that per-driver route lists and duty
//! totals can be read back by a renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Bus, Driver, DriverCategory, RouteRecord, Trip};
use crate::error::TripError;

/// Identity of a driver across both category pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverRef {
    /// Category.
    pub category: DriverCategory,
    /// Id within the category.
    pub id: u32,
}

impl DriverRef {
    /// Creates a driver reference.
    pub fn new(category: DriverCategory, id: u32) -> Self {
        Self { category, id }
    }
}

impl fmt::Display for DriverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.category)
    }
}

impl From<&Driver> for DriverRef {
    fn from(driver: &Driver) -> Self {
        Self::new(driver.category, driver.id)
    }
}

/// A staffed trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The trip.
    pub trip: Trip,
    /// Driver operating it.
    pub driver: DriverRef,
    /// Vehicle operating it.
    pub bus_id: u32,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(trip: Trip, driver: DriverRef, bus_id: u32) -> Self {
        Self {
            trip,
            driver,
            bus_id,
        }
    }
}

/// Route list and duty total of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSummary {
    /// Driver identity.
    pub driver: DriverRef,
    /// Routes in assignment order.
    pub routes: Vec<RouteRecord>,
    /// Duty minutes over the week.
    pub total_minutes: i64,
}

/// The outcome of a weekly run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyPlan {
    /// Staffed trips in processing order.
    pub assignments: Vec<Assignment>,
    /// Trips that were rejected or could not be staffed.
    pub issues: Vec<TripError>,
    /// Drivers, category A pool first, each pool in creation order.
    pub drivers: Vec<Driver>,
    /// Buses in creation order.
    pub buses: Vec<Bus>,
}

impl WeeklyPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Adds a per-trip issue.
    pub fn add_issue(&mut self, issue: TripError) {
        self.issues.push(issue);
    }

    /// Whether every trip was staffed.
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of staffed trips.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of valid trips left without a driver or bus.
    pub fn unstaffed_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|e| matches!(e, TripError::UnstaffableTrip { .. }))
            .count()
    }

    /// Number of malformed trips.
    pub fn invalid_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|e| matches!(e, TripError::InvalidTrip { .. }))
            .count()
    }

    /// Finds the assignment of a trip.
    pub fn assignment_for(&self, trip: &Trip) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.trip == *trip)
    }

    /// Returns all assignments of a driver.
    pub fn assignments_for_driver(&self, driver: DriverRef) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.driver == driver)
            .collect()
    }

    /// Returns all assignments of a bus.
    pub fn assignments_for_bus(&self, bus_id: u32) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.bus_id == bus_id)
            .collect()
    }

    /// Looks up a driver.
    pub fn driver(&self, driver: DriverRef) -> Option<&Driver> {
        self.drivers
            .iter()
            .find(|d| d.category == driver.category && d.id == driver.id)
    }

    /// Drivers of one category in creation order.
    pub fn drivers_of(&self, category: DriverCategory) -> impl Iterator<Item = &Driver> {
        self.drivers.iter().filter(move |d| d.category == category)
    }

    /// Number of drivers of one category.
    pub fn driver_count(&self, category: DriverCategory) -> usize {
        self.drivers_of(category).count()
    }

    /// Fleet size.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Per-driver route lists and duty totals.
    pub fn driver_summaries(&self) -> Vec<DriverSummary> {
        self.drivers
            .iter()
            .map(|d| DriverSummary {
                driver: DriverRef::from(d),
                routes: d.routes().to_vec(),
                total_minutes: d.total_minutes(),
            })
            .collect()
    }
}

//! Bus (vehicle) model.

use serde::{Deserialize, Serialize};

use super::Trip;

/// A vehicle of the fleet.
///
/// Vehicles carry no labor rules: a bus is free once its last trip has
/// arrived. Occupancy is tracked in week minutes so a post-midnight arrival
/// of one service day is compared correctly against the next day's
/// departures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    /// Sequential fleet id (starting at 1).
    pub id: u32,
    busy_until: Option<i64>,
    trips: u32,
}

impl Bus {
    /// Creates an idle bus.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            busy_until: None,
            trips: 0,
        }
    }

    /// Arrival of the last committed trip, in week minutes.
    /// `None` = never assigned.
    pub fn busy_until(&self) -> Option<i64> {
        self.busy_until
    }

    /// Number of trips driven.
    pub fn trip_count(&self) -> u32 {
        self.trips
    }

    pub(crate) fn record_trip(&mut self, trip: &Trip) {
        self.busy_until = Some(trip.week_end_min());
        self.trips += 1;
    }
}

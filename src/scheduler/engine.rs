//! Per-trip assignment engine.
//!
//! # Algorithm
//!
//! For each trip, a driver is resolved in fixed priority order:
//!
//! | Day | Order |
//! |-----|-------|
//! | Mon–Fri | A pool → B pool → new A (if a fresh A would accept) → new B |
//! | Sat–Sun | B pool → new B |
//!
//! A bus is resolved independently: first free bus in creation order, else
//! a new bus. Both decisions are made before anything is committed, so a
//! trip that fails on either resource leaves every pool untouched.
//!
//! # Complexity
//! O(d + b) per trip, where d = drivers and b = buses created so far.

use crate::config::RosterConfig;
use crate::error::{ResourceKind, TripError};
use crate::models::{Assignment, Bus, Driver, DriverCategory, DriverRef, Trip};
use crate::pool::{PoolResource, ResourcePool};

/// Where a resource for a trip comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Existing(u32),
    Mint,
}

/// Greedy first-fit driver and bus assignment.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::models::{DriverCategory, Trip};
/// use u_roster::scheduler::AssignmentEngine;
///
/// let mut engine = AssignmentEngine::new(&RosterConfig::default());
/// let a = engine.assign(&Trip::new(0, 0, 7 * 60, 8 * 60)).unwrap();
/// assert_eq!(a.driver.category, DriverCategory::A);
/// assert_eq!(a.bus_id, 1);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    drivers_a: ResourcePool<Driver>,
    drivers_b: ResourcePool<Driver>,
    buses: ResourcePool<Bus>,
}

impl AssignmentEngine {
    /// Creates an engine with empty pools.
    pub fn new(config: &RosterConfig) -> Self {
        let limits = &config.limits;
        Self {
            drivers_a: ResourcePool::new((DriverCategory::A, config.category_a.clone()))
                .with_capacity(limits.drivers(DriverCategory::A)),
            drivers_b: ResourcePool::new((DriverCategory::B, config.category_b.clone()))
                .with_capacity(limits.drivers(DriverCategory::B)),
            buses: ResourcePool::new(()).with_capacity(limits.max_buses),
        }
    }

    /// Staffs one trip and commits the chosen driver and bus.
    ///
    /// # Errors
    /// `UnstaffableTrip` when no driver or bus can be found or minted.
    /// Nothing is committed in that case.
    pub fn assign(&mut self, trip: &Trip) -> Result<Assignment, TripError> {
        let (category, driver_pick) = self
            .resolve_driver(trip)
            .ok_or_else(|| unstaffable(trip, ResourceKind::Driver))?;
        let bus_pick = self
            .resolve_bus(trip)
            .ok_or_else(|| unstaffable(trip, ResourceKind::Bus))?;

        let bus_id = take(&mut self.buses, bus_pick, trip, ResourceKind::Bus)?;
        commit(&mut self.buses, bus_id, trip, bus_id, ResourceKind::Bus)?;

        let drivers = match category {
            DriverCategory::A => &mut self.drivers_a,
            DriverCategory::B => &mut self.drivers_b,
        };
        let driver_id = take(drivers, driver_pick, trip, ResourceKind::Driver)?;
        commit(drivers, driver_id, trip, bus_id, ResourceKind::Driver)?;

        let driver = DriverRef::new(category, driver_id);
        log::debug!(
            "day {} {}..{}: driver {driver}, bus {bus_id}",
            trip.day,
            trip.start_min,
            trip.end_min
        );
        Ok(Assignment::new(*trip, driver, bus_id))
    }

    fn resolve_driver(&self, trip: &Trip) -> Option<(DriverCategory, Pick)> {
        let weekday = !trip.is_weekend();
        if weekday {
            if let Some(d) = self.drivers_a.first_eligible(trip) {
                return Some((DriverCategory::A, Pick::Existing(d.id)));
            }
        }
        if let Some(d) = self.drivers_b.first_eligible(trip) {
            return Some((DriverCategory::B, Pick::Existing(d.id)));
        }
        if weekday && self.drivers_a.can_mint() && self.drivers_a.fresh_accepts(trip) {
            return Some((DriverCategory::A, Pick::Mint));
        }
        if self.drivers_b.can_mint() && self.drivers_b.fresh_accepts(trip) {
            return Some((DriverCategory::B, Pick::Mint));
        }
        None
    }

    fn resolve_bus(&self, trip: &Trip) -> Option<Pick> {
        match self.buses.first_eligible(trip) {
            Some(bus) => Some(Pick::Existing(bus.id)),
            None if self.buses.can_mint() => Some(Pick::Mint),
            None => None,
        }
    }

    /// Category A drivers.
    pub fn drivers_a(&self) -> &ResourcePool<Driver> {
        &self.drivers_a
    }

    /// Category B drivers.
    pub fn drivers_b(&self) -> &ResourcePool<Driver> {
        &self.drivers_b
    }

    /// Buses.
    pub fn buses(&self) -> &ResourcePool<Bus> {
        &self.buses
    }

    /// Consumes the engine, returning all drivers (A first) and buses.
    pub fn into_resources(self) -> (Vec<Driver>, Vec<Bus>) {
        let mut drivers = self.drivers_a.into_inner();
        drivers.extend(self.drivers_b.into_inner());
        (drivers, self.buses.into_inner())
    }
}

fn unstaffable(trip: &Trip, resource: ResourceKind) -> TripError {
    TripError::UnstaffableTrip {
        trip: *trip,
        resource,
    }
}

/// Resolves a pick to a resource id, minting if needed.
fn take<T: PoolResource>(
    pool: &mut ResourcePool<T>,
    pick: Pick,
    trip: &Trip,
    kind: ResourceKind,
) -> Result<u32, TripError> {
    match pick {
        Pick::Existing(id) => Ok(id),
        Pick::Mint => {
            let id = pool
                .create()
                .map(|r| r.id())
                .ok_or_else(|| unstaffable(trip, kind))?;
            log::debug!("new {kind} {id} for day {} at {}", trip.day, trip.start_min);
            Ok(id)
        }
    }
}

fn commit<T: PoolResource>(
    pool: &mut ResourcePool<T>,
    id: u32,
    trip: &Trip,
    bus_id: u32,
    kind: ResourceKind,
) -> Result<(), TripError> {
    pool.mark_assigned(id, trip, bus_id)
        .map(|_| ())
        .ok_or_else(|| unstaffable(trip, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolLimits;

    fn hm(h: i64, m: i64) -> i64 {
        h * 60 + m
    }

    fn engine() -> AssignmentEngine {
        AssignmentEngine::new(&RosterConfig::default())
    }

    #[test]
    fn test_weekday_daytime_trip_gets_category_a() {
        let mut e = engine();
        let a = e.assign(&Trip::new(0, 0, hm(7, 0), hm(8, 0))).unwrap();
        assert_eq!(a.driver, DriverRef::new(DriverCategory::A, 1));
        assert_eq!(a.bus_id, 1);
        assert_eq!(e.drivers_a().len(), 1);
        assert!(e.drivers_b().is_empty());
    }

    #[test]
    fn test_early_weekday_trip_falls_back_to_b() {
        let mut e = engine();
        let a = e.assign(&Trip::new(0, 0, hm(6, 0), hm(7, 0))).unwrap();
        assert_eq!(a.driver, DriverRef::new(DriverCategory::B, 1));
        assert!(e.drivers_a().is_empty());
    }

    #[test]
    fn test_existing_b_preferred_over_new_a() {
        let mut e = engine();
        e.assign(&Trip::new(0, 0, hm(6, 0), hm(7, 0))).unwrap();
        // A pool is empty, B1 can take it: no new A is minted
        let a = e.assign(&Trip::new(0, 1, hm(7, 30), hm(8, 30))).unwrap();
        assert_eq!(a.driver, DriverRef::new(DriverCategory::B, 1));
        assert!(e.drivers_a().is_empty());
    }

    #[test]
    fn test_weekend_uses_only_b() {
        let mut e = engine();
        let a = e.assign(&Trip::new(5, 0, hm(8, 0), hm(9, 0))).unwrap();
        assert_eq!(a.driver.category, DriverCategory::B);
        assert!(e.drivers_a().is_empty());
    }

    #[test]
    fn test_overlapping_trips_mint_new_resources() {
        let mut e = engine();
        let first = e.assign(&Trip::new(1, 0, hm(8, 0), hm(9, 0))).unwrap();
        let second = e.assign(&Trip::new(1, 1, hm(8, 10), hm(9, 10))).unwrap();
        assert_eq!(first.driver, DriverRef::new(DriverCategory::A, 1));
        assert_eq!(second.driver, DriverRef::new(DriverCategory::A, 2));
        assert_eq!(first.bus_id, 1);
        assert_eq!(second.bus_id, 2);
    }

    #[test]
    fn test_bus_reused_after_arrival() {
        let mut e = engine();
        e.assign(&Trip::new(1, 0, hm(8, 0), hm(9, 0))).unwrap();
        let later = e.assign(&Trip::new(1, 0, hm(9, 0), hm(10, 0))).unwrap();
        assert_eq!(later.bus_id, 1);
        assert_eq!(e.buses().len(), 1);
        assert_eq!(e.buses().get(1).and_then(|b| b.busy_until()), Some(1440 + hm(10, 0)));
    }

    #[test]
    fn test_driver_records_resolved_bus() {
        let mut e = engine();
        e.assign(&Trip::new(0, 3, hm(8, 0), hm(9, 0))).unwrap();
        let routes = e.drivers_a().get(1).unwrap().routes().to_vec();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].bus_id, 1);
    }

    #[test]
    fn test_driver_cap_yields_unstaffable() {
        let config = RosterConfig {
            limits: PoolLimits {
                max_drivers_a: Some(1),
                max_drivers_b: Some(1),
                max_buses: None,
            },
            ..RosterConfig::default()
        };
        let mut e = AssignmentEngine::new(&config);
        e.assign(&Trip::new(0, 0, hm(8, 0), hm(9, 0))).unwrap();
        e.assign(&Trip::new(0, 1, hm(8, 0), hm(9, 0))).unwrap();
        let err = e.assign(&Trip::new(0, 2, hm(8, 0), hm(9, 0))).unwrap_err();
        assert_eq!(
            err,
            TripError::UnstaffableTrip {
                trip: Trip::new(0, 2, hm(8, 0), hm(9, 0)),
                resource: ResourceKind::Driver,
            }
        );
    }

    #[test]
    fn test_bus_cap_commits_nothing() {
        let config = RosterConfig {
            limits: PoolLimits {
                max_buses: Some(1),
                ..PoolLimits::default()
            },
            ..RosterConfig::default()
        };
        let mut e = AssignmentEngine::new(&config);
        e.assign(&Trip::new(0, 0, hm(8, 0), hm(9, 0))).unwrap();
        let err = e.assign(&Trip::new(0, 1, hm(8, 30), hm(9, 30))).unwrap_err();
        assert!(matches!(
            err,
            TripError::UnstaffableTrip {
                resource: ResourceKind::Bus,
                ..
            }
        ));
        // the driver that would have taken it was not minted
        assert_eq!(e.drivers_a().len(), 1);
        assert!(e.drivers_b().is_empty());
    }

    #[test]
    fn test_trip_longer_than_any_shift_is_unstaffable() {
        let mut e = engine();
        let err = e.assign(&Trip::new(2, 0, hm(6, 0), hm(19, 0))).unwrap_err();
        assert!(matches!(
            err,
            TripError::UnstaffableTrip {
                resource: ResourceKind::Driver,
                ..
            }
        ));
        assert!(e.buses().is_empty());
    }

    #[test]
    fn test_into_resources_orders_a_before_b() {
        let mut e = engine();
        e.assign(&Trip::new(0, 0, hm(6, 0), hm(7, 0))).unwrap();
        e.assign(&Trip::new(0, 1, hm(8, 0), hm(9, 0))).unwrap();
        e.assign(&Trip::new(0, 2, hm(8, 0), hm(9, 0))).unwrap();
        let (drivers, buses) = e.into_resources();
        let refs: Vec<_> = drivers.iter().map(DriverRef::from).collect();
        assert_eq!(refs[0].category, DriverCategory::A);
        assert_eq!(refs.last().map(|r| r.category), Some(DriverCategory::B));
        assert!(!buses.is_empty());
    }
}

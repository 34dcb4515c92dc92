//! Resource pools.
//!
//! A pool owns every resource of one kind created during a run. Resources
//! are appended in creation order, which is also the scan order for
//! first-fit selection, and ids are handed out sequentially from 1 by the
//! pool itself so independent runs never share a counter.

use std::fmt::Debug;

use crate::eligibility::Eligible;
use crate::models::{Bus, CategoryParams, Driver, DriverCategory, Trip};

/// A resource that a pool can mint and commit trips to.
pub trait PoolResource: Eligible + Debug + Clone {
    /// Data every new resource is minted from.
    type Template: Debug + Clone;

    /// Creates a resource with default state.
    fn mint(id: u32, template: &Self::Template) -> Self;

    /// Pool-assigned id.
    fn id(&self) -> u32;

    /// Records a trip against the resource.
    fn commit(&mut self, trip: &Trip, bus_id: u32);
}

impl PoolResource for Driver {
    type Template = (DriverCategory, CategoryParams);

    fn mint(id: u32, template: &Self::Template) -> Self {
        let (category, params) = template;
        Driver::new(id, *category, params.clone())
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn commit(&mut self, trip: &Trip, bus_id: u32) {
        self.record_trip(trip, bus_id)
    }
}

impl PoolResource for Bus {
    type Template = ();

    fn mint(id: u32, _template: &Self::Template) -> Self {
        Bus::new(id)
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn commit(&mut self, trip: &Trip, _bus_id: u32) {
        self.record_trip(trip)
    }
}

/// An append-only pool of resources.
#[derive(Debug, Clone)]
pub struct ResourcePool<T: PoolResource> {
    items: Vec<T>,
    template: T::Template,
    next_id: u32,
    capacity: Option<usize>,
}

impl<T: PoolResource> ResourcePool<T> {
    /// Creates an empty, uncapped pool.
    pub fn new(template: T::Template) -> Self {
        Self {
            items: Vec::new(),
            template,
            next_id: 1,
            capacity: None,
        }
    }

    /// Caps the number of resources this pool may mint.
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool holds no resources.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resources in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Looks up a resource by id.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// The first resource, in creation order, that may take the trip.
    pub fn first_eligible(&self, trip: &Trip) -> Option<&T> {
        self.items.iter().find(|r| r.can_take(trip))
    }

    /// Whether the cap still allows minting.
    pub fn can_mint(&self) -> bool {
        self.capacity.map_or(true, |cap| self.items.len() < cap)
    }

    /// Whether a freshly minted resource would accept the trip.
    ///
    /// Does not mint; the id counter is unchanged.
    pub fn fresh_accepts(&self, trip: &Trip) -> bool {
        T::mint(self.next_id, &self.template).can_take(trip)
    }

    /// Mints a resource with the next id and appends it.
    ///
    /// Returns `None` when the pool is at its cap.
    pub fn create(&mut self) -> Option<&T> {
        if !self.can_mint() {
            return None;
        }
        let resource = T::mint(self.next_id, &self.template);
        self.next_id += 1;
        self.items.push(resource);
        self.items.last()
    }

    /// Commits a trip to the resource with the given id.
    ///
    /// Returns the updated resource, or `None` if the id is unknown.
    pub fn mark_assigned(&mut self, id: u32, trip: &Trip, bus_id: u32) -> Option<&T> {
        let resource = self.items.iter_mut().find(|r| r.id() == id)?;
        resource.commit(trip, bus_id);
        Some(resource)
    }

    /// Consumes the pool, returning its resources in creation order.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

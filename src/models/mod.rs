//! Rostering domain models.
//!
//! Provides the data types of a weekly operating plan: the trips to staff,
//! the resources that staff them, and the resulting plan.
//!
//! # Domain Mappings
//!
//! | u-roster | Scheduling term |
//! |----------|-----------------|
//! | Trip | Activity with a fixed time slot |
//! | Driver | Human resource with shift rules |
//! | Bus | Primary resource |
//! | WeeklyPlan | Schedule |

mod bus;
mod calendar;
mod driver;
mod plan;
mod trip;

pub use bus::Bus;
pub use calendar::{ArrivalLimits, HourWindow};
pub use driver::{CategoryParams, Driver, DriverCategory, RouteRecord};
pub use plan::{Assignment, DriverRef, DriverSummary, WeeklyPlan};
pub use trip::{
    hour_of, intervals_touch, is_weekend, Trip, DAYS_IN_WEEK, FIRST_WEEKEND_DAY, MINUTES_PER_DAY,
};

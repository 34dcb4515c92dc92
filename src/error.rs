//! Error types.
//!
//! Two layers: [`TripError`] is recorded per trip inside a plan and never
//! stops a run; [`RosterError`] is fatal and aborts before assignment starts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Trip;
use crate::validation::ValidationError;

/// The kind of resource a trip could not obtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Driver,
    Bus,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Driver => write!(f, "driver"),
            ResourceKind::Bus => write!(f, "bus"),
        }
    }
}

/// A per-trip failure, collected into the plan.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripError {
    #[error("invalid trip on day {} at minute {}: {reason}", .trip.day, .trip.start_min)]
    InvalidTrip { trip: Trip, reason: String },
    #[error("no eligible {resource} for trip on day {} at minute {}", .trip.day, .trip.start_min)]
    UnstaffableTrip { trip: Trip, resource: ResourceKind },
}

impl TripError {
    /// The trip this error refers to.
    pub fn trip(&self) -> &Trip {
        match self {
            TripError::InvalidTrip { trip, .. } => trip,
            TripError::UnstaffableTrip { trip, .. } => trip,
        }
    }
}

/// A fatal error.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    #[error("invalid configuration: {}", join_issues(.0))]
    ConfigurationError(Vec<ValidationError>),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failed writing output: {0}")]
    OutputError(String),
}

fn join_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_trip_error_messages() {
        let trip = Trip::new(3, 0, 420, 480);
        let e = TripError::UnstaffableTrip {
            trip,
            resource: ResourceKind::Bus,
        };
        assert_eq!(e.to_string(), "no eligible bus for trip on day 3 at minute 420");
        assert_eq!(e.trip(), &trip);
    }

    #[test]
    fn test_configuration_error_lists_issues() {
        let e = RosterError::ConfigurationError(vec![
            ValidationError::new(ValidationErrorKind::WorkBounds, "category A: work_min > work_max"),
            ValidationError::new(ValidationErrorKind::Headway, "peak headway is zero"),
        ]);
        let msg = e.to_string();
        assert!(msg.starts_with("invalid configuration: "));
        assert!(msg.contains("work_min > work_max; "));
        assert!(msg.contains("peak headway is zero"));
    }
}

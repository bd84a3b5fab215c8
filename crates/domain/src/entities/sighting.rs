//! Sightings computed by the resolver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transit::{StopTime, Trip};
use crate::value_objects::GeoPoint;

/// A trip passing a fixed observation point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSight {
    /// When the train passes closest to the point
    pub timestamp: DateTime<Utc>,
    pub trip: Trip,
    /// Last scheduled stop before the passage
    #[serde(default)]
    pub stop_before: Option<StopTime>,
    /// First scheduled stop after the passage
    #[serde(default)]
    pub stop_after: Option<StopTime>,
}

/// Another trip seen from aboard a moving trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingTrainSight {
    pub timestamp: DateTime<Utc>,
    /// The trip that is seen
    pub trip: Trip,
    /// Where the observing train is at `timestamp`
    pub observer_position: GeoPoint,
    /// Where the seen train is at `timestamp`
    pub sighted_position: GeoPoint,
}

/// Result of an aboard search: the sightings plus the observing trip as the
/// resolver resolved it (with lateness applied to its stop times)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSights {
    pub sights: Vec<MovingTrainSight>,
    pub trip: Trip,
}

//! Static GTFS entities
//!
//! Every entity is scoped by the feed it was imported from, so lookups
//! always carry a `feed_id` alongside the entity's own identifier.

use serde::{Deserialize, Serialize};

/// An imported schedule source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub feed_id: String,
    pub display_name: String,
    #[serde(default)]
    pub publisher_name: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// A GTFS route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub feed_id: String,
    pub route_id: String,
    #[serde(default)]
    pub agency_id: Option<String>,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub long_name: String,
    /// GTFS `route_type` code (2 = rail)
    pub route_type: i32,
    /// Hex colour without the leading `#`
    #[serde(default)]
    pub color: Option<String>,
}

/// A GTFS stop or station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub feed_id: String,
    pub stop_id: String,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub parent_station: Option<String>,
}

/// A scheduled call of a trip at a stop
///
/// Times are kept as GTFS service-day offsets (`HH:MM:SS`), which may exceed
/// `24:00:00` for trips running past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTime {
    pub feed_id: String,
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: String,
    pub departure_time: String,
    #[serde(default)]
    pub stop: Option<Stop>,
}

/// A scheduled trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub feed_id: String,
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    #[serde(default)]
    pub headsign: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default)]
    pub stop_times: Vec<StopTime>,
}

//! Application services

mod sighting_service;

pub use sighting_service::{AboardSights, LookupContent, PointSights, SightingService};

//! Domain entities - Transit data as served by the resolver

mod sighting;
mod transit;

pub use sighting::{MovingTrainSight, TrainSight, TripSights};
pub use transit::{Feed, Route, Stop, StopTime, Trip};

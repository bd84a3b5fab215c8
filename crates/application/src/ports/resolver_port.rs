//! Transit data resolver port
//!
//! Defines the interface to the service that owns the transit dataset and
//! performs the sighting computations. This layer only forwards arguments
//! and relays results.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta};
use domain::{DateWindow, Feed, GeoPoint, Route, Stop, StopTime, TrainSight, Trip, TripSights};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for transit data lookups and sighting searches
///
/// Lookups that find nothing return [`ApplicationError::NotFound`]; every
/// other resolver failure is [`ApplicationError::ExternalService`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResolverPort: Send + Sync {
    async fn get_trip(&self, feed_id: &str, trip_id: &str) -> Result<Trip, ApplicationError>;

    async fn get_route(&self, feed_id: &str, route_id: &str) -> Result<Route, ApplicationError>;

    async fn get_stop(&self, feed_id: &str, stop_id: &str) -> Result<Stop, ApplicationError>;

    /// All feeds known to the dataset
    async fn get_feeds(&self) -> Result<Vec<Feed>, ApplicationError>;

    async fn get_feed(&self, feed_id: &str) -> Result<Feed, ApplicationError>;

    /// Every scheduled call at a stop, across all trips
    async fn get_stop_times_at_stop(
        &self,
        feed_id: &str,
        stop_id: &str,
    ) -> Result<Vec<StopTime>, ApplicationError>;

    /// Trains visible from aboard `trip` on `date`, with its schedule shifted
    /// by `lateness`
    async fn get_sights_from_trip(
        &self,
        trip: &Trip,
        date: NaiveDate,
        lateness: TimeDelta,
    ) -> Result<TripSights, ApplicationError>;

    /// Trains passing near `point` on any day of `window`
    async fn get_real_train_sights(
        &self,
        point: GeoPoint,
        window: DateWindow,
    ) -> Result<Vec<TrainSight>, ApplicationError>;

    /// Check if the resolver is reachable
    async fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ResolverPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ResolverPort>();
    }
}

//! Resolver adapter - Implements ResolverPort using integration_trainmap

use application::error::ApplicationError;
use application::ports::ResolverPort;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta};
use domain::{DateWindow, Feed, GeoPoint, Route, Stop, StopTime, TrainSight, Trip, TripSights};
use integration_trainmap::{HttpTrainmapClient, ResolverConfig, ResolverError, TrainmapClient};
use tracing::{instrument, warn};

/// Adapter for the trainmap resolver service
pub struct ResolverAdapter {
    client: Box<dyn TrainmapClient>,
}

impl std::fmt::Debug for ResolverAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverAdapter")
            .field("client", &"TrainmapClient")
            .finish()
    }
}

impl ResolverAdapter {
    /// Wrap an existing resolver client
    pub fn new(client: impl TrainmapClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build an HTTP-backed adapter answering from `dataset`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn connect(config: &ResolverConfig, dataset: &str) -> Result<Self, ApplicationError> {
        let client = HttpTrainmapClient::new(config, Some(dataset.to_string()))
            .map_err(|e| ApplicationError::Internal(format!("resolver client: {e}")))?;
        Ok(Self::new(client))
    }
}

/// Translate a resolver failure, keeping the resolver's own message
fn map_error(operation: &str, err: ResolverError) -> ApplicationError {
    match err {
        ResolverError::NotFound(message) => ApplicationError::NotFound(message),
        ResolverError::RequestFailed { status, message } => {
            warn!(operation, status, %message, "Resolver rejected request");
            ApplicationError::ExternalService(message)
        },
        ResolverError::ConfigurationError(message) => {
            warn!(operation, %message, "Resolver misconfigured");
            ApplicationError::Internal(message)
        },
        other => {
            warn!(operation, error = %other, "Resolver unavailable");
            ApplicationError::ExternalService(other.to_string())
        },
    }
}

#[async_trait]
impl ResolverPort for ResolverAdapter {
    #[instrument(skip(self))]
    async fn get_trip(&self, feed_id: &str, trip_id: &str) -> Result<Trip, ApplicationError> {
        self.client
            .get_trip(feed_id, trip_id)
            .await
            .map_err(|e| map_error("get_trip", e))
    }

    #[instrument(skip(self))]
    async fn get_route(&self, feed_id: &str, route_id: &str) -> Result<Route, ApplicationError> {
        self.client
            .get_route(feed_id, route_id)
            .await
            .map_err(|e| map_error("get_route", e))
    }

    #[instrument(skip(self))]
    async fn get_stop(&self, feed_id: &str, stop_id: &str) -> Result<Stop, ApplicationError> {
        self.client
            .get_stop(feed_id, stop_id)
            .await
            .map_err(|e| map_error("get_stop", e))
    }

    #[instrument(skip(self))]
    async fn get_feeds(&self) -> Result<Vec<Feed>, ApplicationError> {
        self.client
            .get_feeds()
            .await
            .map_err(|e| map_error("get_feeds", e))
    }

    #[instrument(skip(self))]
    async fn get_feed(&self, feed_id: &str) -> Result<Feed, ApplicationError> {
        self.client
            .get_feed(feed_id)
            .await
            .map_err(|e| map_error("get_feed", e))
    }

    #[instrument(skip(self))]
    async fn get_stop_times_at_stop(
        &self,
        feed_id: &str,
        stop_id: &str,
    ) -> Result<Vec<StopTime>, ApplicationError> {
        self.client
            .get_stop_times_at_stop(feed_id, stop_id)
            .await
            .map_err(|e| map_error("get_stop_times_at_stop", e))
    }

    #[instrument(skip(self, trip), fields(trip_id = %trip.trip_id))]
    async fn get_sights_from_trip(
        &self,
        trip: &Trip,
        date: NaiveDate,
        lateness: TimeDelta,
    ) -> Result<TripSights, ApplicationError> {
        self.client
            .get_sights_from_trip(trip, date, lateness.num_seconds())
            .await
            .map_err(|e| map_error("get_sights_from_trip", e))
    }

    #[instrument(skip(self))]
    async fn get_real_train_sights(
        &self,
        point: GeoPoint,
        window: DateWindow,
    ) -> Result<Vec<TrainSight>, ApplicationError> {
        self.client
            .get_real_train_sights(point, window)
            .await
            .map_err(|e| map_error("get_real_train_sights", e))
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_message() {
        let err = map_error("get_trip", ResolverError::NotFound("record not found".into()));
        assert!(matches!(err, ApplicationError::NotFound(m) if m == "record not found"));
    }

    #[test]
    fn request_failure_relays_resolver_message() {
        let err = map_error(
            "get_feeds",
            ResolverError::RequestFailed {
                status: 500,
                message: "database is locked".into(),
            },
        );
        assert!(matches!(err, ApplicationError::ExternalService(m) if m == "database is locked"));
    }

    #[test]
    fn transport_failures_are_external() {
        let err = map_error("get_feeds", ResolverError::Timeout { timeout_secs: 5 });
        assert!(matches!(err, ApplicationError::ExternalService(m) if m.contains('5')));

        let err = map_error("get_feeds", ResolverError::ParseError("eof".into()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn configuration_errors_are_internal() {
        let err = map_error("get_feeds", ResolverError::ConfigurationError("bad".into()));
        assert!(matches!(err, ApplicationError::Internal(_)));
    }

    #[test]
    fn connect_rejects_unusable_url() {
        let config = ResolverConfig::for_testing("mailto:nobody@example.org");
        assert!(ResolverAdapter::connect(&config, "/data/gtfs.db").is_err());
    }

    #[test]
    fn debug_does_not_expose_client() {
        let adapter =
            ResolverAdapter::connect(&ResolverConfig::default(), "/data/gtfs.db").unwrap();
        assert_eq!(format!("{adapter:?}"), "ResolverAdapter { client: \"TrainmapClient\" }");
    }
}

//! Sighting service - dispatches decoded queries to the resolver
//!
//! Each operation makes the resolver calls its query needs and nothing more:
//! no retries, no partial results, and resolver errors are passed up
//! unchanged.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::{
    DataType, DateWindow, Feed, GeoPoint, MovingTrainSight, Route, Stop, StopTime, TrainSight,
    Trip, TripSights, midnight_utc,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::ResolverPort;
use crate::request_decoder::{AboardQuery, LookupKey, PointQuery};

/// Trains passing an observation point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSights {
    pub observation_point: GeoPoint,
    #[serde(flatten)]
    pub window: DateWindow,
    pub passing_times: Vec<TrainSight>,
}

/// Trains seen from aboard a trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboardSights {
    /// The observing trip as returned by the resolver
    pub trip: Trip,
    /// The requested date, not any date the resolver shifted to internally
    #[serde(with = "midnight_utc")]
    pub date: NaiveDate,
    pub sights: Vec<MovingTrainSight>,
}

/// Result of a static data lookup, serialized as the bare entity or list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupContent {
    Trip(Trip),
    Route(Route),
    Stop(Stop),
    Feed(Feed),
    Feeds(Vec<Feed>),
    StopTimes(Vec<StopTime>),
}

/// Routes sighting and lookup queries to the resolver
pub struct SightingService {
    resolver: Arc<dyn ResolverPort>,
    preview_day_count: u32,
}

impl std::fmt::Debug for SightingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SightingService")
            .field("resolver", &"<ResolverPort>")
            .field("preview_day_count", &self.preview_day_count)
            .finish()
    }
}

impl SightingService {
    /// Create a service whose point searches cover the reference date plus
    /// `preview_day_count` days
    pub fn new(resolver: Arc<dyn ResolverPort>, preview_day_count: u32) -> Self {
        Self {
            resolver,
            preview_day_count,
        }
    }

    /// Trains passing near a point, over the configured window
    #[instrument(skip(self), fields(point = %query.point, from = %query.reference_date))]
    pub async fn sights_near(&self, query: PointQuery) -> Result<PointSights, ApplicationError> {
        let window = DateWindow::forward(self.preview_day_count, query.reference_date)?;

        let passing_times = self
            .resolver
            .get_real_train_sights(query.point, window)
            .await?;

        debug!(count = passing_times.len(), "Point sightings resolved");

        Ok(PointSights {
            observation_point: query.point,
            window,
            passing_times,
        })
    }

    /// Trains visible from aboard a trip on a date
    #[instrument(skip(self), fields(feed_id = %query.feed_id, trip_id = %query.trip_id))]
    pub async fn sights_aboard(&self, query: AboardQuery) -> Result<AboardSights, ApplicationError> {
        let trip = self
            .resolver
            .get_trip(&query.feed_id, &query.trip_id)
            .await?;

        let TripSights { sights, trip } = self
            .resolver
            .get_sights_from_trip(&trip, query.date, query.lateness)
            .await?;

        debug!(count = sights.len(), "Aboard sightings resolved");

        Ok(AboardSights {
            trip,
            date: query.date,
            sights,
        })
    }

    /// Fetch one static entity, or a list of them
    #[instrument(skip(self), fields(data_type = %key.data_type))]
    pub async fn lookup(&self, key: LookupKey) -> Result<LookupContent, ApplicationError> {
        let LookupKey {
            data_type,
            first_key,
            second_key,
        } = key;
        let resolver = &self.resolver;

        let content = match data_type {
            DataType::Trips => LookupContent::Trip(resolver.get_trip(&first_key, &second_key).await?),
            DataType::Routes => {
                LookupContent::Route(resolver.get_route(&first_key, &second_key).await?)
            },
            DataType::Stops => LookupContent::Stop(resolver.get_stop(&first_key, &second_key).await?),
            DataType::Feeds if first_key.is_empty() => {
                LookupContent::Feeds(resolver.get_feeds().await?)
            },
            DataType::Feeds => LookupContent::Feed(resolver.get_feed(&first_key).await?),
            DataType::StopTimes => LookupContent::StopTimes(
                resolver
                    .get_stop_times_at_stop(&first_key, &second_key)
                    .await?,
            ),
        };

        Ok(content)
    }

    /// Whether the resolver answers at all
    pub async fn is_resolver_healthy(&self) -> bool {
        self.resolver.is_healthy().await
    }
}

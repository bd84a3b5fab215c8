//! HTTP client for the trainmap resolver
//!
//! Lookups are plain `GET`s on `/{kind}/{feed}/{id}`; the aboard search is
//! a `POST` because it carries a whole trip.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{DateWindow, Feed, GeoPoint, Route, Stop, StopTime, TrainSight, Trip, TripSights};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ResolverConfig;
use crate::error::ResolverError;

/// Header naming the dataset the resolver should answer from
pub const DATASET_HEADER: &str = "X-Trainmap-Dataset";

/// Trait for resolver clients
#[async_trait]
pub trait TrainmapClient: Send + Sync {
    async fn get_trip(&self, feed_id: &str, trip_id: &str) -> Result<Trip, ResolverError>;

    async fn get_route(&self, feed_id: &str, route_id: &str) -> Result<Route, ResolverError>;

    async fn get_stop(&self, feed_id: &str, stop_id: &str) -> Result<Stop, ResolverError>;

    async fn get_feeds(&self) -> Result<Vec<Feed>, ResolverError>;

    async fn get_feed(&self, feed_id: &str) -> Result<Feed, ResolverError>;

    async fn get_stop_times_at_stop(
        &self,
        feed_id: &str,
        stop_id: &str,
    ) -> Result<Vec<StopTime>, ResolverError>;

    async fn get_sights_from_trip(
        &self,
        trip: &Trip,
        date: NaiveDate,
        lateness_seconds: i64,
    ) -> Result<TripSights, ResolverError>;

    async fn get_real_train_sights(
        &self,
        point: GeoPoint,
        window: DateWindow,
    ) -> Result<Vec<TrainSight>, ResolverError>;

    /// Check if the resolver is reachable
    async fn is_healthy(&self) -> bool;
}

/// Resolver client speaking JSON over HTTP
#[derive(Debug)]
pub struct HttpTrainmapClient {
    client: Client,
    base_url: Url,
    dataset: Option<String>,
    timeout_secs: u64,
}

impl HttpTrainmapClient {
    /// Create a new resolver client
    ///
    /// `dataset` is sent with every request so a resolver serving several
    /// databases answers from the right one.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &ResolverConfig, dataset: Option<String>) -> Result<Self, ResolverError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ResolverError::ConfigurationError(format!("invalid base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ResolverError::ConfigurationError(format!(
                "base_url {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("trainmap-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResolverError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            dataset: dataset.filter(|d| !d.is_empty()),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Join percent-encoded path segments onto the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn with_dataset(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.dataset {
            Some(dataset) => request.header(DATASET_HEADER, dataset),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ResolverError> {
        let url = self.endpoint(segments);
        debug!(%url, "Resolver GET");
        self.send(self.client.get(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ResolverError> {
        let response = self.with_dataset(request).send().await.map_err(|e| {
            if e.is_timeout() {
                ResolverError::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                ResolverError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolverError::ParseError(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ResolverError::NotFound(error_message(&body, status)));
        }

        if !status.is_success() {
            let message = error_message(&body, status);
            warn!(status = status.as_u16(), %message, "Resolver request failed");
            return Err(ResolverError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ResolverError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TrainmapClient for HttpTrainmapClient {
    #[instrument(skip(self))]
    async fn get_trip(&self, feed_id: &str, trip_id: &str) -> Result<Trip, ResolverError> {
        self.get_json(&["trips", feed_id, trip_id]).await
    }

    #[instrument(skip(self))]
    async fn get_route(&self, feed_id: &str, route_id: &str) -> Result<Route, ResolverError> {
        self.get_json(&["routes", feed_id, route_id]).await
    }

    #[instrument(skip(self))]
    async fn get_stop(&self, feed_id: &str, stop_id: &str) -> Result<Stop, ResolverError> {
        self.get_json(&["stops", feed_id, stop_id]).await
    }

    #[instrument(skip(self))]
    async fn get_feeds(&self) -> Result<Vec<Feed>, ResolverError> {
        self.get_json(&["feeds"]).await
    }

    #[instrument(skip(self))]
    async fn get_feed(&self, feed_id: &str) -> Result<Feed, ResolverError> {
        self.get_json(&["feeds", feed_id]).await
    }

    #[instrument(skip(self))]
    async fn get_stop_times_at_stop(
        &self,
        feed_id: &str,
        stop_id: &str,
    ) -> Result<Vec<StopTime>, ResolverError> {
        self.get_json(&["stoptimes", feed_id, stop_id]).await
    }

    #[instrument(skip(self, trip), fields(trip_id = %trip.trip_id))]
    async fn get_sights_from_trip(
        &self,
        trip: &Trip,
        date: NaiveDate,
        lateness_seconds: i64,
    ) -> Result<TripSights, ResolverError> {
        let url = self.endpoint(&["sights", "aboard"]);
        let body = AboardRequest {
            trip,
            date,
            lateness_seconds,
        };

        debug!(%url, "Resolver aboard search");
        self.send(self.client.post(url).json(&body)).await
    }

    #[instrument(skip(self))]
    async fn get_real_train_sights(
        &self,
        point: GeoPoint,
        window: DateWindow,
    ) -> Result<Vec<TrainSight>, ResolverError> {
        let url = self.endpoint(&["sights", "point"]);
        let params = [
            ("lat", point.lat.to_string()),
            ("lon", point.lon.to_string()),
            ("start", window.first_date().to_string()),
            ("end", window.last_date().to_string()),
        ];

        debug!(%url, "Resolver point search");
        self.send(self.client.get(url).query(&params)).await
    }

    async fn is_healthy(&self) -> bool {
        let url = self.endpoint(&["health"]);
        match self.with_dataset(self.client.get(url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Resolver health check failed");
                false
            },
        }
    }
}

/// Pick the most useful message out of an error response
///
/// Prefers a JSON `{"error": "..."}` body, then the raw body, then the
/// status reason phrase.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        if !error.is_empty() {
            return error;
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[derive(Debug, Serialize)]
struct AboardRequest<'a> {
    trip: &'a Trip,
    date: NaiveDate,
    lateness_seconds: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

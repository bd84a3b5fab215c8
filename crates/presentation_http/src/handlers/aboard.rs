//! Trains visible from aboard a trip

use application::request_decoder::{decode_aboard_query, today};
use application::AboardSights;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;

use crate::envelope::respond;
use crate::error::ApiError;
use crate::state::AppState;

/// Captures of `/api/aboard/{feed_id}/{trip_id}/{date}/{late_seconds}`
#[derive(Debug, Deserialize)]
pub struct AboardPath {
    pub feed_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub late_seconds: Option<String>,
}

/// `GET /api/aboard/{feed_id}/{trip_id}/{date?}/{late_seconds?}`
#[instrument(skip(state))]
pub async fn sights_aboard(
    State(state): State<AppState>,
    path: Result<Path<AboardPath>, PathRejection>,
) -> Response {
    respond(resolve(&state, path).await, state.error_status_policy())
}

async fn resolve(
    state: &AppState,
    path: Result<Path<AboardPath>, PathRejection>,
) -> Result<AboardSights, ApiError> {
    let Path(params) = path?;
    let query = decode_aboard_query(
        &params.feed_id,
        &params.trip_id,
        params.date.as_deref(),
        params.late_seconds.as_deref(),
        today(),
    )?;

    Ok(state.sighting_service.sights_aboard(query).await?)
}

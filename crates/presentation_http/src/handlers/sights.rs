//! Trains passing near an observation point

use application::request_decoder::{decode_point_query, today};
use application::PointSights;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;

use crate::envelope::respond;
use crate::error::ApiError;
use crate::state::AppState;

/// Captures of `/api/sights/{lat}/{lon}/{date}`
#[derive(Debug, Deserialize)]
pub struct SightsPath {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// `GET /api/sights/{lat}/{lon}/{date?}`
#[instrument(skip(state))]
pub async fn sights_near(
    State(state): State<AppState>,
    path: Result<Path<SightsPath>, PathRejection>,
) -> Response {
    respond(resolve(&state, path).await, state.error_status_policy())
}

async fn resolve(
    state: &AppState,
    path: Result<Path<SightsPath>, PathRejection>,
) -> Result<PointSights, ApiError> {
    let Path(params) = path?;
    let query = decode_point_query(&params.lat, &params.lon, params.date.as_deref(), today())?;

    Ok(state.sighting_service.sights_near(query).await?)
}

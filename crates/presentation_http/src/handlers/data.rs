//! Static dataset lookups

use application::request_decoder::decode_lookup_key;
use application::LookupContent;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::envelope::respond;
use crate::error::ApiError;
use crate::state::AppState;

/// Captures of `/api/data/{data_type}/{first_key}/{second_key}`
#[derive(Debug, Deserialize)]
pub struct DataPath {
    pub data_type: String,
    #[serde(default)]
    pub first_key: Option<String>,
    #[serde(default)]
    pub second_key: Option<String>,
}

/// Lookup payload: the entity or list under `content`
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub content: LookupContent,
}

/// `GET /api/data/{data_type}/{first_key?}/{second_key?}`
#[instrument(skip(state))]
pub async fn lookup(
    State(state): State<AppState>,
    path: Result<Path<DataPath>, PathRejection>,
) -> Response {
    respond(resolve(&state, path).await, state.error_status_policy())
}

async fn resolve(
    state: &AppState,
    path: Result<Path<DataPath>, PathRejection>,
) -> Result<DataResponse, ApiError> {
    let Path(params) = path?;
    let key = decode_lookup_key(
        &params.data_type,
        params.first_key.as_deref(),
        params.second_key.as_deref(),
    )?;

    let content = state.sighting_service.lookup(key).await?;
    Ok(DataResponse { content })
}

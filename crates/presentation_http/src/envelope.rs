//! Response envelope
//!
//! Every API response is a JSON object carrying `success` and `error` next to
//! the payload fields: `{"success": true, "error": "", ...payload}` or
//! `{"success": false, "error": "<message>"}`.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use infrastructure::ErrorStatusPolicy;
use serde::Serialize;
use tracing::error;

use crate::error::ApiError;

/// Sent when the payload itself cannot be encoded
const ENCODE_FAILURE_BODY: &str = r#"{"success":false,"error":"internal error"}"#;

#[derive(Debug, Serialize)]
struct Envelope<'a, T> {
    success: bool,
    error: &'a str,
    #[serde(flatten)]
    payload: Option<&'a T>,
}

/// Render a handler outcome
pub fn respond<T: Serialize>(result: Result<T, ApiError>, policy: ErrorStatusPolicy) -> Response {
    match result {
        Ok(payload) => success(&payload),
        Err(err) => failure(&err, policy),
    }
}

/// `200 OK` with the payload's fields merged into the envelope
pub fn success<T: Serialize>(payload: &T) -> Response {
    encode(
        StatusCode::OK,
        &Envelope {
            success: true,
            error: "",
            payload: Some(payload),
        },
    )
}

/// Error envelope with the status chosen by `policy`
pub fn failure(err: &ApiError, policy: ErrorStatusPolicy) -> Response {
    encode::<()>(
        err.status(policy),
        &Envelope {
            success: false,
            error: err.message(),
            payload: None,
        },
    )
}

fn encode<T: Serialize>(status: StatusCode, envelope: &Envelope<'_, T>) -> Response {
    match serde_json::to_vec(envelope) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ENCODE_FAILURE_BODY.as_bytes().to_vec(),
            )
        },
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}

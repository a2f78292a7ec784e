//! Mapping of lookup failures to HTTP responses.
//!
//! # Design Decisions
//! - Every failure body is `{"error": <message>}`
//! - Caller mistakes are 4xx, operator and upstream problems are 5xx
//! - Upstream messages are passed through for diagnostics

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde::{Deserialize, Serialize};

use crate::activity::AggregationError;
use crate::observability::metrics;

/// JSON body of every failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status code for a lookup failure.
pub fn status_for(error: &AggregationError) -> StatusCode {
    match error {
        AggregationError::InvalidAddress => StatusCode::BAD_REQUEST,
        AggregationError::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
        AggregationError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AggregationError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        metrics::record_http_response(status.as_u16());
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Turn a middleware failure into a JSON error response.
///
/// The only fallible layer is the whole-request timeout.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::GATEWAY_TIMEOUT, "Request timed out".to_string())
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };
    metrics::record_http_response(status.as_u16());
    (status, Json(ErrorBody { error: message })).into_response()
}

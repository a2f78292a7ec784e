//! Address activity endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::activity::AggregationError;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query string of `GET /api/check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    /// Candidate address. Absent is treated as empty, hence invalid.
    #[serde(default)]
    pub address: String,
}

/// `GET /api/check?address=0x...`
pub async fn check_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CheckParams>, QueryRejection>,
) -> Response {
    // A query string that cannot be read (e.g. a repeated `address`) is a bad address.
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(
                request_id = %request_id(&headers),
                error = %rejection.body_text(),
                "Unreadable check query"
            );
            return AggregationError::InvalidAddress.into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id(&headers),
        address = %params.address,
        "Activity check requested"
    );

    match state.aggregator.get_activity(&params.address).await {
        Ok(summary) => {
            metrics::record_http_response(StatusCode::OK.as_u16());
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub rpc_configured: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rpc_configured: state.aggregator.is_configured(),
    })
}

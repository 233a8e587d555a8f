//! API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::types::{ErrorBody, LookupOutcome};

pub const NOT_FOUND_MESSAGE: &str = "Pokemon not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Look up a pokemon by name
pub async fn pokemon_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.lookup.lookup(&name).await {
        LookupOutcome::Found(details) => (StatusCode::OK, Json(details)).into_response(),
        LookupOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new(NOT_FOUND_MESSAGE)),
        )
            .into_response(),
        LookupOutcome::UpstreamFailure(reason) => {
            tracing::warn!(%name, %reason, "Responding with internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE)),
            )
                .into_response()
        }
    }
}

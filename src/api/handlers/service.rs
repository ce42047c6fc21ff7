//! Service endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::api::dto::StatusDto;
use crate::api::state::AppState;
use crate::error::ServerError;

/// POST /api/service/clear - wipe every table
pub async fn service_clear(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ServerError> {
    state.service.clear()?;
    tracing::warn!("database cleared");
    Ok(StatusCode::OK)
}

/// GET /api/service/status - row counts
pub async fn service_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusDto>, ServerError> {
    let status = state.service.status()?;
    Ok(Json(status.into()))
}

//! Forum endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};

use crate::api::dto::{ForumCreateRequest, ForumDto, ListQuery, ThreadDto};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::traits::ThreadQuery;

/// POST /api/forum/create
///
/// A slug collision answers 409 with the already existing forum.
pub async fn create_forum(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForumCreateRequest>,
) -> Result<Response, ServerError> {
    match state.forums.create_forum(&req.slug, &req.title, &req.user) {
        Ok(forum) => Ok((StatusCode::CREATED, Json(ForumDto::from(forum))).into_response()),
        Err(ServerError::ForumConflict(_)) => {
            let existing = state.forums.get_forum(&req.slug)?;
            Ok((StatusCode::CONFLICT, Json(ForumDto::from(existing))).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /api/forum/:slug/details
pub async fn get_forum(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ForumDto>, ServerError> {
    let forum = state.forums.get_forum(&slug)?;
    Ok(Json(forum.into()))
}

/// GET /api/forum/:slug/threads
pub async fn forum_threads(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<ThreadDto>>, ServerError> {
    let forum = state.forums.get_forum(&slug)?;

    let since = match &params.since {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| ServerError::InvalidArgument(format!("bad since timestamp: {}", e)))?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    let query = ThreadQuery {
        forum: forum.slug,
        desc: params.desc.unwrap_or(false),
        since,
        limit: params.limit.unwrap_or(100),
    };
    let threads = state.threads.threads_by_forum(&query)?;
    Ok(Json(threads.into_iter().map(ThreadDto::from).collect()))
}

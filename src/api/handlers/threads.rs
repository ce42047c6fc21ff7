//! Thread endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::api::dto::{PostDto, PostsQuery, ThreadCreateRequest, ThreadDto, ThreadUpdateRequest};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::traits::{NewThread, PostQuery, SlugOrId, SortMode, ThreadUpdate};

/// POST /api/forum/:slug/create
///
/// A thread-slug collision answers 409 with the already existing
/// thread.
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Path(forum): Path<String>,
    Json(req): Json<ThreadCreateRequest>,
) -> Result<Response, ServerError> {
    let input = NewThread {
        slug: req.slug.clone(),
        author: req.author,
        forum,
        title: req.title,
        message: req.message,
        created: req.created.unwrap_or_else(Utc::now),
    };

    match state.threads.create_thread(input) {
        Ok(thread) => Ok((StatusCode::CREATED, Json(ThreadDto::from(thread))).into_response()),
        Err(ServerError::ThreadConflict(_)) => {
            // The conflict can only come from a duplicate slug
            let slug = req.slug.unwrap_or_default();
            let existing = state.threads.get_thread(&SlugOrId::Slug(slug))?;
            Ok((StatusCode::CONFLICT, Json(ThreadDto::from(existing))).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /api/thread/:slug_or_id/details
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(slug_or_id): Path<String>,
) -> Result<Json<ThreadDto>, ServerError> {
    let thread = state.threads.get_thread(&SlugOrId::parse(&slug_or_id))?;
    Ok(Json(thread.into()))
}

/// POST /api/thread/:slug_or_id/details
pub async fn update_thread(
    State(state): State<Arc<AppState>>,
    Path(slug_or_id): Path<String>,
    Json(req): Json<ThreadUpdateRequest>,
) -> Result<Json<ThreadDto>, ServerError> {
    let update = ThreadUpdate {
        title: req.title,
        message: req.message,
    };
    let thread = state
        .threads
        .update_thread(&SlugOrId::parse(&slug_or_id), update)?;
    Ok(Json(thread.into()))
}

/// GET /api/thread/:slug_or_id/posts
///
/// The paginated thread read: sort in {flat, tree, parent_tree},
/// optional descending order, optional post-id cursor.
pub async fn thread_posts(
    State(state): State<Arc<AppState>>,
    Path(slug_or_id): Path<String>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<Vec<PostDto>>, ServerError> {
    let thread = state.threads.get_thread(&SlugOrId::parse(&slug_or_id))?;

    let query = PostQuery {
        thread: thread.id,
        sort: SortMode::parse(params.sort.as_deref().unwrap_or("flat")),
        desc: params.desc.unwrap_or(false),
        since: params.since,
        limit: params.limit.unwrap_or(100),
    };
    let posts = state.posts.posts_by_thread(&query)?;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

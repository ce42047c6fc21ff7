//! Post endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::api::dto::{
    ForumDto, PostCreateRequest, PostDetailsQuery, PostDto, PostFullDto, PostUpdateRequest,
    ThreadDto, UserDto,
};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::traits::{PostCreate, SlugOrId};

/// POST /api/thread/:slug_or_id/create - batch post creation
///
/// All posts land in one thread and share one creation timestamp. An
/// empty body is a successful empty creation.
pub async fn posts_create(
    State(state): State<Arc<AppState>>,
    Path(slug_or_id): Path<String>,
    Json(inputs): Json<Vec<PostCreateRequest>>,
) -> Result<(StatusCode, Json<Vec<PostDto>>), ServerError> {
    let thread = state.threads.get_thread(&SlugOrId::parse(&slug_or_id))?;

    if inputs.is_empty() {
        return Ok((StatusCode::CREATED, Json(vec![])));
    }

    let posts: Vec<PostCreate> = inputs
        .into_iter()
        .map(|p| PostCreate {
            author: p.author,
            message: p.message,
            parent: p.parent,
        })
        .collect();

    let created = state
        .posts
        .create_posts(thread.id, &thread.forum, Utc::now(), posts)?;

    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(PostDto::from).collect()),
    ))
}

/// GET /api/post/:id/details
///
/// `related=user,forum,thread` joins in the referenced entities.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<PostDetailsQuery>,
) -> Result<Json<PostFullDto>, ServerError> {
    let post = state.posts.get_post(id)?;

    let mut full = PostFullDto {
        post: post.clone().into(),
        author: None,
        thread: None,
        forum: None,
    };

    for related in params.related.as_deref().unwrap_or("").split(',') {
        match related.trim() {
            "user" => {
                full.author = Some(UserDto::from(state.users.get_user(&post.author)?));
            }
            "thread" => {
                full.thread = Some(ThreadDto::from(
                    state.threads.get_thread(&SlugOrId::Id(post.thread))?,
                ));
            }
            "forum" => {
                full.forum = Some(ForumDto::from(state.forums.get_forum(&post.forum)?));
            }
            _ => {}
        }
    }

    Ok(Json(full))
}

/// POST /api/post/:id/details - edit the message
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<PostUpdateRequest>,
) -> Result<Json<PostDto>, ServerError> {
    let message = req.message.unwrap_or_default();
    let post = state.posts.update_post(id, &message)?;
    Ok(Json(post.into()))
}

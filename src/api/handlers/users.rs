//! User endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::{ListQuery, UserCreateRequest, UserDto, UserUpdateRequest};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::traits::{User, UserQuery, UserUpdate};

/// POST /api/user/:nickname/create
///
/// A nickname or email collision answers 409 with the list of already
/// registered users that collide.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Path(nickname): Path<String>,
    Json(req): Json<UserCreateRequest>,
) -> Result<Response, ServerError> {
    let user = User {
        nickname: nickname.clone(),
        fullname: req.fullname,
        about: req.about,
        email: req.email.clone(),
    };

    match state.users.create_user(user) {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user))).into_response()),
        Err(ServerError::UserConflict(_)) => {
            let existing: Vec<UserDto> = state
                .users
                .users_conflicting(&nickname, &req.email)?
                .into_iter()
                .map(UserDto::from)
                .collect();
            Ok((StatusCode::CONFLICT, Json(existing)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /api/user/:nickname/profile
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(nickname): Path<String>,
) -> Result<Json<UserDto>, ServerError> {
    let user = state.users.get_user(&nickname)?;
    Ok(Json(user.into()))
}

/// POST /api/user/:nickname/profile
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(nickname): Path<String>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserDto>, ServerError> {
    let update = UserUpdate {
        fullname: req.fullname,
        about: req.about,
        email: req.email,
    };
    let user = state.users.update_user(&nickname, update)?;
    Ok(Json(user.into()))
}

/// GET /api/forum/:slug/users
pub async fn forum_users(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<UserDto>>, ServerError> {
    // Listing an unknown forum is a 404, not an empty page
    let forum = state.forums.get_forum(&slug)?;

    let query = UserQuery {
        forum: forum.slug,
        desc: params.desc.unwrap_or(false),
        since: params.since,
        limit: params.limit.unwrap_or(100),
    };
    let users = state.users.users_by_forum(&query)?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

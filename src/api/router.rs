//! Router setup and configuration

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::api::state::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Users
        .route("/user/:nickname/create", post(handlers::create_user))
        .route(
            "/user/:nickname/profile",
            get(handlers::get_user).post(handlers::update_user),
        )
        // Forums
        .route("/forum/create", post(handlers::create_forum))
        .route("/forum/:slug/details", get(handlers::get_forum))
        .route("/forum/:slug/create", post(handlers::create_thread))
        .route("/forum/:slug/threads", get(handlers::forum_threads))
        .route("/forum/:slug/users", get(handlers::forum_users))
        // Threads
        .route(
            "/thread/:slug_or_id/details",
            get(handlers::get_thread).post(handlers::update_thread),
        )
        .route("/thread/:slug_or_id/create", post(handlers::posts_create))
        .route("/thread/:slug_or_id/posts", get(handlers::thread_posts))
        // Posts
        .route(
            "/post/:id/details",
            get(handlers::get_post).post(handlers::update_post),
        )
        // Service
        .route("/service/clear", post(handlers::service_clear))
        .route("/service/status", get(handlers::service_status));

    Router::new().nest("/api", api).with_state(state)
}

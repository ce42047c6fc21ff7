//! Request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of POST /api/user/:nickname/create
#[derive(Debug, Deserialize)]
pub struct UserCreateRequest {
    pub fullname: String,

    #[serde(default)]
    pub about: String,

    pub email: String,
}

/// Body of POST /api/user/:nickname/profile (all fields optional)
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub fullname: Option<String>,

    #[serde(default)]
    pub about: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// Body of POST /api/forum/create
#[derive(Debug, Deserialize)]
pub struct ForumCreateRequest {
    pub slug: String,

    pub title: String,

    /// Nickname of the creating user
    pub user: String,
}

/// Body of POST /api/forum/:slug/create
#[derive(Debug, Deserialize)]
pub struct ThreadCreateRequest {
    #[serde(default)]
    pub slug: Option<String>,

    pub title: String,

    pub author: String,

    pub message: String,

    /// Defaults to the server clock when absent
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Body of POST /api/thread/:slug_or_id/details
#[derive(Debug, Default, Deserialize)]
pub struct ThreadUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// One element of the POST /api/thread/:slug_or_id/create body
#[derive(Debug, Deserialize)]
pub struct PostCreateRequest {
    pub author: String,

    pub message: String,

    /// 0 (the default) makes the post a thread root
    #[serde(default)]
    pub parent: i64,
}

/// Body of POST /api/post/:id/details
#[derive(Debug, Default, Deserialize)]
pub struct PostUpdateRequest {
    /// Absent or empty means "no change requested"
    #[serde(default)]
    pub message: Option<String>,
}

/// Query string of GET /api/thread/:slug_or_id/posts
#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    /// flat | tree | parent_tree (anything else reads as flat)
    #[serde(default)]
    pub sort: Option<String>,

    #[serde(default)]
    pub desc: Option<bool>,

    /// Resume cursor: id of the last post already seen
    #[serde(default)]
    pub since: Option<i64>,

    #[serde(default)]
    pub limit: Option<i64>,
}

/// Query string of the forum listing endpoints (threads, users)
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub desc: Option<bool>,

    /// Cursor: nickname for users, RFC 3339 timestamp for threads
    #[serde(default)]
    pub since: Option<String>,

    #[serde(default)]
    pub limit: Option<i64>,
}

/// Query string of GET /api/post/:id/details
#[derive(Debug, Default, Deserialize)]
pub struct PostDetailsQuery {
    /// Comma-separated subset of: user, forum, thread
    #[serde(default)]
    pub related: Option<String>,
}

//! Response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::traits::{Forum, Post, ServiceStatus, Thread, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub nickname: String,
    pub fullname: String,
    pub about: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            nickname: u.nickname,
            fullname: u.fullname,
            about: u.about,
            email: u.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForumDto {
    pub slug: String,
    pub title: String,
    /// Nickname of the creating user
    pub user: String,
    pub threads: i64,
    pub posts: i64,
}

impl From<Forum> for ForumDto {
    fn from(f: Forum) -> Self {
        Self {
            slug: f.slug,
            title: f.title,
            user: f.owner,
            threads: f.threads,
            posts: f.posts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadDto {
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    pub author: String,
    pub forum: String,
    pub title: String,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl From<Thread> for ThreadDto {
    fn from(t: Thread) -> Self {
        Self {
            id: t.id,
            slug: t.slug,
            author: t.author,
            forum: t.forum,
            title: t.title,
            message: t.message,
            created: t.created,
        }
    }
}

/// A post as served to clients. The materialized path is an internal
/// ordering key and is not exposed.
#[derive(Debug, Clone, Serialize)]
pub struct PostDto {
    pub id: i64,
    pub parent: i64,
    pub author: String,
    pub message: String,

    #[serde(rename = "isEdited")]
    pub is_edited: bool,

    pub forum: String,
    pub thread: i64,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            parent: p.parent,
            author: p.author,
            message: p.message,
            is_edited: p.is_edited,
            forum: p.forum,
            thread: p.thread,
            created: p.created,
        }
    }
}

/// GET /api/post/:id/details with `related` expansions
#[derive(Debug, Clone, Serialize)]
pub struct PostFullDto {
    pub post: PostDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserDto>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<ThreadDto>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<ForumDto>,
}

/// GET /api/service/status
#[derive(Debug, Clone, Serialize)]
pub struct StatusDto {
    pub user: i64,
    pub forum: i64,
    pub thread: i64,
    pub post: i64,
}

impl From<ServiceStatus> for StatusDto {
    fn from(s: ServiceStatus) -> Self {
        Self {
            user: s.users,
            forum: s.forums,
            thread: s.threads,
            post: s.posts,
        }
    }
}

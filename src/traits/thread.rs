//! Thread store trait and thread types

use chrono::{DateTime, Utc};

use crate::error::ServerResult;

/// A discussion thread
#[derive(Debug, Clone)]
pub struct Thread {
    pub id: i64,
    /// Optional unique human-readable slug (case-insensitive)
    pub slug: Option<String>,
    pub author: String,
    pub forum: String,
    pub title: String,
    pub message: String,
    pub created: DateTime<Utc>,
}

/// Input for thread creation
#[derive(Debug, Clone)]
pub struct NewThread {
    pub slug: Option<String>,
    pub author: String,
    pub forum: String,
    pub title: String,
    pub message: String,
    pub created: DateTime<Utc>,
}

/// Partial thread update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ThreadUpdate {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// A thread reference as it appears in request paths: either a numeric
/// id or a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugOrId {
    Id(i64),
    Slug(String),
}

impl SlugOrId {
    pub fn parse(s: &str) -> SlugOrId {
        match s.parse::<i64>() {
            Ok(id) => SlugOrId::Id(id),
            Err(_) => SlugOrId::Slug(s.to_string()),
        }
    }
}

impl std::fmt::Display for SlugOrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlugOrId::Id(id) => write!(f, "{}", id),
            SlugOrId::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

/// Parameters of a per-forum thread listing
#[derive(Debug, Clone)]
pub struct ThreadQuery {
    pub forum: String,
    pub desc: bool,
    /// Resume cursor: creation time boundary (inclusive)
    pub since: Option<DateTime<Utc>>,
    pub limit: i64,
}

pub trait ThreadStore: Send + Sync + 'static {
    /// Open a thread; author and forum must exist, the slug (if any)
    /// must be free. Bumps the forum thread counter.
    fn create_thread(&self, input: NewThread) -> ServerResult<Thread>;

    /// Resolve a thread by slug or id
    fn get_thread(&self, thread: &SlugOrId) -> ServerResult<Thread>;

    /// Partially update title/message
    fn update_thread(&self, thread: &SlugOrId, update: ThreadUpdate) -> ServerResult<Thread>;

    /// Threads of a forum ordered by creation time
    fn threads_by_forum(&self, query: &ThreadQuery) -> ServerResult<Vec<Thread>>;
}

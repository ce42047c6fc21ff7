// File: src/storage/sqlite/store.rs

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::DateTime;
use rusqlite::Connection;

use super::config::SqliteConfig;
use super::schema;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::traits::{
    Forum, ForumStore, NewPost, NewThread, Post, PostCreate, PostQuery, PostStore, ServiceStatus,
    ServiceStore, SlugOrId, Thread, ThreadQuery, ThreadStore, ThreadUpdate, User, UserQuery,
    UserStore, UserUpdate,
};

/// SQLite implementation of the forum stores.
///
/// All access is serialized through one connection behind a mutex;
/// every mutation runs inside a transaction on that connection.
pub struct SqliteStore {
    /// Database connection (protected by mutex for thread safety)
    conn: Arc<Mutex<Connection>>,

    #[allow(dead_code)]
    config: SqliteConfig,
}

impl SqliteStore {
    /// Create a new SqliteStore with default configuration
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> ServerResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> ServerResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            ServerError::Storage(StorageError::ConnectionFailed(format!(
                "failed to open db: {}",
                e
            )))
        })?;

        Self::configure_connection(&conn, &config)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> ServerResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> ServerResult<()> {
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Create the schema (idempotent). Must be called once before use.
    pub fn initialize(&self) -> ServerResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)
    }

    /// Run schema migrations
    pub fn migrate(&self) -> ServerResult<()> {
        let conn = self.get_conn()?;
        schema::migrate(&conn)
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> ServerResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ServerError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
        })
    }
}

// Store trait implementations; the *_impl methods live in the sibling
// modules (posts, queries, users, forums, threads).

impl PostStore for SqliteStore {
    fn create_posts(
        &self,
        thread: i64,
        forum: &str,
        created: DateTime<chrono::Utc>,
        posts: Vec<PostCreate>,
    ) -> ServerResult<Vec<Post>> {
        self.create_posts_impl(thread, forum, created, posts)
    }

    fn create_post(&self, input: NewPost) -> ServerResult<Post> {
        self.create_post_impl(input)
    }

    fn get_post(&self, id: i64) -> ServerResult<Post> {
        self.get_post_impl(id)
    }

    fn update_post(&self, id: i64, message: &str) -> ServerResult<Post> {
        self.update_post_impl(id, message)
    }

    fn posts_by_thread(&self, query: &PostQuery) -> ServerResult<Vec<Post>> {
        self.posts_by_thread_impl(query)
    }

    fn post_thread(&self, post: i64) -> ServerResult<i64> {
        self.post_thread_impl(post)
    }
}

impl UserStore for SqliteStore {
    fn create_user(&self, user: User) -> ServerResult<User> {
        self.create_user_impl(user)
    }

    fn get_user(&self, nickname: &str) -> ServerResult<User> {
        self.get_user_impl(nickname)
    }

    fn update_user(&self, nickname: &str, update: UserUpdate) -> ServerResult<User> {
        self.update_user_impl(nickname, update)
    }

    fn users_conflicting(&self, nickname: &str, email: &str) -> ServerResult<Vec<User>> {
        self.users_conflicting_impl(nickname, email)
    }

    fn users_by_forum(&self, query: &UserQuery) -> ServerResult<Vec<User>> {
        self.users_by_forum_impl(query)
    }
}

impl ForumStore for SqliteStore {
    fn create_forum(&self, slug: &str, title: &str, owner: &str) -> ServerResult<Forum> {
        self.create_forum_impl(slug, title, owner)
    }

    fn get_forum(&self, slug: &str) -> ServerResult<Forum> {
        self.get_forum_impl(slug)
    }
}

impl ThreadStore for SqliteStore {
    fn create_thread(&self, input: NewThread) -> ServerResult<Thread> {
        self.create_thread_impl(input)
    }

    fn get_thread(&self, thread: &SlugOrId) -> ServerResult<Thread> {
        self.get_thread_impl(thread)
    }

    fn update_thread(&self, thread: &SlugOrId, update: ThreadUpdate) -> ServerResult<Thread> {
        self.update_thread_impl(thread, update)
    }

    fn threads_by_forum(&self, query: &ThreadQuery) -> ServerResult<Vec<Thread>> {
        self.threads_by_forum_impl(query)
    }
}

impl ServiceStore for SqliteStore {
    fn clear(&self) -> ServerResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM posts", [])?;
        tx.execute("DELETE FROM threads", [])?;
        tx.execute("DELETE FROM forum_users", [])?;
        tx.execute("DELETE FROM forums", [])?;
        tx.execute("DELETE FROM users", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'threads'", [])?;
        tx.commit()?;
        Ok(())
    }

    fn status(&self) -> ServerResult<ServiceStatus> {
        let conn = self.get_conn()?;
        let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
        let forums: i64 = conn.query_row("SELECT COUNT(*) FROM forums", [], |r| r.get(0))?;
        let threads: i64 = conn.query_row("SELECT COUNT(*) FROM threads", [], |r| r.get(0))?;
        let posts: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))?;

        Ok(ServiceStatus {
            users,
            forums,
            threads,
            posts,
        })
    }
}

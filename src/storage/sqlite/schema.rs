// File: src/storage/sqlite/schema.rs

use crate::error::ServerResult;
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables (idempotent)
pub fn create_tables(conn: &Connection) -> ServerResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Run migrations from current version to latest
pub fn migrate(conn: &Connection) -> ServerResult<()> {
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(value, '0') FROM forum_config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .unwrap_or(0);

    if current == 0 {
        create_tables(conn)?;
    }

    // Update schema version
    let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    conn.execute(
        "INSERT OR REPLACE INTO forum_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        rusqlite::params![SCHEMA_VERSION.to_string(), now],
    )?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Core configuration
CREATE TABLE IF NOT EXISTS forum_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    nickname TEXT PRIMARY KEY COLLATE NOCASE,
    fullname TEXT NOT NULL,
    about    TEXT NOT NULL DEFAULT '',
    email    TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE TABLE IF NOT EXISTS forums (
    slug    TEXT PRIMARY KEY COLLATE NOCASE,
    title   TEXT NOT NULL,
    owner   TEXT NOT NULL REFERENCES users(nickname),
    threads INTEGER NOT NULL DEFAULT 0,        -- denormalized counter
    posts   INTEGER NOT NULL DEFAULT 0         -- denormalized counter
);

-- Membership pairs backing the per-forum user listing
CREATE TABLE IF NOT EXISTS forum_users (
    forum    TEXT NOT NULL REFERENCES forums(slug),
    nickname TEXT NOT NULL REFERENCES users(nickname),
    PRIMARY KEY (forum, nickname)
);

CREATE TABLE IF NOT EXISTS threads (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    slug    TEXT UNIQUE COLLATE NOCASE,        -- optional
    author  TEXT NOT NULL REFERENCES users(nickname),
    forum   TEXT NOT NULL REFERENCES forums(slug),
    title   TEXT NOT NULL,
    message TEXT NOT NULL,
    created INTEGER NOT NULL                   -- Unix nanoseconds
);

-- Posts: ids are allocated by the store, strictly increasing, never
-- reused. `path` is the materialized ancestor chain encoded as a
-- byte-comparable key; `root_id` duplicates path[0] for subtree
-- grouping in parent_tree reads.
CREATE TABLE IF NOT EXISTS posts (
    id        INTEGER PRIMARY KEY,
    parent    INTEGER NOT NULL DEFAULT 0,
    author    TEXT NOT NULL REFERENCES users(nickname),
    message   TEXT NOT NULL,
    is_edited INTEGER NOT NULL DEFAULT 0,
    forum     TEXT NOT NULL REFERENCES forums(slug),
    thread    INTEGER NOT NULL REFERENCES threads(id),
    created   INTEGER NOT NULL,                -- Unix nanoseconds
    path      BLOB NOT NULL,
    root_id   INTEGER NOT NULL
);

-- Indices for the fixed query shapes
CREATE INDEX IF NOT EXISTS idx_posts_thread_created_id ON posts(thread, created, id);
CREATE INDEX IF NOT EXISTS idx_posts_thread_path ON posts(thread, path);
CREATE INDEX IF NOT EXISTS idx_posts_thread_root ON posts(thread, root_id);
CREATE INDEX IF NOT EXISTS idx_posts_thread_roots_path ON posts(thread, path) WHERE parent = 0;
CREATE INDEX IF NOT EXISTS idx_threads_forum_created ON threads(forum, created);
"#;

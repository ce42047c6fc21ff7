// File: src/storage/sqlite/threads.rs

use rusqlite::{params, OptionalExtension};

use super::convert::row_to_thread;
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult};
use crate::traits::{NewThread, SlugOrId, Thread, ThreadQuery, ThreadUpdate};

const SELECT_THREAD_BY_ID: &str = "
    SELECT id, slug, author, forum, title, message, created FROM threads WHERE id = ?1
";

const SELECT_THREAD_BY_SLUG: &str = "
    SELECT id, slug, author, forum, title, message, created FROM threads WHERE slug = ?1
";

// Per-forum thread listing with the creation time as (inclusive) cursor
const SELECT_FORUM_THREADS: &str = "
    SELECT id, slug, author, forum, title, message, created
    FROM threads
    WHERE forum = ?1
    ORDER BY created
    LIMIT ?2
";

const SELECT_FORUM_THREADS_DESC: &str = "
    SELECT id, slug, author, forum, title, message, created
    FROM threads
    WHERE forum = ?1
    ORDER BY created DESC
    LIMIT ?2
";

const SELECT_FORUM_THREADS_SINCE: &str = "
    SELECT id, slug, author, forum, title, message, created
    FROM threads
    WHERE forum = ?1 AND created >= ?2
    ORDER BY created
    LIMIT ?3
";

const SELECT_FORUM_THREADS_SINCE_DESC: &str = "
    SELECT id, slug, author, forum, title, message, created
    FROM threads
    WHERE forum = ?1 AND created <= ?2
    ORDER BY created DESC
    LIMIT ?3
";

impl SqliteStore {
    pub(crate) fn create_thread_impl(&self, input: NewThread) -> ServerResult<Thread> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        // Resolve canonical forum slug and author nickname up front so
        // the stored row and the response carry the canonical casing
        let forum: String = tx
            .query_row(
                "SELECT slug FROM forums WHERE slug = ?1",
                params![input.forum],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| ServerError::ForumNotFound(input.forum.clone()))?;

        let author: String = tx
            .query_row(
                "SELECT nickname FROM users WHERE nickname = ?1",
                params![input.author],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| ServerError::UserNotFound(input.author.clone()))?;

        let created_nanos = input.created.timestamp_nanos_opt().unwrap_or(0);
        tx.execute(
            "INSERT INTO threads (slug, author, forum, title, message, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.slug,
                author,
                forum,
                input.title,
                input.message,
                created_nanos
            ],
        )
        .map_err(|e| map_thread_insert_err(e, input.slug.as_deref()))?;
        let id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE forums SET threads = threads + 1 WHERE slug = ?1",
            params![forum],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO forum_users (forum, nickname) VALUES (?1, ?2)",
            params![forum, author],
        )?;

        tx.commit()?;

        Ok(Thread {
            id,
            slug: input.slug,
            author,
            forum,
            title: input.title,
            message: input.message,
            created: input.created,
        })
    }

    pub(crate) fn get_thread_impl(&self, thread: &SlugOrId) -> ServerResult<Thread> {
        let conn = self.get_conn()?;
        let row = match thread {
            SlugOrId::Id(id) => conn
                .query_row(SELECT_THREAD_BY_ID, params![id], row_to_thread)
                .optional()?,
            SlugOrId::Slug(slug) => conn
                .query_row(SELECT_THREAD_BY_SLUG, params![slug], row_to_thread)
                .optional()?,
        };
        row.ok_or_else(|| ServerError::ThreadNotFound(thread.to_string()))
    }

    pub(crate) fn update_thread_impl(
        &self,
        thread: &SlugOrId,
        update: ThreadUpdate,
    ) -> ServerResult<Thread> {
        let existing = self.get_thread_impl(thread)?;

        let conn = self.get_conn()?;
        conn.execute(
            "UPDATE threads SET
                title   = COALESCE(?2, title),
                message = COALESCE(?3, message)
             WHERE id = ?1",
            params![existing.id, update.title, update.message],
        )?;

        // Release the connection before re-reading; the lock is not
        // reentrant
        drop(conn);
        self.get_thread_impl(&SlugOrId::Id(existing.id))
    }

    pub(crate) fn threads_by_forum_impl(&self, query: &ThreadQuery) -> ServerResult<Vec<Thread>> {
        let conn = self.get_conn()?;
        let sql = match (query.desc, query.since.is_some()) {
            (false, false) => SELECT_FORUM_THREADS,
            (true, false) => SELECT_FORUM_THREADS_DESC,
            (false, true) => SELECT_FORUM_THREADS_SINCE,
            (true, true) => SELECT_FORUM_THREADS_SINCE_DESC,
        };
        let mut stmt = conn.prepare_cached(sql)?;

        let rows = match query.since {
            Some(since) => {
                let since_nanos = since.timestamp_nanos_opt().unwrap_or(0);
                stmt.query_map(params![query.forum, since_nanos, query.limit], row_to_thread)?
            }
            None => stmt.query_map(params![query.forum, query.limit], row_to_thread)?,
        };

        let threads = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(threads)
    }
}

fn map_thread_insert_err(err: rusqlite::Error, slug: Option<&str>) -> ServerError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return ServerError::ThreadConflict(slug.unwrap_or("<no slug>").to_string());
            }
            _ => {}
        }
    }
    err.into()
}

// File: src/storage/sqlite/posts.rs

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Transaction};

use super::convert::row_to_post;
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult};
use crate::traits::{NewPost, Post, PostCreate, PostPath};

const INSERT_POST: &str = "
    INSERT INTO posts (id, parent, author, message, is_edited, forum, thread, created, path, root_id)
    VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7, ?8, ?9)
";

const SELECT_POST_BY_ID: &str = "
    SELECT id, parent, author, message, is_edited, forum, thread, created, path
    FROM posts WHERE id = ?1
";

impl SqliteStore {
    /// Insert a single post within its own transaction
    pub(crate) fn create_post_impl(&self, input: NewPost) -> ServerResult<Post> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let id = next_post_id(&tx)?;
        let path = match input.parent {
            0 => PostPath::root(id),
            parent => parent_path(&tx, parent, input.thread)?
                .ok_or(ServerError::PostNotFound(parent))?
                .child(id),
        };

        let created_nanos = input.created.timestamp_nanos_opt().unwrap_or(0);
        tx.execute(
            INSERT_POST,
            params![
                id,
                input.parent,
                input.author,
                input.message,
                input.forum,
                input.thread,
                created_nanos,
                path,
                path.root_id(),
            ],
        )
        .map_err(|e| map_post_insert_err(e, &input.author))?;

        bump_forum_counters(&tx, &input.forum, 1)?;
        record_membership(&tx, &input.forum, &input.author)?;

        tx.commit()?;

        Ok(Post {
            id,
            parent: input.parent,
            author: input.author,
            message: input.message,
            is_edited: false,
            forum: input.forum,
            thread: input.thread,
            created: input.created,
            path,
        })
    }

    /// Atomically insert a batch of posts into one thread.
    ///
    /// Rows go in input order, so a row may reference a parent created
    /// earlier in the same batch; the parent lookup sees it inside the
    /// shared transaction. Any referential failure rolls the whole
    /// batch back.
    pub(crate) fn create_posts_impl(
        &self,
        thread: i64,
        forum: &str,
        created: DateTime<Utc>,
        posts: Vec<PostCreate>,
    ) -> ServerResult<Vec<Post>> {
        if posts.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let created_nanos = created.timestamp_nanos_opt().unwrap_or(0);
        let batch_size = posts.len() as i64;
        let mut next_id = next_post_id(&tx)?;
        let mut inserted = 0usize;
        let mut results = Vec::with_capacity(posts.len());

        {
            let mut insert = tx.prepare(INSERT_POST)?;
            for input in posts {
                let id = next_id;
                next_id += 1;

                let path = match input.parent {
                    0 => PostPath::root(id),
                    parent => parent_path(&tx, parent, thread)?
                        .ok_or(ServerError::ParentConflict(parent))?
                        .child(id),
                };

                inserted += insert
                    .execute(params![
                        id,
                        input.parent,
                        input.author,
                        input.message,
                        forum,
                        thread,
                        created_nanos,
                        path,
                        path.root_id(),
                    ])
                    .map_err(|e| map_post_insert_err(e, &input.author))?;

                record_membership(&tx, forum, &input.author)?;

                results.push(Post {
                    id,
                    parent: input.parent,
                    author: input.author,
                    message: input.message,
                    is_edited: false,
                    forum: forum.to_string(),
                    thread,
                    created,
                    path,
                });
            }
        }

        if inserted == 0 {
            return Err(ServerError::PostConflict(
                "batch insert persisted no rows".into(),
            ));
        }

        bump_forum_counters(&tx, forum, batch_size)?;
        tx.commit()?;

        Ok(results)
    }

    pub(crate) fn get_post_impl(&self, id: i64) -> ServerResult<Post> {
        let conn = self.get_conn()?;
        conn.query_row(SELECT_POST_BY_ID, params![id], row_to_post)
            .optional()?
            .ok_or(ServerError::PostNotFound(id))
    }

    /// Edit a post's message.
    ///
    /// An empty new message means "no change requested"; an identical
    /// message performs no write and leaves `is_edited` untouched.
    pub(crate) fn update_post_impl(&self, id: i64, message: &str) -> ServerResult<Post> {
        let conn = self.get_conn()?;
        let post = conn
            .query_row(SELECT_POST_BY_ID, params![id], row_to_post)
            .optional()?
            .ok_or(ServerError::PostNotFound(id))?;

        if message.is_empty() || message == post.message {
            return Ok(post);
        }

        conn.execute(
            "UPDATE posts SET message = ?1, is_edited = 1 WHERE id = ?2",
            params![message, id],
        )?;

        Ok(Post {
            message: message.to_string(),
            is_edited: true,
            ..post
        })
    }

    /// Thread owning the given post; missing posts are a conflict, as
    /// this backs parent pre-validation
    pub(crate) fn post_thread_impl(&self, post: i64) -> ServerResult<i64> {
        let conn = self.get_conn()?;
        conn.query_row(
            "SELECT thread FROM posts WHERE id = ?1",
            params![post],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(ServerError::ParentConflict(post))
    }
}

/// Allocate the next post id. Serialized by the connection mutex and
/// the surrounding transaction; posts are never deleted, so ids never
/// repeat.
fn next_post_id(tx: &Transaction<'_>) -> ServerResult<i64> {
    let id = tx.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM posts", [], |row| {
        row.get(0)
    })?;
    Ok(id)
}

/// Fetch the parent's path for path assignment.
///
/// `Ok(None)` means the parent does not exist; a parent in a different
/// thread is rejected outright.
fn parent_path(
    tx: &Transaction<'_>,
    parent: i64,
    thread: i64,
) -> ServerResult<Option<PostPath>> {
    let row: Option<(PostPath, i64)> = tx
        .query_row(
            "SELECT path, thread FROM posts WHERE id = ?1",
            params![parent],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((_, t)) if t != thread => Err(ServerError::ParentConflict(parent)),
        Some((path, _)) => Ok(Some(path)),
    }
}

fn bump_forum_counters(tx: &Transaction<'_>, forum: &str, posts: i64) -> ServerResult<()> {
    tx.execute(
        "UPDATE forums SET posts = posts + ?2 WHERE slug = ?1",
        params![forum, posts],
    )?;
    Ok(())
}

fn record_membership(tx: &Transaction<'_>, forum: &str, nickname: &str) -> ServerResult<()> {
    tx.execute(
        "INSERT OR IGNORE INTO forum_users (forum, nickname) VALUES (?1, ?2)",
        params![forum, nickname],
    )?;
    Ok(())
}

/// Map an INSERT failure onto the public error taxonomy: uniqueness
/// violations are conflicts, referential violations mean a referenced
/// row (in practice the author; forum and thread are resolved before
/// the insert) does not exist.
fn map_post_insert_err(err: rusqlite::Error, author: &str) -> ServerError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return ServerError::PostConflict("duplicate post id".into());
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL => {
                return ServerError::UserNotFound(author.to_string());
            }
            _ => {}
        }
    }
    err.into()
}

// File: src/storage/sqlite/forums.rs

use rusqlite::{params, OptionalExtension};

use super::convert::row_to_forum;
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult};
use crate::traits::Forum;

const SELECT_FORUM: &str = "
    SELECT slug, title, owner, threads, posts FROM forums WHERE slug = ?1
";

impl SqliteStore {
    pub(crate) fn create_forum_impl(
        &self,
        slug: &str,
        title: &str,
        owner: &str,
    ) -> ServerResult<Forum> {
        let conn = self.get_conn()?;

        // Resolve the owner's canonical (case-preserving) nickname
        let owner: String = conn
            .query_row(
                "SELECT nickname FROM users WHERE nickname = ?1",
                params![owner],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| ServerError::UserNotFound(owner.to_string()))?;

        conn.execute(
            "INSERT INTO forums (slug, title, owner) VALUES (?1, ?2, ?3)",
            params![slug, title, owner],
        )
        .map_err(|e| map_forum_insert_err(e, slug))?;

        Ok(Forum {
            slug: slug.to_string(),
            title: title.to_string(),
            owner,
            threads: 0,
            posts: 0,
        })
    }

    pub(crate) fn get_forum_impl(&self, slug: &str) -> ServerResult<Forum> {
        let conn = self.get_conn()?;
        conn.query_row(SELECT_FORUM, params![slug], row_to_forum)
            .optional()?
            .ok_or_else(|| ServerError::ForumNotFound(slug.to_string()))
    }
}

fn map_forum_insert_err(err: rusqlite::Error, slug: &str) -> ServerError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return ServerError::ForumConflict(slug.to_string());
            }
            _ => {}
        }
    }
    err.into()
}

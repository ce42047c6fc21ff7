// File: src/storage/sqlite/users.rs

use rusqlite::{params, OptionalExtension};

use super::convert::row_to_user;
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult};
use crate::traits::{User, UserQuery, UserUpdate};

const SELECT_USER: &str = "
    SELECT nickname, fullname, about, email FROM users WHERE nickname = ?1
";

// Per-forum user listing: the same four (since x direction) shapes the
// post planner uses, with the nickname as cursor.
const SELECT_FORUM_USERS: &str = "
    SELECT u.nickname, u.fullname, u.about, u.email
    FROM forum_users fu JOIN users u ON fu.nickname = u.nickname
    WHERE fu.forum = ?1
    ORDER BY u.nickname
    LIMIT ?2
";

const SELECT_FORUM_USERS_DESC: &str = "
    SELECT u.nickname, u.fullname, u.about, u.email
    FROM forum_users fu JOIN users u ON fu.nickname = u.nickname
    WHERE fu.forum = ?1
    ORDER BY u.nickname DESC
    LIMIT ?2
";

const SELECT_FORUM_USERS_SINCE: &str = "
    SELECT u.nickname, u.fullname, u.about, u.email
    FROM forum_users fu JOIN users u ON fu.nickname = u.nickname
    WHERE fu.forum = ?1 AND u.nickname > ?2
    ORDER BY u.nickname
    LIMIT ?3
";

const SELECT_FORUM_USERS_SINCE_DESC: &str = "
    SELECT u.nickname, u.fullname, u.about, u.email
    FROM forum_users fu JOIN users u ON fu.nickname = u.nickname
    WHERE fu.forum = ?1 AND u.nickname < ?2
    ORDER BY u.nickname DESC
    LIMIT ?3
";

impl SqliteStore {
    pub(crate) fn create_user_impl(&self, user: User) -> ServerResult<User> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO users (nickname, fullname, about, email) VALUES (?1, ?2, ?3, ?4)",
            params![user.nickname, user.fullname, user.about, user.email],
        )
        .map_err(|e| map_user_insert_err(e, &user.nickname))?;

        Ok(user)
    }

    pub(crate) fn get_user_impl(&self, nickname: &str) -> ServerResult<User> {
        let conn = self.get_conn()?;
        conn.query_row(SELECT_USER, params![nickname], row_to_user)
            .optional()?
            .ok_or_else(|| ServerError::UserNotFound(nickname.to_string()))
    }

    pub(crate) fn update_user_impl(
        &self,
        nickname: &str,
        update: UserUpdate,
    ) -> ServerResult<User> {
        let conn = self.get_conn()?;

        let existing = conn
            .query_row(SELECT_USER, params![nickname], row_to_user)
            .optional()?
            .ok_or_else(|| ServerError::UserNotFound(nickname.to_string()))?;

        conn.execute(
            "UPDATE users SET
                fullname = COALESCE(?2, fullname),
                about    = COALESCE(?3, about),
                email    = COALESCE(?4, email)
             WHERE nickname = ?1",
            params![existing.nickname, update.fullname, update.about, update.email],
        )
        .map_err(|e| map_user_insert_err(e, nickname))?;

        // Release the connection before re-reading; the lock is not
        // reentrant
        drop(conn);
        self.get_user_impl(nickname)
    }

    pub(crate) fn users_conflicting_impl(
        &self,
        nickname: &str,
        email: &str,
    ) -> ServerResult<Vec<User>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT nickname, fullname, about, email FROM users
             WHERE nickname = ?1 OR email = ?2
             ORDER BY nickname",
        )?;
        let rows = stmt.query_map(params![nickname, email], row_to_user)?;
        let users = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    pub(crate) fn users_by_forum_impl(&self, query: &UserQuery) -> ServerResult<Vec<User>> {
        let conn = self.get_conn()?;
        let sql = match (query.desc, query.since.is_some()) {
            (false, false) => SELECT_FORUM_USERS,
            (true, false) => SELECT_FORUM_USERS_DESC,
            (false, true) => SELECT_FORUM_USERS_SINCE,
            (true, true) => SELECT_FORUM_USERS_SINCE_DESC,
        };
        let mut stmt = conn.prepare_cached(sql)?;

        let rows = match &query.since {
            Some(since) => stmt.query_map(params![query.forum, since, query.limit], row_to_user)?,
            None => stmt.query_map(params![query.forum, query.limit], row_to_user)?,
        };

        let users = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }
}

fn map_user_insert_err(err: rusqlite::Error, nickname: &str) -> ServerError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return ServerError::UserConflict(nickname.to_string());
            }
            _ => {}
        }
    }
    err.into()
}

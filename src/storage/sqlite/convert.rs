// File: src/storage/sqlite/convert.rs

use chrono::DateTime;
use rusqlite::Row;

use crate::traits::{Forum, Post, Thread, User};

/// Column order shared by every post SELECT:
/// id, parent, author, message, is_edited, forum, thread, created, path
pub fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        parent: row.get(1)?,
        author: row.get(2)?,
        message: row.get(3)?,
        is_edited: row.get(4)?,
        forum: row.get(5)?,
        thread: row.get(6)?,
        created: DateTime::from_timestamp_nanos(row.get(7)?),
        path: row.get(8)?,
    })
}

/// Column order: nickname, fullname, about, email
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        nickname: row.get(0)?,
        fullname: row.get(1)?,
        about: row.get(2)?,
        email: row.get(3)?,
    })
}

/// Column order: slug, title, owner, threads, posts
pub fn row_to_forum(row: &Row) -> rusqlite::Result<Forum> {
    Ok(Forum {
        slug: row.get(0)?,
        title: row.get(1)?,
        owner: row.get(2)?,
        threads: row.get(3)?,
        posts: row.get(4)?,
    })
}

/// Column order: id, slug, author, forum, title, message, created
pub fn row_to_thread(row: &Row) -> rusqlite::Result<Thread> {
    Ok(Thread {
        id: row.get(0)?,
        slug: row.get(1)?,
        author: row.get(2)?,
        forum: row.get(3)?,
        title: row.get(4)?,
        message: row.get(5)?,
        created: DateTime::from_timestamp_nanos(row.get(6)?),
    })
}

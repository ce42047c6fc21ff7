// File: src/storage/sqlite/queries.rs

//! The pagination planner: twelve pre-declared query shapes keyed on
//! (sort mode, direction, cursor presence). No query text is ever
//! built at runtime; the planner only picks a constant and binds
//! parameters.

use rusqlite::params;

use super::convert::row_to_post;
use super::store::SqliteStore;
use crate::error::ServerResult;
use crate::traits::{Post, PostQuery, SortMode};

// ========== flat: chronological ==========

const SELECT_FLAT: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1
    ORDER BY p.created, p.id
    LIMIT ?2
";

const SELECT_FLAT_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1
    ORDER BY p.created DESC, p.id DESC
    LIMIT ?2
";

// Cursor compares id, not created: many posts share a timestamp after
// a batch insert, and id gives a stable resume point.
const SELECT_FLAT_SINCE: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.id > ?2
    ORDER BY p.created, p.id
    LIMIT ?3
";

const SELECT_FLAT_SINCE_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.id < ?2
    ORDER BY p.created DESC, p.id DESC
    LIMIT ?3
";

// ========== tree: depth-first over the whole thread ==========

const SELECT_TREE: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1
    ORDER BY p.path
    LIMIT ?2
";

const SELECT_TREE_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1
    ORDER BY p.path DESC
    LIMIT ?2
";

// A cursor pointing at no row makes the subselect NULL, the comparison
// NULL, and the page empty.
const SELECT_TREE_SINCE: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.path > (SELECT p2.path FROM posts p2 WHERE p2.id = ?2)
    ORDER BY p.path
    LIMIT ?3
";

const SELECT_TREE_SINCE_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.path < (SELECT p2.path FROM posts p2 WHERE p2.id = ?2)
    ORDER BY p.path DESC
    LIMIT ?3
";

// ========== parent_tree: whole root subtrees together ==========
// The inner select bounds the number of ROOT posts; the outer select
// returns every post under those roots. LIMIT therefore counts
// subtrees, not posts.

const SELECT_PARENT_TREE: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.root_id IN (
        SELECT p2.id
        FROM posts p2
        WHERE p2.thread = ?2 AND p2.parent = 0
        ORDER BY p2.path
        LIMIT ?3
    )
    ORDER BY p.path
";

const SELECT_PARENT_TREE_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.root_id IN (
        SELECT p2.id
        FROM posts p2
        WHERE p2.thread = ?2 AND p2.parent = 0
        ORDER BY p2.path DESC
        LIMIT ?3
    )
    ORDER BY p.root_id DESC, p.path
";

const SELECT_PARENT_TREE_SINCE: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.root_id IN (
        SELECT p2.id
        FROM posts p2
        WHERE p2.thread = ?2 AND p2.parent = 0
          AND p2.root_id > (SELECT p3.root_id FROM posts p3 WHERE p3.id = ?3)
        ORDER BY p2.path
        LIMIT ?4
    )
    ORDER BY p.path
";

const SELECT_PARENT_TREE_SINCE_DESC: &str = "
    SELECT p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path
    FROM posts p
    WHERE p.thread = ?1 AND p.root_id IN (
        SELECT p2.id
        FROM posts p2
        WHERE p2.thread = ?2 AND p2.parent = 0
          AND p2.root_id < (SELECT p3.root_id FROM posts p3 WHERE p3.id = ?3)
        ORDER BY p2.path DESC
        LIMIT ?4
    )
    ORDER BY p.root_id DESC, p.path
";

/// Pick the query shape for (mode, direction, cursor-present)
fn plan(sort: SortMode, desc: bool, since: bool) -> &'static str {
    match (sort, desc, since) {
        (SortMode::Flat, false, false) => SELECT_FLAT,
        (SortMode::Flat, true, false) => SELECT_FLAT_DESC,
        (SortMode::Flat, false, true) => SELECT_FLAT_SINCE,
        (SortMode::Flat, true, true) => SELECT_FLAT_SINCE_DESC,
        (SortMode::Tree, false, false) => SELECT_TREE,
        (SortMode::Tree, true, false) => SELECT_TREE_DESC,
        (SortMode::Tree, false, true) => SELECT_TREE_SINCE,
        (SortMode::Tree, true, true) => SELECT_TREE_SINCE_DESC,
        (SortMode::ParentTree, false, false) => SELECT_PARENT_TREE,
        (SortMode::ParentTree, true, false) => SELECT_PARENT_TREE_DESC,
        (SortMode::ParentTree, false, true) => SELECT_PARENT_TREE_SINCE,
        (SortMode::ParentTree, true, true) => SELECT_PARENT_TREE_SINCE_DESC,
    }
}

impl SqliteStore {
    /// Execute the paginated thread read for the given parameters.
    ///
    /// An empty thread or a cursor past the end of the ordering yields
    /// an empty page, never an error.
    pub(crate) fn posts_by_thread_impl(&self, query: &PostQuery) -> ServerResult<Vec<Post>> {
        let conn = self.get_conn()?;
        let sql = plan(query.sort, query.desc, query.since.is_some());
        let mut stmt = conn.prepare_cached(sql)?;

        let rows = match (query.sort, query.since) {
            (SortMode::ParentTree, Some(since)) => stmt.query_map(
                params![query.thread, query.thread, since, query.limit],
                row_to_post,
            )?,
            (SortMode::ParentTree, None) => stmt.query_map(
                params![query.thread, query.thread, query.limit],
                row_to_post,
            )?,
            (_, Some(since)) => {
                stmt.query_map(params![query.thread, since, query.limit], row_to_post)?
            }
            (_, None) => stmt.query_map(params![query.thread, query.limit], row_to_post)?,
        };

        let posts = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }
}

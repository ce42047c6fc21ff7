//! Post store trait and core post types

use chrono::{DateTime, Utc};

use crate::error::ServerResult;

/// Materialized path of a post: the ancestor chain from the thread root
/// down to the post itself, terminating in the post's own id.
///
/// Ordering two paths element-wise lexicographically orders the whole
/// reply tree depth-first, which is what the `tree` and `parent_tree`
/// read modes sort by. Root posts have a single-element path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostPath(Vec<i64>);

impl PostPath {
    /// Path of a thread-root post
    pub fn root(id: i64) -> Self {
        PostPath(vec![id])
    }

    /// Path of a reply: the parent's chain with the child's id appended
    pub fn child(&self, id: i64) -> Self {
        let mut chain = self.0.clone();
        chain.push(id);
        PostPath(chain)
    }

    pub fn from_vec(chain: Vec<i64>) -> Self {
        PostPath(chain)
    }

    /// The post's own id (last path element)
    pub fn last(&self) -> i64 {
        *self.0.last().expect("path is never empty")
    }

    /// Id of the root post of this subtree (first path element)
    pub fn root_id(&self) -> i64 {
        self.0[0]
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A stored post
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique id, strictly increasing, assigned at insertion
    pub id: i64,

    /// Id of the replied-to post; 0 for thread roots
    pub parent: i64,

    /// Nickname of the posting user
    pub author: String,

    /// Post body
    pub message: String,

    /// True once `message` has been changed to a different value
    pub is_edited: bool,

    /// Owning forum slug (derived from the thread at creation)
    pub forum: String,

    /// Owning thread id
    pub thread: i64,

    /// Creation time; shared across all posts of one batch
    pub created: DateTime<Utc>,

    /// Ancestor chain, root-to-self
    pub path: PostPath,
}

/// One element of a batch creation request
#[derive(Debug, Clone)]
pub struct PostCreate {
    pub author: String,
    pub message: String,
    /// 0 = thread root
    pub parent: i64,
}

/// Input for single-post creation (outside a batch context)
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: String,
    pub message: String,
    pub parent: i64,
    pub thread: i64,
    pub forum: String,
    pub created: DateTime<Utc>,
}

/// Post orderings served by the pagination planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Chronological: (created, id)
    #[default]
    Flat,
    /// Depth-first over the whole thread: path order
    Tree,
    /// Whole root subtrees together; limit counts roots, not posts
    ParentTree,
}

impl SortMode {
    /// Parse a client-supplied sort mode.
    ///
    /// Unrecognized values fall back to `Flat` rather than erroring,
    /// matching the behavior callers of this API already depend on.
    pub fn parse(s: &str) -> SortMode {
        match s {
            "tree" => SortMode::Tree,
            "parent_tree" => SortMode::ParentTree,
            _ => SortMode::Flat,
        }
    }
}

/// Parameters of a paginated thread read
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub thread: i64,
    pub sort: SortMode,
    /// Reverse the ordering
    pub desc: bool,
    /// Resume cursor: id of the last post already seen
    pub since: Option<i64>,
    /// Maximum rows (for `parent_tree`: maximum root subtrees); 0 is a
    /// valid empty read
    pub limit: i64,
}

/// The post store: path assignment, insertion, edit, and the twelve
/// paginated read shapes.
pub trait PostStore: Send + Sync + 'static {
    /// Atomically insert a batch of posts into one thread.
    ///
    /// An empty batch is a no-op returning `[]`. A non-empty batch
    /// either fully persists or fully fails; any row with an unknown
    /// author or an unknown/cross-thread parent rejects the whole
    /// batch. All rows share `created`. Rows are inserted in input
    /// order, so a row may reference a parent that appears earlier in
    /// the same batch.
    ///
    /// The order of the returned posts is whatever the store produced
    /// and is NOT part of the contract; read back through
    /// `posts_by_thread` for a defined order.
    fn create_posts(
        &self,
        thread: i64,
        forum: &str,
        created: DateTime<Utc>,
        posts: Vec<PostCreate>,
    ) -> ServerResult<Vec<Post>>;

    /// Insert a single post
    fn create_post(&self, input: NewPost) -> ServerResult<Post>;

    /// Fetch one post by id
    fn get_post(&self, id: i64) -> ServerResult<Post>;

    /// Edit a post's message.
    ///
    /// An empty or identical message is a no-op returning the current
    /// row with `is_edited` untouched.
    fn update_post(&self, id: i64, message: &str) -> ServerResult<Post>;

    /// Paginated thread read; see [`PostQuery`]
    fn posts_by_thread(&self, query: &PostQuery) -> ServerResult<Vec<Post>>;

    /// Thread owning the given post, for parent pre-validation
    fn post_thread(&self, post: i64) -> ServerResult<i64>;
}

//! Insertion pipeline and edit tests

use chrono::Utc;

use crate::common::*;
use forum_server::traits::{NewPost, Post, PostCreate, Thread};
use forum_server::{ForumStore, PostStore, ServerError, ServiceStore, SqliteStore};

fn seeded() -> (SqliteStore, Thread) {
    let store = test_store();
    seed_user(&store, "ivan");
    seed_forum(&store, "tech", "ivan");
    let thread = seed_thread(&store, Some("first-thread"), "tech", "ivan");
    (store, thread)
}

fn batch(
    store: &SqliteStore,
    thread: &Thread,
    posts: &[(&str, i64)],
) -> Result<Vec<Post>, ServerError> {
    store.create_posts(
        thread.id,
        &thread.forum,
        Utc::now(),
        posts
            .iter()
            .map(|(author, parent)| PostCreate {
                author: author.to_string(),
                message: "a message".to_string(),
                parent: *parent,
            })
            .collect(),
    )
}

fn post_count(store: &SqliteStore) -> i64 {
    store.status().expect("status").posts
}

#[test]
fn test_root_post_path_is_own_id() {
    let (store, thread) = seeded();

    let posts = batch(&store, &thread, &[("ivan", 0)]).expect("create root");
    assert_eq!(posts.len(), 1);

    let root = &posts[0];
    assert_eq!(root.parent, 0);
    assert_eq!(root.path.as_slice(), &[root.id]);
    assert!(!root.is_edited);
    assert_eq!(root.thread, thread.id);
    assert_eq!(root.forum, "tech");
}

#[test]
fn test_reply_path_extends_parent_path() {
    let (store, thread) = seeded();

    let roots = batch(&store, &thread, &[("ivan", 0)]).expect("root");
    let root = &roots[0];

    let replies = batch(&store, &thread, &[("ivan", root.id)]).expect("reply");
    let reply = &replies[0];

    assert_eq!(reply.parent, root.id);
    assert_eq!(reply.path.last(), reply.id);
    assert_eq!(&reply.path.as_slice()[..1], root.path.as_slice());
    assert_eq!(reply.path.root_id(), root.id);
}

#[test]
fn test_batch_shares_one_timestamp_and_orders_by_id() {
    let (store, thread) = seeded();

    let posts = batch(&store, &thread, &[("ivan", 0), ("ivan", 0), ("ivan", 0)])
        .expect("batch of roots");

    assert_eq!(posts.len(), 3);
    let created = posts[0].created;
    assert!(posts.iter().all(|p| p.created == created));

    // Ids are strictly increasing in insertion order
    assert!(posts.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_empty_batch_is_a_noop() {
    let (store, thread) = seeded();

    let posts = store
        .create_posts(thread.id, &thread.forum, Utc::now(), vec![])
        .expect("empty batch must not error");

    assert!(posts.is_empty());
    assert_eq!(post_count(&store), 0);
}

#[test]
fn test_batch_with_unknown_author_persists_nothing() {
    let (store, thread) = seeded();

    let err = batch(&store, &thread, &[("ivan", 0), ("nobody", 0)])
        .expect_err("unknown author must reject the batch");

    assert!(matches!(err, ServerError::UserNotFound(_)));
    assert_eq!(post_count(&store), 0);

    // Counter bookkeeping rolled back with the rows
    let forum = store.get_forum("tech").expect("forum");
    assert_eq!(forum.posts, 0);
}

#[test]
fn test_batch_with_unknown_parent_persists_nothing() {
    let (store, thread) = seeded();

    let err = batch(&store, &thread, &[("ivan", 0), ("ivan", 999)])
        .expect_err("unknown parent must reject the batch");

    assert!(matches!(err, ServerError::ParentConflict(999)));
    assert_eq!(post_count(&store), 0);
}

#[test]
fn test_parent_from_another_thread_rejects_the_batch() {
    let (store, thread) = seeded();
    let other = seed_thread(&store, Some("second-thread"), "tech", "ivan");

    let roots = batch(&store, &thread, &[("ivan", 0)]).expect("root in first thread");
    let foreign_parent = roots[0].id;

    let err = batch(&store, &other, &[("ivan", foreign_parent)])
        .expect_err("cross-thread parent must be rejected");

    assert!(matches!(err, ServerError::ParentConflict(_)));
    assert_eq!(post_count(&store), 1); // only the first thread's root
}

#[test]
fn test_batch_may_reply_to_an_earlier_row_of_the_same_batch() {
    let (store, thread) = seeded();

    // Ids are allocated sequentially from 1 on a fresh store, so the
    // second row can name the first row as its parent
    let posts = batch(&store, &thread, &[("ivan", 0), ("ivan", 1)]).expect("chained batch");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].parent, posts[0].id);
    assert_eq!(
        posts[1].path.as_slice(),
        &[posts[0].id, posts[1].id],
        "reply path must extend the in-batch parent"
    );
}

#[test]
fn test_batch_cannot_reference_a_later_sibling() {
    let (store, thread) = seeded();

    // First row names id 2, which would only exist after the second
    // row is inserted
    let err = batch(&store, &thread, &[("ivan", 2), ("ivan", 0)])
        .expect_err("forward reference must be rejected");

    assert!(matches!(err, ServerError::ParentConflict(2)));
    assert_eq!(post_count(&store), 0);
}

#[test]
fn test_single_create_with_unknown_parent_is_not_found() {
    let (store, thread) = seeded();

    let err = store
        .create_post(NewPost {
            author: "ivan".into(),
            message: "orphan".into(),
            parent: 999,
            thread: thread.id,
            forum: thread.forum.clone(),
            created: Utc::now(),
        })
        .expect_err("unknown parent");

    assert!(matches!(err, ServerError::PostNotFound(999)));
    assert_eq!(post_count(&store), 0);
}

#[test]
fn test_single_create_populates_the_post() {
    let (store, thread) = seeded();

    let post = store
        .create_post(NewPost {
            author: "ivan".into(),
            message: "hello".into(),
            parent: 0,
            thread: thread.id,
            forum: thread.forum.clone(),
            created: Utc::now(),
        })
        .expect("create");

    assert!(post.id > 0);
    assert!(!post.is_edited);
    assert_eq!(post.path.as_slice(), &[post.id]);

    let fetched = store.get_post(post.id).expect("fetch");
    assert_eq!(fetched.message, "hello");
    assert_eq!(fetched.path, post.path);
}

#[test]
fn test_get_post_unknown_id_is_not_found() {
    let (store, _) = seeded();
    let err = store.get_post(42).expect_err("missing post");
    assert!(matches!(err, ServerError::PostNotFound(42)));
}

#[test]
fn test_forum_post_counter_tracks_batch_size() {
    let (store, thread) = seeded();

    batch(&store, &thread, &[("ivan", 0), ("ivan", 0), ("ivan", 0)]).expect("batch");

    let forum = store.get_forum("tech").expect("forum");
    assert_eq!(forum.posts, 3);
    assert_eq!(forum.threads, 1);
}

// ========== Edit ==========

#[test]
fn test_edit_changes_message_and_sets_flag() {
    let (store, thread) = seeded();
    let posts = batch(&store, &thread, &[("ivan", 0)]).expect("root");
    let id = posts[0].id;

    let edited = store.update_post(id, "amended").expect("edit");
    assert_eq!(edited.message, "amended");
    assert!(edited.is_edited);

    let fetched = store.get_post(id).expect("fetch");
    assert_eq!(fetched.message, "amended");
    assert!(fetched.is_edited);
}

#[test]
fn test_edit_with_identical_message_is_a_noop() {
    let (store, thread) = seeded();
    let posts = batch(&store, &thread, &[("ivan", 0)]).expect("root");
    let id = posts[0].id;

    let unchanged = store.update_post(id, "a message").expect("noop edit");
    assert_eq!(unchanged.message, "a message");
    assert!(!unchanged.is_edited);
}

#[test]
fn test_edit_with_empty_message_is_a_noop() {
    let (store, thread) = seeded();
    let posts = batch(&store, &thread, &[("ivan", 0)]).expect("root");
    let id = posts[0].id;

    let unchanged = store.update_post(id, "").expect("empty edit");
    assert_eq!(unchanged.message, "a message");
    assert!(!unchanged.is_edited);
}

#[test]
fn test_edit_unknown_post_is_not_found() {
    let (store, _) = seeded();
    let err = store.update_post(42, "whatever").expect_err("missing post");
    assert!(matches!(err, ServerError::PostNotFound(42)));
}

// ========== Parent pre-validation ==========

#[test]
fn test_post_thread_reports_owning_thread() {
    let (store, thread) = seeded();
    let posts = batch(&store, &thread, &[("ivan", 0)]).expect("root");

    let owner = store.post_thread(posts[0].id).expect("post thread");
    assert_eq!(owner, thread.id);
}

#[test]
fn test_post_thread_for_unknown_post_is_a_conflict() {
    let (store, _) = seeded();
    let err = store.post_thread(7).expect_err("missing post");
    assert!(matches!(err, ServerError::ParentConflict(7)));
}

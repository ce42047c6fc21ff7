//! Post endpoint round-trip tests

use serde_json::{json, Value};

use crate::common::*;

/// Seed user "ivan", forum "tech", thread "talk" through the API and
/// return the app
async fn seeded_app() -> axum::Router {
    let app = test_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/user/ivan/create",
        Some(json!({"fullname": "Ivan Petrov", "email": "ivan@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/forum/create",
        Some(json!({"slug": "tech", "title": "Tech talk", "user": "ivan"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/forum/tech/create",
        Some(json!({"slug": "talk", "title": "A thread", "author": "ivan", "message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    app
}

fn ids(posts: &Value) -> Vec<i64> {
    posts
        .as_array()
        .expect("array body")
        .iter()
        .map(|p| p["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn test_create_posts_and_read_them_back_in_tree_order() {
    let app = seeded_app().await;

    let (status, roots) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([
            {"author": "ivan", "message": "first root"},
            {"author": "ivan", "message": "second root"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let root_ids = ids(&roots);
    assert_eq!(root_ids.len(), 2);

    let (status, replies) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([
            {"author": "ivan", "message": "reply", "parent": root_ids[0]}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let reply_id = ids(&replies)[0];

    let (status, posts) = send_json(&app, "GET", "/api/thread/talk/posts?sort=tree", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&posts), vec![root_ids[0], reply_id, root_ids[1]]);
}

#[tokio::test]
async fn test_posts_default_sort_is_flat() {
    let app = seeded_app().await;

    send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([
            {"author": "ivan", "message": "a"},
            {"author": "ivan", "message": "b"}
        ])),
    )
    .await;

    let (status, flat) = send_json(&app, "GET", "/api/thread/talk/posts", None).await;
    assert_eq!(status, StatusCode::OK);

    // Unknown sort silently reads as flat
    let (status, fallback) =
        send_json(&app, "GET", "/api/thread/talk/posts?sort=bogus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&flat), ids(&fallback));
}

#[tokio::test]
async fn test_empty_batch_answers_created_with_empty_list() {
    let app = seeded_app().await;

    let (status, body) = send_json(&app, "POST", "/api/thread/talk/create", Some(json!([]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_batch_into_unknown_thread_is_404() {
    let app = seeded_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/thread/no-such-thread/create",
        Some(json!([{"author": "ivan", "message": "lost"}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_with_unknown_author_is_404_and_atomic() {
    let app = seeded_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([
            {"author": "ivan", "message": "fine"},
            {"author": "nobody", "message": "doomed"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, posts) = send_json(&app, "GET", "/api/thread/talk/posts", None).await;
    assert_eq!(posts, json!([]), "failed batch must persist nothing");
}

#[tokio::test]
async fn test_get_post_details_with_related_entities() {
    let app = seeded_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([{"author": "ivan", "message": "root"}])),
    )
    .await;
    let id = ids(&created)[0];

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/post/{}/details?related=user,forum,thread", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["id"], id);
    assert_eq!(body["post"]["isEdited"], false);
    assert_eq!(body["author"]["nickname"], "ivan");
    assert_eq!(body["forum"]["slug"], "tech");
    assert_eq!(body["thread"]["slug"], "talk");
}

#[tokio::test]
async fn test_get_post_without_related_omits_expansions() {
    let app = seeded_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([{"author": "ivan", "message": "root"}])),
    )
    .await;
    let id = ids(&created)[0];

    let (status, body) =
        send_json(&app, "GET", &format!("/api/post/{}/details", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("author").is_none());
    assert!(body.get("forum").is_none());
    assert!(body.get("thread").is_none());
}

#[tokio::test]
async fn test_edit_post_sets_is_edited() {
    let app = seeded_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([{"author": "ivan", "message": "original"}])),
    )
    .await;
    let id = ids(&created)[0];

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/post/{}/details", id),
        Some(json!({"message": "amended"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "amended");
    assert_eq!(body["isEdited"], true);
}

#[tokio::test]
async fn test_edit_with_same_message_keeps_is_edited_false() {
    let app = seeded_app().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([{"author": "ivan", "message": "original"}])),
    )
    .await;
    let id = ids(&created)[0];

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/post/{}/details", id),
        Some(json!({"message": "original"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isEdited"], false);
}

#[tokio::test]
async fn test_edit_unknown_post_is_404() {
    let app = seeded_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/post/99/details",
        Some(json!({"message": "whatever"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "POST_NOT_FOUND");
}

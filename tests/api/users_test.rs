//! User endpoint tests

use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_create_and_fetch_profile() {
    let app = test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/user/ivan/create",
        Some(json!({"fullname": "Ivan Petrov", "about": "hi", "email": "ivan@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["nickname"], "ivan");

    let (status, body) = send_json(&app, "GET", "/api/user/ivan/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullname"], "Ivan Petrov");
    assert_eq!(body["about"], "hi");
}

#[tokio::test]
async fn test_duplicate_user_answers_conflicting_profiles() {
    let app = test_app().await;

    send_json(
        &app,
        "POST",
        "/api/user/ivan/create",
        Some(json!({"fullname": "Ivan", "email": "ivan@example.com"})),
    )
    .await;

    // Same nickname, different email
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/user/ivan/create",
        Some(json!({"fullname": "Imposter", "email": "other@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let conflicts = body.as_array().expect("conflict body is a list");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["nickname"], "ivan");
}

#[tokio::test]
async fn test_profile_of_unknown_user_is_404() {
    let app = test_app().await;

    let (status, body) = send_json(&app, "GET", "/api/user/ghost/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_partial_profile_update() {
    let app = test_app().await;

    send_json(
        &app,
        "POST",
        "/api/user/ivan/create",
        Some(json!({"fullname": "Ivan", "about": "old", "email": "ivan@example.com"})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/user/ivan/profile",
        Some(json!({"about": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["about"], "new");
    // Untouched fields survive
    assert_eq!(body["fullname"], "Ivan");
    assert_eq!(body["email"], "ivan@example.com");
}

#[tokio::test]
async fn test_forum_users_lists_posting_users() {
    let app = test_app().await;

    for nick in ["alice", "bob"] {
        send_json(
            &app,
            "POST",
            &format!("/api/user/{}/create", nick),
            Some(json!({"fullname": nick, "email": format!("{}@example.com", nick)})),
        )
        .await;
    }
    send_json(
        &app,
        "POST",
        "/api/forum/create",
        Some(json!({"slug": "tech", "title": "Tech", "user": "alice"})),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/forum/tech/create",
        Some(json!({"slug": "talk", "title": "T", "author": "alice", "message": "m"})),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/thread/talk/create",
        Some(json!([{"author": "bob", "message": "reply"}])),
    )
    .await;

    let (status, body) = send_json(&app, "GET", "/api/forum/tech/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let nicknames: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nickname"].as_str().unwrap())
        .collect();
    assert_eq!(nicknames, vec!["alice", "bob"]);

    let (_, body) = send_json(&app, "GET", "/api/forum/tech/users?desc=true", None).await;
    let nicknames: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nickname"].as_str().unwrap())
        .collect();
    assert_eq!(nicknames, vec!["bob", "alice"]);
}

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;
use util::config::AppConfig;

use crate::helpers::{TEST_PASSWORD, create_user, get, get_json_body, make_test_app, post_json};

#[tokio::test]
#[serial]
async fn register_returns_user_and_usable_token() {
    let (app, _) = make_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "full_name": "Alice Anders", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User registered successfully");
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["full_name"], "Alice Anders");
    assert_eq!(json["data"]["admin"], false);
    assert!(json["data"].get("password_hash").is_none());

    let token = json["data"]["token"].as_str().unwrap();
    let response = app
        .oneshot(get("/api/assignments", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn register_duplicate_username_is_conflict() {
    let (app, app_state) = make_test_app().await;
    create_user(&app_state, "alice", "Alice Anders", false).await;

    let response = app
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "full_name": "Another Alice", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "A user with this username already exists");
}

#[tokio::test]
#[serial]
async fn admin_self_registration_depends_on_environment() {
    let (app, _) = make_test_app().await;
    let body = |username: &str| {
        json!({ "username": username, "full_name": "Root Admin", "password": "password123", "admin": true })
    };

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/register", None, body("root")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["admin"], true);

    AppConfig::set_env("production");
    let response = app
        .clone()
        .oneshot(post_json("/api/auth/register", None, body("root2")))
        .await
        .unwrap();
    AppConfig::set_env("development");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Admin accounts cannot be self-registered in production");

    let response = app
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "username": "plain", "full_name": "Plain User", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
#[serial]
async fn register_short_password_is_bad_request() {
    let (app, _) = make_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "full_name": "Alice Anders", "password": "short" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Password must be at least 8 characters");
}

#[tokio::test]
#[serial]
async fn login_with_valid_credentials() {
    let (app, app_state) = make_test_app().await;
    let admin = create_user(&app_state, "adminX", "Xavier Admin", true).await;

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "username": "adminX", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["id"], admin.id);
    assert_eq!(json["data"]["admin"], true);
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(json["data"]["expires_at"].is_string());
}

#[tokio::test]
#[serial]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, app_state) = make_test_app().await;
    create_user(&app_state, "alice", "Alice Anders", false).await;

    for body in [
        json!({ "username": "alice", "password": "wrong-password" }),
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/login", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid username or password");
    }
}

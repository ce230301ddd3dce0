use axum::http::StatusCode;
use serial_test::serial;
use tower::ServiceExt;

use crate::helpers::{create_user, get, get_json_body, make_test_app, token_for};

#[tokio::test]
#[serial]
async fn list_admins_returns_public_profiles_sorted() {
    let (app, app_state) = make_test_app().await;
    let alice = create_user(&app_state, "alice", "Alice Anders", false).await;
    create_user(&app_state, "zed", "Zed Admin", true).await;
    create_user(&app_state, "amy", "Amy Admin", true).await;

    let response = app
        .oneshot(get("/api/users/admin", Some(&token_for(&alice))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Admins retrieved successfully");

    let admins = json["data"].as_array().unwrap();
    assert_eq!(admins.len(), 2);
    assert_eq!(admins[0]["username"], "amy");
    assert_eq!(admins[0]["full_name"], "Amy Admin");
    assert_eq!(admins[1]["username"], "zed");
    assert!(admins[0].get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn list_admins_requires_authentication() {
    let (app, _) = make_test_app().await;

    let response = app.oneshot(get("/api/users/admin", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Authentication required");
}

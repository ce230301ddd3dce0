use api::auth::generate_jwt;
use axum::http::StatusCode;
use db::models::user::Model as UserModel;
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;
use util::config::AppConfig;

use crate::helpers::{
    create_user, get, get_json_body, make_test_app, post_empty, post_json, token_for,
};

struct TestData {
    alice: UserModel,
    bob: UserModel,
    admin_x: UserModel,
    admin_y: UserModel,
}

async fn setup_test_data(app_state: &util::state::AppState) -> TestData {
    TestData {
        alice: create_user(app_state, "alice", "Alice Anders", false).await,
        bob: create_user(app_state, "bob", "Bob Brown", false).await,
        admin_x: create_user(app_state, "adminX", "Xavier Admin", true).await,
        admin_y: create_user(app_state, "adminY", "Yara Admin", true).await,
    }
}

async fn create_assignment(app: &axum::Router, creator: &UserModel, task: &str, admins: &[&str]) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token_for(creator)),
            json!({ "task": task, "assigned_admins": admins }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    get_json_body(response).await["data"].clone()
}

#[tokio::test]
#[serial]
async fn review_scenario_end_to_end() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;

    let created = create_assignment(&app, &data.alice, "Review doc", &["adminX"]).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["feedback"], "");
    assert_eq!(created["task"], "Review doc");
    assert_eq!(created["user"]["username"], "alice");
    assert_eq!(created["user"]["full_name"], "Alice Anders");
    assert_eq!(created["assigned_admins"][0]["id"], data.admin_x.id);
    assert_eq!(created["assigned_admins"][0]["username"], "adminX");
    assert_eq!(created["assigned_admins"][0]["full_name"], "Xavier Admin");
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/assignments/reject/{id}"),
            Some(&token_for(&data.admin_x)),
            json!({ "feedback": "incomplete" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment rejected successfully");
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["feedback"], "incomplete");

    let response = app
        .clone()
        .oneshot(post_empty(
            &format!("/api/assignments/delete/{id}"),
            Some(&token_for(&data.bob)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "You are not authorized to delete this assignment");

    let response = app
        .oneshot(get("/api/assignments", Some(&token_for(&data.alice))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    let list = json["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["status"], "rejected");
}

#[tokio::test]
#[serial]
async fn assignments_require_authentication() {
    let (app, _) = make_test_app().await;

    let response = app.clone().oneshot(get("/api/assignments", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Authentication required");

    let response = app
        .oneshot(get("/api/assignments", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn token_for_unknown_user_is_unauthorized() {
    let (app, _) = make_test_app().await;
    let (token, _) = generate_jwt(4_242, false).unwrap();

    let response = app
        .oneshot(get("/api/assignments", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn role_comes_from_database_not_token() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;

    // Claims say admin, the stored user is not.
    let (token, _) = generate_jwt(data.alice.id, true).unwrap();
    let response = app
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token),
            json!({ "task": "Review doc", "assigned_admins": ["adminX"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
#[serial]
async fn admin_cannot_create() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;

    let response = app
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token_for(&data.admin_x)),
            json!({ "task": "Review doc", "assigned_admins": ["adminY"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Admins cannot create assignments");
}

#[tokio::test]
#[serial]
async fn create_with_non_admin_username_is_rejected() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;
    let token = token_for(&data.alice);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token),
            json!({ "task": "Review doc", "assigned_admins": ["adminX", "bob"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_json_body(response).await;
    assert_eq!(
        json["message"],
        "One or more admin usernames are invalid or users are not admins"
    );

    let response = app
        .oneshot(get("/api/assignments", Some(&token)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn create_validates_body() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;

    let response = app
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token_for(&data.alice)),
            json!({ "task": "", "assigned_admins": ["adminX"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Task is required");
}

#[tokio::test]
#[serial]
async fn create_without_admin_list_is_bad_request() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;

    let response = app
        .oneshot(post_json(
            "/api/assignments/create",
            Some(&token_for(&data.alice)),
            json!({ "task": "Review doc" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "At least one admin must be assigned");
}

#[tokio::test]
#[serial]
async fn admin_list_hides_admin_set() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;
    create_assignment(&app, &data.alice, "first", &["adminX"]).await;
    create_assignment(&app, &data.bob, "second", &["adminX", "adminY"]).await;

    let response = app
        .clone()
        .oneshot(get("/api/assignments", Some(&token_for(&data.admin_x))))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    let list = json["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["task"], "second");
    assert_eq!(list[0]["user"]["username"], "bob");
    assert!(list.iter().all(|a| a.get("assigned_admins").is_none()));

    let response = app
        .oneshot(get("/api/assignments", Some(&token_for(&data.admin_y))))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn accept_without_body_and_by_outsider() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;
    let id = create_assignment(&app, &data.alice, "Review doc", &["adminX"]).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_empty(
            &format!("/api/assignments/accept/{id}"),
            Some(&token_for(&data.admin_y)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment not found or you're not authorized");

    let response = app
        .oneshot(post_empty(
            &format!("/api/assignments/accept/{id}"),
            Some(&token_for(&data.admin_x)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "accepted");
    assert_eq!(json["data"]["feedback"], "");
}

#[tokio::test]
#[serial]
async fn reject_requires_feedback() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;
    let id = create_assignment(&app, &data.alice, "Review doc", &["adminX"]).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/assignments/reject/{id}"),
            Some(&token_for(&data.admin_x)),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Feedback is required when rejecting an assignment");

    let response = app
        .oneshot(get("/api/assignments", Some(&token_for(&data.alice))))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"][0]["status"], "pending");
}

#[tokio::test]
#[serial]
async fn creator_updates_and_deletes() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(&app_state).await;
    let token = token_for(&data.alice);
    let id = create_assignment(&app, &data.alice, "Draft", &["adminX"]).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/assignments/update/{id}"),
            Some(&token),
            json!({ "task": "Final", "assigned_admins": ["adminY"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment updated successfully");
    assert_eq!(json["data"]["task"], "Final");
    assert_eq!(json["data"]["assigned_admins"][0]["username"], "adminY");

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/assignments/update/{id}"),
            Some(&token_for(&data.bob)),
            json!({ "task": "Hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/assignments/delete/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment deleted successfully");

    let response = app
        .oneshot(post_empty(&format!("/api/assignments/delete/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment not found");
}

#[tokio::test]
#[serial]
async fn strict_lifecycle_rejects_second_decision() {
    let (app, app_state) = make_test_app().await;
    AppConfig::set_strict_assignment_lifecycle(true);
    let data = setup_test_data(&app_state).await;
    let id = create_assignment(&app, &data.alice, "Review doc", &["adminX"]).await["id"]
        .as_i64()
        .unwrap();
    let admin_token = token_for(&data.admin_x);

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/assignments/accept/{id}"), Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            &format!("/api/assignments/reject/{id}"),
            Some(&admin_token),
            json!({ "feedback": "changed my mind" }),
        ))
        .await
        .unwrap();
    AppConfig::set_strict_assignment_lifecycle(false);

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Assignment has already been accepted");
}

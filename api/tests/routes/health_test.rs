use axum::http::StatusCode;
use serial_test::serial;
use tower::ServiceExt;

use crate::helpers::{get, get_json_body, make_test_app};

#[tokio::test]
#[serial]
async fn health_is_public() {
    let (app, _) = make_test_app().await;

    let response = app.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}

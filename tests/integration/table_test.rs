//! Integration tests for the table projection endpoints.

use http::StatusCode;
use serde_json::json;

use prepaccess_entity::{SubscriptionTier, UserRole};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], json!("ok"));
}

#[tokio::test]
async fn test_admin_sections() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let response = app
        .request("GET", "/api/access/sections/ADMIN", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], json!("ADMIN"));
    assert_eq!(
        response.body["sections"],
        json!(["student", "manager", "admin"])
    );
}

#[tokio::test]
async fn test_student_permissions() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let response = app
        .request("GET", "/api/access/permissions/STUDENT", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let permissions = response.body["permissions"].as_array().unwrap();
    assert_eq!(permissions.len(), 5);
    assert!(permissions.contains(&json!("view_content")));
    assert!(permissions.contains(&json!("use_ai_chat")));
    assert!(!permissions.contains(&json!("manage_users")));
}

#[tokio::test]
async fn test_unknown_role_is_bad_request() {
    let app = TestApp::new();
    let token = app.token(UserRole::Admin, SubscriptionTier::Pro);

    let response = app
        .request("GET", "/api/access/permissions/WIZARD", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION_ERROR"));
    assert!(response.body["message"].as_str().unwrap().contains("WIZARD"));
}

#[tokio::test]
async fn test_feature_matrix_defaults_to_own_tier() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let response = app
        .request("GET", "/api/access/features", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tier"], json!("FREE"));
    assert_eq!(response.body["features"]["live_sessions"], json!(false));
    assert_eq!(response.body["features"]["progress_tracking"], json!(true));
}

#[tokio::test]
async fn test_feature_matrix_with_explicit_tier() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let response = app
        .request(
            "GET",
            "/api/access/features?tier=PREMIUM",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tier"], json!("PREMIUM"));
    assert_eq!(response.body["features"]["live_sessions"], json!(true));
}

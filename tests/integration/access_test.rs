//! Integration tests for the access check endpoints.

use http::StatusCode;
use serde_json::json;

use prepaccess_access::StaticEscalationBackend;
use prepaccess_core::AppError;
use prepaccess_entity::{SubscriptionTier, UserRole};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_check_requires_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/access/section",
            Some(json!({ "target_section": "student" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_rejects_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/access/section",
            Some(json!({ "target_section": "student" })),
            Some("not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_section_check_allowed() {
    let app = TestApp::new();
    let token = app.token(UserRole::Admin, SubscriptionTier::Pro);

    let verdict = app
        .request(
            "POST",
            "/api/access/section",
            Some(json!({ "target_section": "admin" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(true));
    assert_eq!(app.backend.section_calls(), 1);
}

#[tokio::test]
async fn test_student_denied_manager_section_without_backend_call() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Premium);

    let verdict = app
        .request(
            "POST",
            "/api/access/section",
            Some(json!({ "target_section": "manager" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    let required = verdict["required_role"].as_array().unwrap();
    assert!(required.contains(&json!("JUNIOR_MANAGER")));
    assert!(required.contains(&json!("ADMIN")));
    assert!(!required.contains(&json!("STUDENT")));
    assert_eq!(verdict["fallback_action"]["type"], json!("redirect"));
    // static table denial never reaches the backend
    assert_eq!(app.backend.section_calls(), 0);
}

#[tokio::test]
async fn test_junior_manager_denied_manage_users() {
    let app = TestApp::new();
    let token = app.token(UserRole::JuniorManager, SubscriptionTier::Pro);

    let verdict = app
        .request(
            "POST",
            "/api/access/permission",
            Some(json!({ "permission": "manage_users" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    assert_eq!(
        verdict["required_role"],
        json!(["SENIOR_MANAGER", "ADMIN"])
    );
    assert_eq!(verdict["required_permissions"], json!(["manage_users"]));
    assert_eq!(app.backend.permission_calls(), 0);
}

#[tokio::test]
async fn test_free_student_upload_files_needs_subscription() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let verdict = app
        .request(
            "POST",
            "/api/access/permission",
            Some(json!({ "permission": "upload_files" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    assert_eq!(
        verdict["required_subscription"],
        json!(["PREMIUM", "PRO"])
    );
    assert_eq!(
        verdict["reason"],
        json!("Un abonnement supérieur est requis pour cette action")
    );
    assert_eq!(app.backend.permission_calls(), 0);
}

#[tokio::test]
async fn test_premium_student_upload_files_escalates_and_passes() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Premium);

    let verdict = app
        .request(
            "POST",
            "/api/access/permission",
            Some(json!({ "permission": "upload_files", "resource": "course-42" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(true));
    assert_eq!(app.backend.permission_calls(), 1);
}

#[tokio::test]
async fn test_backend_failure_denies_with_french_reason() {
    let app = TestApp::with_backend(
        StaticEscalationBackend::allowing()
            .with_permission_response(Err(AppError::external_service("backend unreachable"))),
    );
    let token = app.token(UserRole::Student, SubscriptionTier::Pro);

    let verdict = app
        .request(
            "POST",
            "/api/access/permission",
            Some(json!({ "permission": "view_content" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    assert_eq!(
        verdict["reason"],
        json!("Erreur lors de la vérification des permissions")
    );
}

#[tokio::test]
async fn test_free_student_denied_live_sessions_feature() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let verdict = app
        .request(
            "POST",
            "/api/access/feature",
            Some(json!({ "feature": "live_sessions" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    assert_eq!(
        verdict["required_subscription"],
        json!(["PREMIUM", "PRO"])
    );
    assert_eq!(verdict["upgrade_url"], json!("/abonnement"));
    assert_eq!(verdict["fallback_action"]["type"], json!("show_upgrade"));
}

#[tokio::test]
async fn test_unknown_feature_denied() {
    let app = TestApp::new();
    let token = app.token(UserRole::Admin, SubscriptionTier::Pro);

    let verdict = app
        .request(
            "POST",
            "/api/access/feature",
            Some(json!({ "feature": "time_travel" })),
            Some(&token),
        )
        .await
        .verdict();

    assert_eq!(verdict["allowed"], json!(false));
    assert!(verdict.get("upgrade_url").is_none());
}

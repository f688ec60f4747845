//! Integration tests for batch rule validation.

use http::StatusCode;
use serde_json::json;

use prepaccess_access::StaticEscalationBackend;
use prepaccess_entity::{SubscriptionTier, UserRole};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_rules_each_get_a_verdict() {
    let app = TestApp::new();
    let token = app.token(UserRole::SeniorManager, SubscriptionTier::Pro);

    let response = app
        .request(
            "POST",
            "/api/access/rules",
            Some(json!({
                "rules": [
                    {
                        "id": "managers-only",
                        "required_roles": ["JUNIOR_MANAGER", "SENIOR_MANAGER", "ADMIN"]
                    },
                    {
                        "id": "admins-only",
                        "required_roles": ["ADMIN"]
                    }
                ]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let results = &response.body["results"];
    assert_eq!(results["managers-only"]["allowed"], json!(true));
    assert_eq!(results["admins-only"]["allowed"], json!(false));
    assert!(
        results["admins-only"]["required_role"]
            .as_array()
            .unwrap()
            .contains(&json!("ADMIN"))
    );
}

#[tokio::test]
async fn test_rule_role_failure_skips_conditions() {
    let app = TestApp::new();
    let token = app.token(UserRole::Student, SubscriptionTier::Free);

    let response = app
        .request(
            "POST",
            "/api/access/rules",
            Some(json!({
                "rules": [{
                    "id": "guarded",
                    "required_roles": ["ADMIN"],
                    "conditions": [{ "type": "custom", "key": "ip_allowlist" }]
                }]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["results"]["guarded"]["allowed"], json!(false));
    // the failed role stage short-circuits before any condition runs
    assert_eq!(app.backend.condition_calls(), 0);
}

#[tokio::test]
async fn test_custom_condition_consults_backend() {
    let app = TestApp::with_backend(
        StaticEscalationBackend::allowing().with_condition_response(Ok(false)),
    );
    let token = app.token(UserRole::Admin, SubscriptionTier::Pro);

    let response = app
        .request(
            "POST",
            "/api/access/rules",
            Some(json!({
                "rules": [{
                    "id": "custom-gate",
                    "conditions": [{ "type": "custom", "key": "maintenance_window" }]
                }]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["results"]["custom-gate"]["allowed"],
        json!(false)
    );
    assert_eq!(app.backend.condition_calls(), 1);
}

#[tokio::test]
async fn test_empty_rules_rejected() {
    let app = TestApp::new();
    let token = app.token(UserRole::Admin, SubscriptionTier::Pro);

    let response = app
        .request(
            "POST",
            "/api/access/rules",
            Some(json!({ "rules": [] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

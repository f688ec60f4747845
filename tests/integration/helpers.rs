//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use prepaccess_access::{EscalationBackend, StaticEscalationBackend};
use prepaccess_api::token::Claims;
use prepaccess_core::config::AppConfig;
use prepaccess_entity::{SubscriptionTier, UserRole};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// The canned backend, kept for call-count assertions
    pub backend: Arc<StaticEscalationBackend>,
}

impl TestApp {
    /// Create a test application over a backend that allows everything
    pub fn new() -> Self {
        Self::with_backend(StaticEscalationBackend::allowing())
    }

    /// Create a test application over the given canned backend
    pub fn with_backend(backend: StaticEscalationBackend) -> Self {
        let config = AppConfig::default();
        let backend = Arc::new(backend);

        let state = prepaccess_api::build_state_with_backend(
            config.clone(),
            Arc::clone(&backend) as Arc<dyn EscalationBackend>,
        );
        let router = prepaccess_api::build_app(state);

        Self {
            router,
            config,
            backend,
        }
    }

    /// Issue a signed access token for the given role and tier
    pub fn token(&self, role: UserRole, tier: SubscriptionTier) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role,
            tier,
            locale: None,
            iat: now,
            exp: now + 3600,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to encode test token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Assert the response is a 200 with a verdict body and return it
    pub fn verdict(self) -> Value {
        assert_eq!(
            self.status,
            StatusCode::OK,
            "Expected verdict response: {:?}",
            self.body
        );
        assert!(self.body.get("allowed").is_some(), "Not a verdict body");
        self.body
    }
}

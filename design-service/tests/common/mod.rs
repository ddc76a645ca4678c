//! Test helpers for design-service integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use design_service::config::{AiConfig, DesignConfig, MongoConfig};
use design_service::models::Design;
use design_service::services::providers::mock::MockCompletionProvider;
use design_service::services::MemoryStore;
use design_service::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_USER_ID: &str = "test_user_123";
pub const OTHER_USER_ID: &str = "other_user_456";

pub fn test_config(api_key: &str) -> DesignConfig {
    DesignConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "error".to_string(),
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "design_test".to_string(),
        },
        ai: AiConfig {
            api_key: api_key.to_string(),
            model: "gpt-4o-mini".to_string(),
        },
    }
}

/// In-process application: router over a memory store and a mock provider.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<MockCompletionProvider>,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_provider(MockCompletionProvider::new("mock canvas"))
    }

    pub fn with_provider(provider: MockCompletionProvider) -> Self {
        Self::build(provider, test_config("test-api-key"))
    }

    /// App whose AI key is not configured.
    pub fn without_api_key() -> Self {
        Self::build(MockCompletionProvider::new("unused"), test_config(""))
    }

    fn build(provider: MockCompletionProvider, config: DesignConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(provider);

        let state = AppState {
            config,
            store: store.clone(),
            provider: provider.clone(),
        };

        Self {
            router: build_router(state),
            store,
            provider,
        }
    }

    /// Seed a design owned by `user_id` directly into the store.
    pub async fn seed_design(&self, user_id: &str, name: &str) -> Design {
        let design = Design::new(user_id.to_string(), name.to_string(), None, None, None, None);
        self.store.put(design.clone()).await;
        design
    }
}

/// Fire one request at the router and return (status, parsed JSON body).
/// Empty bodies come back as `Value::Null`.
pub async fn send_request(
    router: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user_id {
        builder = builder.header("X-User-ID", user);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response JSON")
    };

    (status, json)
}

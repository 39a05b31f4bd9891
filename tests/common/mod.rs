//! Common test utilities for e2e tests
//!
//! Provides a test application backed by a fresh in-memory registry and
//! helpers for issuing JSON requests against its router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;

use ipam_registry::infrastructure::driven_adapters::config::AppConfig;
use ipam_registry::infrastructure::driven_adapters::InMemoryGroupRegistry;
use ipam_registry::infrastructure::driving_adapters::api_rest::{self, AppState};

/// Test application context
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with an empty registry
    pub fn new() -> Self {
        let config = AppConfig::from_toml(
            r#"
[server]
host = "127.0.0.1"
port = 0
"#,
        )
        .expect("Failed to build test config");

        let group_registry = Arc::new(InMemoryGroupRegistry::new());
        let app_state = AppState::new(Arc::new(config), group_registry);

        Self {
            router: api_rest::router(app_state),
        }
    }

    /// Send a request with an optional JSON body
    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Send a serializable body as JSON
    pub async fn send_json<T: Serialize>(&self, method: Method, uri: &str, body: &T) -> (StatusCode, Vec<u8>) {
        self.send(method, uri, Some(serde_json::to_string(body).unwrap()))
            .await
    }

    /// POST /groups, asserting success
    pub async fn create_group(&self, name: &str, rule: &str) -> GroupResponse {
        let (status, body) = self
            .send_json(Method::POST, "/groups", &CreateGroupRequest::new(name, rule))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", String::from_utf8_lossy(&body));
        parse(&body)
    }

    /// POST /users, asserting success
    pub async fn add_user(&self, name: &str, group: &str, address: &str) -> UserResponse {
        let (status, body) = self
            .send_json(Method::POST, "/users", &AddUserRequest::new(name, group, address))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", String::from_utf8_lossy(&body));
        parse(&body)
    }
}

/// Deserialize a response body
pub fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!("unexpected body {}: {e}", String::from_utf8_lossy(body))
    })
}

/// Helper struct for creating group request bodies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub rule: String,
}

impl CreateGroupRequest {
    pub fn new(name: &str, rule: &str) -> Self {
        Self {
            name: name.to_string(),
            rule: rule.to_string(),
        }
    }
}

/// Helper struct for rule update request bodies
#[derive(Debug, Serialize)]
pub struct UpdateRuleRequest {
    pub rule: String,
}

impl UpdateRuleRequest {
    pub fn new(rule: &str) -> Self {
        Self {
            rule: rule.to_string(),
        }
    }
}

/// Helper struct for adding user request bodies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    pub name: String,
    pub group: String,
    pub address: String,
}

impl AddUserRequest {
    pub fn new(name: &str, group: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            address: address.to_string(),
        }
    }
}

/// Helper struct for moving user request bodies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveUserRequest {
    pub group: String,
    pub address: String,
}

impl MoveUserRequest {
    pub fn new(group: &str, address: &str) -> Self {
        Self {
            group: group.to_string(),
            address: address.to_string(),
        }
    }
}

/// Subnet response structure for deserialization
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubnetResponse {
    pub rule: String,
    pub capacity: i64,
    pub in_use: Vec<String>,
}

/// Group response structure for deserialization
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct GroupResponse {
    pub name: String,
    pub rule: String,
    pub total_capacity: i64,
    pub allocated: usize,
    pub subnets: Vec<SubnetResponse>,
    pub users: Vec<UserResponse>,
}

/// User response structure for deserialization
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UserResponse {
    pub name: String,
    pub address: Option<String>,
    pub group_name: Option<String>,
}

/// Error response structure for deserialization
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

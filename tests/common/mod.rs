//! Shared helpers for the HTTP integration tests.
//!
//! Every test gets a fresh router over a [`MemoryStore`], so tests never share state.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use feedback_pulse::{AppState, build_router, middleware::auth::hash_token, store::MemoryStore};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

pub const BASE_URL: &str = "https://pulse.example.com";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Should parse JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Should be UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Test helper: app over an empty in-memory store
pub fn setup_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), BASE_URL);

    TestApp {
        router: build_router(state),
        store,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register a live session for `owner_id` and return its bearer token.
    pub async fn sign_in(&self, owner_id: Uuid) -> String {
        let token = format!("session-{}", Uuid::new_v4());
        self.store
            .insert_session(hash_token(&token), owner_id, Utc::now() + Duration::hours(1))
            .await;
        token
    }

    /// Create a project through the dashboard API, returning its JSON.
    pub async fn create_project(&self, token: &str, name: &str) -> Value {
        let response = self
            .send(dashboard_request(
                "POST",
                "/api/v1/projects",
                token,
                Some(serde_json::json!({ "name": name })),
            ))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()
    }

    /// Submit feedback with `api_key`, returning the raw response.
    pub async fn submit(&self, api_key: &str, body: Value) -> TestResponse {
        self.send(ingest_request(Some(api_key), body.to_string())).await
    }
}

pub fn ingest_request(api_key: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/feedback")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://customer.example.org")
        .header(header::USER_AGENT, "integration-test/1.0");

    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }

    builder.body(body.into()).unwrap()
}

pub fn dashboard_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

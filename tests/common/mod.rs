#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use jotter::{app, config::AppConfig, state::AppState, store::MemoryStore};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub app: axum::Router,
}

pub fn build_test_context() -> TestContext {
    build_test_context_with(AppConfig::for_tests())
}

pub fn build_test_context_with(config: AppConfig) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::from_parts(store.clone(), Arc::new(config));
    let app = app::build_app(state.clone());
    TestContext { store, state, app }
}

pub async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }
    let req = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, json)
}

pub async fn register(app: &axum::Router, username: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

pub async fn login(app: &axum::Router, username: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

/// Registers `username` and returns `(user_id, "Bearer <jwt>")`.
pub async fn register_and_login(app: &axum::Router, username: &str) -> (i64, String) {
    let (status, body) = register(app, username, "pa55word").await;
    assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
    let id = body["user"]["id"].as_i64().expect("user id");

    let (status, body) = login(app, username, "pa55word").await;
    assert_eq!(status, StatusCode::OK, "login {username}: {body}");
    let jwt = body["jwt"].as_str().expect("jwt should exist");
    (id, format!("Bearer {jwt}"))
}

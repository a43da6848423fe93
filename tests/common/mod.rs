#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use companion_backend::{
    config::Config, routes, storage::MemoryStore, storage::SharedStore, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const MOBILE: &str = "9876543210";

pub fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn app_with_store(store: SharedStore) -> Router {
    routes::router(AppState::new(Config::for_tests(), store))
}

pub async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

pub async fn login(app: &Router) -> String {
    let (status, _) = call(
        app,
        "POST",
        "/api/auth/otp",
        None,
        Some(json!({ "mobile": MOBILE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        app,
        "POST",
        "/api/auth/verify",
        None,
        Some(json!({ "mobile": MOBILE, "otp": "1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

pub fn coffee_request() -> JsonValue {
    json!({
        "category": "coffee",
        "date": "2026-10-30",
        "time_from": "19:00:00",
        "time_to": "20:30:00",
        "language": "english",
        "location": "public",
        "details": "Filter coffee near the park",
        "reward": true
    })
}

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use companion_backend::storage::JsonFileStore;
use serde_json::json;

use common::{app, app_with_store, call, coffee_request, login, MOBILE};

#[tokio::test(start_paused = true)]
async fn supporter_accepts_from_board() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());

    let (status, profile) = call(
        &app,
        "POST",
        "/api/profile",
        t,
        Some(json!({ "name": "Ravi Kumar", "mobile": MOBILE, "agreed_to_terms": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, coffee) = call(&app, "POST", "/api/requests", t, Some(coffee_request())).await;
    let mut meal = coffee_request();
    meal["category"] = json!("meals");
    call(&app, "POST", "/api/requests", t, Some(meal)).await;

    let (status, board) = call(&app, "GET", "/api/support/requests?category=coffee", t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["total"], 1);
    assert_eq!(board["items"][0]["id"], coffee["id"]);

    let (_, everything) = call(&app, "GET", "/api/support/requests", t, None).await;
    assert_eq!(everything["total"], 2);

    let accept_uri = format!("/api/support/requests/{}/accept", coffee["id"].as_str().unwrap());
    let (status, session) = call(&app, "POST", &accept_uri, t, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["mode"], "supporter");
    assert_eq!(session["status_message"], "Navigate to requestor");
    assert_eq!(session["supporter_id"], profile["id"]);

    let (status, _) = call(&app, "POST", &accept_uri, t, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, board) = call(&app, "GET", "/api/support/requests?category=coffee", t, None).await;
    assert_eq!(board["total"], 0);

    let (_, candidates) = call(
        &app,
        "GET",
        &format!("/api/requests/{}/candidates", coffee["id"].as_str().unwrap()),
        t,
        None,
    )
    .await;
    assert_eq!(candidates["total"], 0);

    tokio::time::sleep(Duration::from_secs(16)).await;
    let session_uri = format!("/api/sessions/{}", session["id"].as_str().unwrap());
    let (_, arrived) = call(&app, "GET", &session_uri, t, None).await;
    assert_eq!(arrived["status"], "arrived");
    assert_eq!(arrived["status_message"], "You have arrived");
}

#[tokio::test(start_paused = true)]
async fn stopped_tracking_freezes_session() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());

    let (_, request) = call(&app, "POST", "/api/requests", t, Some(coffee_request())).await;
    let request_id = request["id"].as_str().unwrap();
    let (_, candidates) = call(
        &app,
        "GET",
        &format!("/api/requests/{}/candidates", request_id),
        t,
        None,
    )
    .await;
    let chosen = candidates["items"][0]["id"].as_str().unwrap();
    let (_, confirmed) = call(
        &app,
        "POST",
        &format!("/api/requests/{}/candidates/{}/confirm", request_id, chosen),
        t,
        None,
    )
    .await;
    let session_id = confirmed["session"]["id"].as_str().unwrap();

    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/api/sessions/{}/tracking", session_id),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(60)).await;
    let (_, session) = call(&app, "GET", &format!("/api/sessions/{}", session_id), t, None).await;
    assert_eq!(session["status"], "on_way");
    assert_eq!(session["eta_minutes"], 15);
}

#[tokio::test]
async fn file_store_keeps_requests_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let first = app_with_store(Arc::new(JsonFileStore::open(dir.path()).await.unwrap()));
    let token = login(&first).await;
    let (status, created) = call(&first, "POST", "/api/requests", Some(&token), Some(coffee_request())).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = app_with_store(Arc::new(JsonFileStore::open(dir.path()).await.unwrap()));
    let token = login(&second).await;
    let (_, list) = call(&second, "GET", "/api/requests", Some(&token), None).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["id"], created["id"]);
}

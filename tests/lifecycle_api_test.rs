mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, call, coffee_request, login};

#[tokio::test(start_paused = true)]
async fn request_to_rating_end_to_end() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());

    let (status, created) = call(&app, "POST", "/api/requests", t, Some(coffee_request())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["category"], "coffee");
    let request_id = created["id"].as_str().unwrap().to_string();

    let (status, list) = call(&app, "GET", "/api/requests", t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);

    let (status, candidates) = call(
        &app,
        "GET",
        &format!("/api/requests/{}/candidates", request_id),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(candidates["total"], 3);
    let items = candidates["items"].as_array().unwrap();
    let scores: Vec<u64> = items
        .iter()
        .map(|c| c["match_percentage"].as_u64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    // Decline the last candidate; the request itself stays pending.
    let declined = items[2]["id"].as_str().unwrap().to_string();
    let (status, remaining) = call(
        &app,
        "POST",
        &format!("/api/requests/{}/candidates/{}/decline", request_id, declined),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(remaining["total"], 2);
    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "pending");

    let chosen = items[0]["id"].as_str().unwrap().to_string();
    let (status, confirmed) = call(
        &app,
        "POST",
        &format!("/api/requests/{}/candidates/{}/confirm", request_id, chosen),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(confirmed["session"]["status"], "on_way");
    assert_eq!(confirmed["session"]["supporter_id"], chosen.as_str());
    assert_eq!(confirmed["session"]["status_message"], "Supporter is on the way");
    let session_id = confirmed["session"]["id"].as_str().unwrap().to_string();

    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "matched");

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/complete", session_id),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_secs(16)).await;

    let (status, session) = call(&app, "GET", &format!("/api/sessions/{}", session_id), t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["status"], "arrived");
    assert_eq!(session["eta_minutes"], 0);
    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "in_progress");

    let (status, result) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/complete", session_id),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["session_id"], session_id.as_str());
    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "completed");

    let rating_uri = format!("/api/sessions/{}/rating", session_id);
    let (status, body) = call(&app, "POST", &rating_uri, t, Some(json!({ "rating": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a rating");

    let (status, rating) = call(
        &app,
        "POST",
        &rating_uri,
        t,
        Some(json!({ "rating": 5, "review": "Lovely chat" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rating["label"], "Excellent");
    assert_eq!(rating["supporter_id"], chosen.as_str());

    let (status, _) = call(&app, "POST", &rating_uri, t, Some(json!({ "rating": 4 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, ratings) = call(&app, "GET", "/api/ratings", t, None).await;
    assert_eq!(ratings["total"], 1);

    let (_, summary) = call(
        &app,
        "GET",
        &format!("/api/supporters/{}/ratings/summary", chosen),
        t,
        None,
    )
    .await;
    assert_eq!(summary["total_ratings"], 1);
    assert_eq!(summary["average_rating"], 5.0);

    let (_, stats) = call(&app, "GET", "/api/profile/stats", t, None).await;
    assert_eq!(stats["requests_made"], 1);
    assert_eq!(stats["sessions_completed"], 1);
    assert_eq!(stats["ratings_given"], 1);
}

#[tokio::test]
async fn missing_fields_are_listed() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/requests",
        Some(&token),
        Some(json!({ "location": "custom" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    for field in ["category", "date", "time_from", "custom_location"] {
        assert!(message.contains(field), "{} missing from {}", field, message);
    }

    let (_, list) = call(&app, "GET", "/api/requests", Some(&token), None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn manual_matching_is_refused() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());
    let (_, created) = call(&app, "POST", "/api/requests", t, Some(coffee_request())).await;
    let request_id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/requests/{}/status", request_id);

    let (status, _) = call(&app, "PATCH", &uri, t, Some(json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, "PATCH", &uri, t, Some(json!({ "status": "matched" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "pending");
    let (_, candidates) = call(
        &app,
        "GET",
        &format!("/api/requests/{}/candidates", request_id),
        t,
        None,
    )
    .await;
    assert_eq!(candidates["total"], 3);

    let (status, session) = call(
        &app,
        "POST",
        &format!("/api/support/requests/{}/accept", request_id),
        t,
        Some(json!({ "supporter_id": uuid::Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["mode"], "supporter");
}

#[tokio::test(start_paused = true)]
async fn live_session_owns_request_status() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());
    let (_, created) = call(&app, "POST", "/api/requests", t, Some(coffee_request())).await;
    let request_id = created["id"].as_str().unwrap().to_string();

    let (_, candidates) = call(
        &app,
        "GET",
        &format!("/api/requests/{}/candidates", request_id),
        t,
        None,
    )
    .await;
    let chosen = candidates["items"][0]["id"].as_str().unwrap().to_string();
    let (status, confirmed) = call(
        &app,
        "POST",
        &format!("/api/requests/{}/candidates/{}/confirm", request_id, chosen),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = confirmed["session"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/requests/{}/status", request_id);
    for target in ["in_progress", "completed"] {
        let (status, _) = call(&app, "PATCH", &uri, t, Some(json!({ "status": target }))).await;
        assert_eq!(status, StatusCode::CONFLICT, "{target}");
    }
    let (_, request) = call(&app, "GET", &format!("/api/requests/{}", request_id), t, None).await;
    assert_eq!(request["status"], "matched");

    tokio::time::sleep(Duration::from_secs(16)).await;

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/complete", session_id),
        t,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/rating", session_id),
        t,
        Some(json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_input_is_bad_request() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());
    let rating_uri = format!("/api/sessions/{}/rating", uuid::Uuid::new_v4());

    for rating in [json!(300), json!(-1), json!("five")] {
        let (status, body) =
            call(&app, "POST", &rating_uri, t, Some(json!({ "rating": rating }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
        assert!(body["error"].is_string(), "rating {rating}");
    }

    let mut request = coffee_request();
    request["category"] = json!("karaoke");
    let (status, body) = call(&app, "POST", "/api/requests", t, Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = call(&app, "GET", "/api/support/requests?category=karaoke", t, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = call(&app, "GET", "/api/requests/not-a-uuid", t, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, list) = call(&app, "GET", "/api/requests", t, None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();
    let token = login(&app).await;
    let t = Some(token.as_str());
    let missing = uuid::Uuid::new_v4();

    let (status, _) = call(&app, "GET", &format!("/api/requests/{}", missing), t, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "GET", &format!("/api/sessions/{}", missing), t, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/rating", missing),
        t,
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Integration tests for the refind HTTP API.
//!
//! Each test drives the full router (routes + middleware + store) against
//! a throwaway data directory, without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "test-admin-token";

/// Router backed by a temp data directory. The TempDir must stay alive for
/// the duration of the test.
fn test_router() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut config = ServerConfig::default();
    config.data_dir = dir.path().to_string_lossy().into_owned();
    config.admin_tokens.insert(ADMIN_TOKEN.to_string());
    config.rate_limit_per_minute = 10_000;

    let state = Arc::new(ServerState::new(config).expect("server state"));
    (dir, build_router(state))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    admin_token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = admin_token {
        builder = builder.header("x-admin-token", token);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

fn report_payload(name: &str, category: &str, location: &str, date: &str) -> Value {
    json!({
        "itemName": name,
        "category": category,
        "description": format!("integration test report for {name}"),
        "date": date,
        "location": location,
        "contactName": "Test Contact",
        "contactEmail": "contact@example.com",
        "contactPhone": "555-0100",
    })
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
}

#[tokio::test]
async fn unknown_route_returns_standard_404() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, Method::GET, "/api/nothing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn register_and_login_flow() {
    let (_dir, router) = test_router();

    let payload = json!({
        "name": "Ada",
        "email": "Ada@Example.com",
        "password": "hunter22",
    });
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/register",
        Some(payload.clone()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password").is_none());

    // Duplicate email, different casing.
    let (status, body) = send(&router, Method::POST, "/api/auth/register", Some(payload), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "EMAIL_TAKEN");

    // Login succeeds with the registered password.
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "hunter22"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    // Wrong password.
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "WRONG_PASSWORD");

    // Unknown email.
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "hunter22"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");

    // The user listing never exposes passwords.
    let (status, body) = send(&router, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert!(body["users"][0].get("password").is_none());
}

#[tokio::test]
async fn register_validates_input() {
    let (_dir, router) = test_router();

    let cases = [
        json!({"name": "", "email": "a@b.co", "password": "longenough"}),
        json!({"name": "Ada", "email": "not-an-email", "password": "longenough"}),
        json!({"name": "Ada", "email": "a@b.co", "password": "short"}),
    ];

    for payload in cases {
        let (status, body) =
            send(&router, Method::POST, "/api/auth/register", Some(payload), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn report_submission_and_listing() {
    let (_dir, router) = test_router();

    let payload = report_payload("iPhone 12", "Electronics", "Library 2nd floor", "2024-01-10");
    let (status, body) = send(&router, Method::POST, "/api/items/lost", Some(payload), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Lost item reported successfully");
    assert_eq!(body["item"]["type"], "lost");
    assert_eq!(body["item"]["status"], "active");
    assert!(body["item"]["id"].as_str().is_some());

    let (status, body) = send(&router, Method::GET, "/api/items/lost", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // Found collection is independent.
    let (_, body) = send(&router, Method::GET, "/api/items/found", None, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    // Category outside the fixed set is rejected.
    let payload = report_payload("Ferret", "Pets", "Park", "2024-01-10");
    let (status, body) = send(&router, Method::POST, "/api/items/lost", Some(payload), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Empty required field is rejected.
    let payload = report_payload("", "Electronics", "Library", "2024-01-10");
    let (status, _) = send(&router, Method::POST, "/api/items/lost", Some(payload), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, Method::GET, "/api/items/matches", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_FAILED");

    let (status, _) = send(
        &router,
        Method::GET,
        "/api/items/matches",
        None,
        Some("wrong-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &router,
        Method::GET,
        "/api/items/matches",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn matching_ranks_the_iphone_pair_at_100() {
    let (_dir, router) = test_router();

    let lost = report_payload("iPhone 12", "Electronics", "Library 2nd floor", "2024-01-10");
    send(&router, Method::POST, "/api/items/lost", Some(lost), None).await;

    let found = report_payload("iphone", "Electronics", "library", "2024-01-12");
    send(&router, Method::POST, "/api/items/found", Some(found), None).await;

    // An unrelated found report that should not pair up.
    let noise = report_payload("Red Shoes", "Clothing", "South cafeteria", "2024-06-01");
    send(&router, Method::POST, "/api/items/found", Some(noise), None).await;

    let (status, body) = send(
        &router,
        Method::GET,
        "/api/items/matches",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMatches"], 1);

    let top = &body["matches"][0];
    assert_eq!(top["score"], 100);
    assert_eq!(top["reasons"].as_array().unwrap().len(), 4);
    assert_eq!(top["reasons"][3], "Date within 2 days");
    assert_eq!(top["lost"]["itemName"], "iPhone 12");
    assert_eq!(top["found"]["itemName"], "iphone");
}

#[tokio::test]
async fn reunite_resolves_the_pair_and_clears_matches() {
    let (_dir, router) = test_router();

    let lost = report_payload("House Keys", "Keys", "Gym locker", "2024-02-01");
    let (_, body) = send(&router, Method::POST, "/api/items/lost", Some(lost), None).await;
    let lost_id = body["item"]["id"].as_str().unwrap().to_string();

    let found = report_payload("keys", "Keys", "gym", "2024-02-03");
    let (_, body) = send(&router, Method::POST, "/api/items/found", Some(found), None).await;
    let found_id = body["item"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/items/reunite",
        Some(json!({"lostItemId": &lost_id, "foundItemId": &found_id})),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Items marked as reunited successfully");
    assert_eq!(body["lostItem"]["status"], "resolved");
    assert_eq!(body["foundItem"]["status"], "resolved");
    assert!(body["lostItem"]["resolvedAt"].as_str().is_some());
    assert_eq!(body["lostItem"]["matchedWith"]["id"], found_id);
    assert_eq!(body["foundItem"]["matchedWith"]["id"], lost_id);
    assert_eq!(body["foundItem"]["matchedWith"]["type"], "lost");

    // Resolved reports drop out of active listings and matching.
    let (_, body) = send(&router, Method::GET, "/api/items/lost?status=active", None, None).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    let (_, body) = send(
        &router,
        Method::GET,
        "/api/items/matches",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(body["totalMatches"], 0);

    // A second reunite of the same pair is rejected.
    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/items/reunite",
        Some(json!({"lostItemId": &lost_id, "foundItemId": &found_id})),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_RESOLVED");
}

#[tokio::test]
async fn reunite_with_unknown_ids_reports_which_side() {
    let (_dir, router) = test_router();

    let found = report_payload("Wallet", "Wallet/Purse", "Station", "2024-03-01");
    let (_, body) = send(&router, Method::POST, "/api/items/found", Some(found), None).await;
    let found_id = body["item"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/items/reunite",
        Some(json!({"lostItemId": "missing", "foundItemId": &found_id})),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "LOST_ITEM_NOT_FOUND");

    // The found record is untouched.
    let (_, body) = send(&router, Method::GET, "/api/items/found", None, None).await;
    assert_eq!(body["items"][0]["status"], "active");
}

//! End-to-end tests for the marketplace API.
//!
//! These tests require a running server (and its database) reachable at
//! `BEYOND_BASE_URL`; without it they skip. Each test registers its own
//! accounts under random emails so runs don't interfere.

#![allow(clippy::print_stderr)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use beyond_integration_tests::base_url;

macro_rules! require_server {
    () => {
        match base_url() {
            Some(url) => url,
            None => {
                eprintln!("BEYOND_BASE_URL not set; skipping");
                return;
            }
        }
    };
}

fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4().simple())
}

/// Register an account and return its userId.
async fn register(client: &Client, base: &str, email: &str) -> String {
    let resp = client
        .post(format!("{base}/register"))
        .json(&json!({ "name": "Test User", "email": email, "password": "hunter22" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("register body");
    body["userId"].as_str().expect("userId").to_owned()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let base = require_server!();
    let client = Client::new();

    let resp = client
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .expect("readiness request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let base = require_server!();
    let client = Client::new();
    let email = unique_email();

    register(&client, &base, &email).await;

    let resp = client
        .post(format!("{base}/register"))
        .json(&json!({ "name": "Test User", "email": email, "password": "hunter22" }))
        .send()
        .await
        .expect("duplicate register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn login_distinguishes_unknown_email_from_bad_password() {
    let base = require_server!();
    let client = Client::new();
    let email = unique_email();

    register(&client, &base, &email).await;

    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "Invalid credentials");

    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({ "email": unique_email(), "password": "hunter22" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn upload_requires_an_existing_owner() {
    let base = require_server!();
    let client = Client::new();

    let resp = client
        .post(format!("{base}/upload-experience"))
        .json(&json!({
            "userId": Uuid::new_v4().to_string(),
            "name": "Ghost tour",
            "price": 10.0,
            "type": "Walking",
            "description": "Led by nobody.",
            "location": "Nowhere",
            "maxPeople": 5,
            "gmapsLink": "https://maps.example/ghost"
        }))
        .send()
        .await
        .expect("upload request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn search_matches_description_substrings() {
    let base = require_server!();
    let client = Client::new();
    let email = unique_email();
    let user_id = register(&client, &base, &email).await;

    // The marker only appears in the description, never the title.
    let marker = Uuid::new_v4().simple().to_string();
    let resp = client
        .post(format!("{base}/upload-experience"))
        .json(&json!({
            "userId": user_id,
            "name": "Evening food walk",
            "price": 30.0,
            "type": "Food",
            "description": format!("Street food crawl, marker {marker}."),
            "location": "Porto",
            "maxPeople": 10,
            "gmapsLink": "https://maps.example/food",
            "images": ["aGVsbG8="]
        }))
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": marker.to_uppercase() }))
        .send()
        .await
        .expect("search request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let results: Vec<Value> = resp.json().await.expect("search body");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Evening food walk");

    // No-match query returns an empty array
    let resp = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": Uuid::new_v4().to_string() }))
        .send()
        .await
        .expect("search request failed");
    let results: Vec<Value> = resp.json().await.expect("search body");
    assert!(results.is_empty());
}

#[tokio::test]
async fn booking_requires_every_field() {
    let base = require_server!();
    let client = Client::new();

    let resp = client
        .post(format!("{base}/book-experience"))
        .json(&json!({
            "userId": "u-1",
            "expId": "e-1",
            "totalPeople": 2,
            "totalPrice": 80.0
            // date omitted
        }))
        .send()
        .await
        .expect("booking request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn upcoming_bookings_filter_by_date() {
    let base = require_server!();
    let client = Client::new();
    let account_id = Uuid::new_v4().to_string();

    // Bookings trust the caller; no listing needs to exist.
    for (date, _label) in [("2099-01-01", "future"), ("2001-01-01", "past")] {
        let resp = client
            .post(format!("{base}/book-experience"))
            .json(&json!({
                "userId": account_id,
                "expId": "e-1",
                "totalPeople": 2,
                "totalPrice": 80.0,
                "date": date
            }))
            .send()
            .await
            .expect("booking request failed");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{base}/bookings/upcoming"))
        .query(&[("userId", account_id.as_str())])
        .send()
        .await
        .expect("upcoming request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let bookings: Vec<Value> = resp.json().await.expect("upcoming body");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["date"], "2099-01-01");
    // Projection carries only the row id and the date
    assert!(bookings[0].get("totalPrice").is_none());
}

#[tokio::test]
async fn deleting_missing_records_is_not_found() {
    let base = require_server!();
    let client = Client::new();

    let resp = client
        .delete(format!("{base}/delete-user/{}", Uuid::new_v4()))
        .send()
        .await
        .expect("delete-user request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base}/delete-experience/{}", Uuid::new_v4()))
        .send()
        .await
        .expect("delete-experience request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

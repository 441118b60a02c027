// ABOUTME: HTTP integration tests for favorite route bookmarks
// ABOUTME: Covers creation, validation failures, listing, deletion, and ownership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use axum::Router;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{
    create_favorite, create_line, create_member, create_station, login, member_token, test_app,
};
use serde_json::{json, Value};

struct Scenario {
    app: Router,
    token: String,
    gyodae: i64,
    gangnam: i64,
}

/// Two stations joined by line 2 and one logged-in member
async fn scenario() -> Scenario {
    let app = test_app();
    let gyodae = create_station(&app, "교대역").await;
    let gangnam = create_station(&app, "강남역").await;
    create_line(&app, "2호선", "green", gyodae, gangnam, 10).await;
    let token = member_token(&app).await;

    Scenario {
        app,
        token,
        gyodae,
        gangnam,
    }
}

async fn list_favorites(app: &Router, token: &str) -> Vec<Value> {
    AxumTestRequest::get("/favorites")
        .bearer(token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

// ============================================================================
// POST /favorites
// ============================================================================

#[tokio::test]
async fn test_create_favorite_returns_created_with_location() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .json(&json!({"source": s.gyodae, "target": s.gangnam}))
        .send(s.app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    assert!(response.location().starts_with("/favorites/"));
    assert!(response.location_id() > 0);
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_create_favorite_with_identical_endpoints_is_rejected() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .json(&json!({"source": s.gyodae, "target": s.gyodae}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
    assert!(list_favorites(&s.app, &s.token).await.is_empty());
}

#[tokio::test]
async fn test_create_favorite_with_unknown_station_is_rejected() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .json(&json!({"source": s.gyodae, "target": -9999}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_create_favorite_between_disconnected_stations_is_rejected() {
    let s = scenario().await;
    let yeoksam = create_station(&s.app, "역삼역").await;
    let seolleung = create_station(&s.app, "선릉역").await;
    create_line(&s.app, "분당선", "yellow", yeoksam, seolleung, 5).await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .json(&json!({"source": s.gyodae, "target": seolleung}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_create_favorite_requires_token() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .json(&json!({"source": s.gyodae, "target": s.gangnam}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_create_favorite_with_forged_token_is_unauthorized() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer("not-a-real-token")
        .json(&json!({"source": s.gyodae, "target": s.gangnam}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_create_favorite_with_missing_field_is_bad_request() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .json(&json!({"source": s.gyodae}))
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(list_favorites(&s.app, &s.token).await.is_empty());
}

#[tokio::test]
async fn test_create_favorite_with_malformed_json_is_bad_request() {
    let s = scenario().await;

    let response = AxumTestRequest::post("/favorites")
        .bearer(&s.token)
        .raw_json("{\"source\": ")
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_create_favorite_without_token_checks_auth_before_body() {
    let s = scenario().await;

    let missing_field = AxumTestRequest::post("/favorites")
        .json(&json!({"source": s.gyodae}))
        .send(s.app.clone())
        .await;
    assert_eq!(missing_field.status(), 401);

    let malformed = AxumTestRequest::post("/favorites")
        .raw_json("not json")
        .send(s.app.clone())
        .await;
    assert_eq!(malformed.status(), 401);
}

// ============================================================================
// GET /favorites
// ============================================================================

#[tokio::test]
async fn test_list_favorites_resolves_stations() {
    let s = scenario().await;
    let favorite_id = create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;

    let favorites = list_favorites(&s.app, &s.token).await;

    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], favorite_id);
    assert_eq!(favorites[0]["source"]["id"], s.gyodae);
    assert_eq!(favorites[0]["source"]["name"], "교대역");
    assert_eq!(favorites[0]["target"]["id"], s.gangnam);
    assert_eq!(favorites[0]["target"]["name"], "강남역");
}

#[tokio::test]
async fn test_list_favorites_only_shows_own_bookmarks() {
    let s = scenario().await;
    create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;

    create_member(&s.app, "other@email.com", "password", 30).await;
    let other = login(&s.app, "other@email.com", "password").await;

    assert!(list_favorites(&s.app, &other).await.is_empty());
    assert_eq!(list_favorites(&s.app, &s.token).await.len(), 1);
}

#[tokio::test]
async fn test_list_favorites_requires_token() {
    let s = scenario().await;

    let response = AxumTestRequest::get("/favorites").send(s.app.clone()).await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// DELETE /favorites/:id
// ============================================================================

#[tokio::test]
async fn test_delete_favorite() {
    let s = scenario().await;
    let favorite_id = create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;

    let response = AxumTestRequest::delete(&format!("/favorites/{favorite_id}"))
        .bearer(&s.token)
        .send(s.app.clone())
        .await;
    assert_eq!(response.status(), 204);

    let ids: Vec<i64> = list_favorites(&s.app, &s.token)
        .await
        .iter()
        .filter_map(|favorite| favorite["id"].as_i64())
        .collect();
    assert!(!ids.contains(&favorite_id));
}

#[tokio::test]
async fn test_delete_unknown_favorite_is_rejected() {
    let s = scenario().await;

    let response = AxumTestRequest::delete("/favorites/-9999")
        .bearer(&s.token)
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_delete_favorite_twice_is_rejected() {
    let s = scenario().await;
    let favorite_id = create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;
    let uri = format!("/favorites/{favorite_id}");

    let first = AxumTestRequest::delete(&uri)
        .bearer(&s.token)
        .send(s.app.clone())
        .await;
    let second = AxumTestRequest::delete(&uri)
        .bearer(&s.token)
        .send(s.app.clone())
        .await;

    assert_eq!(first.status(), 204);
    assert_eq!(second.status(), 400);
}

#[tokio::test]
async fn test_delete_another_members_favorite_is_rejected() {
    let s = scenario().await;
    let favorite_id = create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;

    create_member(&s.app, "other@email.com", "password", 30).await;
    let other = login(&s.app, "other@email.com", "password").await;

    let response = AxumTestRequest::delete(&format!("/favorites/{favorite_id}"))
        .bearer(&other)
        .send(s.app.clone())
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(list_favorites(&s.app, &s.token).await.len(), 1);
}

#[tokio::test]
async fn test_deleting_member_drops_their_favorites() {
    let s = scenario().await;
    create_favorite(&s.app, &s.token, s.gyodae, s.gangnam).await;

    let me: Value = AxumTestRequest::get("/members/me")
        .bearer(&s.token)
        .send(s.app.clone())
        .await
        .json();
    let member_id = me["id"].as_i64().unwrap();

    AxumTestRequest::delete(&format!("/members/{member_id}"))
        .send(s.app.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The token still verifies but no longer resolves to a member.
    let response = AxumTestRequest::get("/favorites")
        .bearer(&s.token)
        .send(s.app.clone())
        .await;
    assert_eq!(response.status(), 401);
}

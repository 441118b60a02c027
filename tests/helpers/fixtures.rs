// ABOUTME: Shared application fixture for HTTP integration tests
// ABOUTME: Builds the full router with a stub OAuth provider and seeds members, stations, and lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use super::axum_test::AxumTestRequest;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use subway_route_server::{
    config::{AuthConfig, CorsConfig, Environment, GithubOAuthConfig, ServerConfig},
    errors::{AppError, AppResult},
    oauth::{OAuthIdentity, OAuthIdentityProvider},
    resources::ServerResources,
    server::build_router,
};

pub const EMAIL: &str = "user@email.com";
pub const PASSWORD: &str = "password";
pub const AGE: u32 = 20;

/// Authorization code the stub provider accepts
pub const GITHUB_CODE: &str = "832ovnq039hfjn";
/// Email the stub provider asserts for [`GITHUB_CODE`]
pub const GITHUB_EMAIL: &str = "octocat@github.com";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 8080,
        environment: Environment::Testing,
        request_timeout_secs: 30,
        auth: AuthConfig {
            jwt_secret: b"integration-test-secret-long-enough-for-hs256".to_vec(),
            secret_from_env: true,
            jwt_expiry_hours: 1,
        },
        github: GithubOAuthConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// OAuth provider answering from a fixed code table
pub struct StubIdentityProvider {
    identities: HashMap<String, OAuthIdentity>,
}

impl StubIdentityProvider {
    pub fn new() -> Self {
        let mut identities = HashMap::new();
        identities.insert(
            GITHUB_CODE.to_owned(),
            OAuthIdentity {
                email: GITHUB_EMAIL.to_owned(),
                login: "octocat".to_owned(),
            },
        );
        Self { identities }
    }
}

#[async_trait]
impl OAuthIdentityProvider for StubIdentityProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_identity(&self, code: &str) -> AppResult<OAuthIdentity> {
        self.identities
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::auth_invalid("Unknown authorization code"))
    }
}

/// Full application router over fresh in-memory state
pub fn test_app() -> Router {
    let resources = ServerResources::builder(test_config())
        .with_identity_provider(Arc::new(StubIdentityProvider::new()))
        .build();
    build_router(Arc::new(resources))
}

pub async fn create_member(app: &Router, email: &str, password: &str, age: u32) -> i64 {
    AxumTestRequest::post("/members")
        .json(&json!({"email": email, "password": password, "age": age}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .location_id()
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let body: Value = AxumTestRequest::post("/login/token")
        .json(&json!({"email": email, "password": password}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    body["accessToken"]
        .as_str()
        .expect("accessToken missing")
        .to_owned()
}

/// Register the default member and log in
pub async fn member_token(app: &Router) -> String {
    create_member(app, EMAIL, PASSWORD, AGE).await;
    login(app, EMAIL, PASSWORD).await
}

pub async fn create_station(app: &Router, name: &str) -> i64 {
    AxumTestRequest::post("/stations")
        .json(&json!({"name": name}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .location_id()
}

pub async fn create_line(
    app: &Router,
    name: &str,
    color: &str,
    up_station_id: i64,
    down_station_id: i64,
    distance: i64,
) -> i64 {
    AxumTestRequest::post("/lines")
        .json(&json!({
            "name": name,
            "color": color,
            "upStationId": up_station_id,
            "downStationId": down_station_id,
            "distance": distance,
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .location_id()
}

pub async fn create_favorite(app: &Router, token: &str, source: i64, target: i64) -> i64 {
    AxumTestRequest::post("/favorites")
        .bearer(token)
        .json(&json!({"source": source, "target": target}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .location_id()
}

// ABOUTME: Login route handlers issuing bearer tokens
// ABOUTME: Supports email/password login and GitHub OAuth code exchange with auto-provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Login routes
//!
//! Both endpoints answer with `{"accessToken": "..."}`. GitHub sign-in
//! creates a password-less member the first time an email is seen.

use super::json_body;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::extract::{rejection::JsonRejection, State};
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Email/password login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Member email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// GitHub login body
#[derive(Debug, Deserialize)]
pub struct GithubLoginRequest {
    /// Authorization code returned by GitHub
    pub code: String,
}

/// Token issued on successful login
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Bearer token
    pub access_token: String,
}

/// Login routes implementation
pub struct LoginRoutes;

impl LoginRoutes {
    /// Create all login routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/login/token", post(Self::handle_token_login))
            .route("/login/github", post(Self::handle_github_login))
            .with_state(resources)
    }

    /// Handle POST /login/token
    async fn handle_token_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> AppResult<Json<TokenResponse>> {
        let request = json_body(body)?;
        let member = match resources
            .members
            .authenticate(&request.email, &request.password)
            .await
        {
            Ok(member) => member,
            Err(e) => {
                AppLogger::log_auth_event(
                    &request.email,
                    "password_login",
                    false,
                    Some(&e.message),
                );
                return Err(e);
            }
        };

        let issued = resources.token_service.issue(&member.email)?;
        AppLogger::log_auth_event(&member.email, "password_login", true, None);
        Ok(Json(TokenResponse {
            access_token: issued.token,
        }))
    }

    /// Handle POST /login/github
    async fn handle_github_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<GithubLoginRequest>, JsonRejection>,
    ) -> AppResult<Json<TokenResponse>> {
        let request = json_body(body)?;
        if request.code.trim().is_empty() {
            return Err(AppError::missing_field("code"));
        }

        let provider = resources.identity_provider.name();
        let identity = match resources.identity_provider.fetch_identity(&request.code).await {
            Ok(identity) => identity,
            Err(e) => {
                AppLogger::log_oauth_event("unknown", provider, "code_exchange", false);
                return Err(e);
            }
        };

        let member = resources
            .members
            .find_or_create_by_email(&identity.email)
            .await?;
        let issued = resources.token_service.issue(&member.email)?;

        AppLogger::log_oauth_event(&member.email, provider, "login", true);
        info!(member_id = member.id, login = %identity.login, "OAuth login completed");
        Ok(Json(TokenResponse {
            access_token: issued.token,
        }))
    }
}

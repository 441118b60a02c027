// ABOUTME: GitHub OAuth client exchanging authorization codes and reading the user's email
// ABOUTME: Maps GitHub failures onto auth and external-service error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use super::{oauth_http_client, OAuthIdentity, OAuthIdentityProvider};
use crate::config::GithubOAuthConfig;
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("subway-route-server/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub token endpoint reply; GitHub answers 200 even for rejected codes
#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// Production [`OAuthIdentityProvider`] backed by the GitHub REST API
pub struct GithubOAuthClient {
    config: GithubOAuthConfig,
    client: Client,
}

impl GithubOAuthClient {
    /// Create a client for the configured GitHub application
    #[must_use]
    pub fn new(config: GithubOAuthConfig) -> Self {
        Self {
            config,
            client: oauth_http_client(),
        }
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let (Some(client_id), Some(client_secret)) =
            (&self.config.client_id, &self.config.client_secret)
        else {
            return Err(AppError::config(
                "GitHub OAuth requires GITHUB_CLIENT_ID and GITHUB_CLIENT_SECRET",
            ));
        };

        let params = [
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("code", code),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .header(header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let reply: TokenReply = check_status(response)?.json().await.map_err(|e| {
            AppError::external_service(service_names::GITHUB, format!("Invalid token reply: {e}"))
        })?;

        match (reply.access_token, reply.error) {
            (Some(token), None) => Ok(token),
            (_, error) => {
                let reason = reply
                    .error_description
                    .or(error)
                    .unwrap_or_else(|| "no access token returned".to_owned());
                warn!("GitHub rejected authorization code: {}", reason);
                Err(AppError::auth_invalid(format!(
                    "GitHub rejected the authorization code: {reason}"
                )))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> AppResult<T> {
        let url = format!("{}{path}", self.config.api_base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response)?.json().await.map_err(|e| {
            AppError::external_service(service_names::GITHUB, format!("Invalid {path} reply: {e}"))
        })
    }

    async fn primary_email(&self, token: &str) -> AppResult<String> {
        let emails: Vec<GithubEmail> = self.get_json("/user/emails", token).await?;
        emails
            .into_iter()
            .find(|e| e.primary && e.verified)
            .map(|e| e.email)
            .ok_or_else(|| {
                AppError::auth_invalid("GitHub account has no verified primary email")
            })
    }
}

#[async_trait]
impl OAuthIdentityProvider for GithubOAuthClient {
    fn name(&self) -> &'static str {
        service_names::GITHUB
    }

    async fn fetch_identity(&self, code: &str) -> AppResult<OAuthIdentity> {
        let token = self.exchange_code(code).await?;
        let user: GithubUser = self.get_json("/user", &token).await?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => self.primary_email(&token).await?,
        };

        debug!(login = %user.login, "Resolved GitHub identity");
        Ok(OAuthIdentity {
            email,
            login: user.login,
        })
    }
}

fn transport_error(error: reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::external_unavailable(service_names::GITHUB, error.to_string())
    } else {
        AppError::external_service(service_names::GITHUB, error.to_string())
    }
}

fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("GitHub responded with status {}", status);
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::auth_invalid("GitHub refused the access token")
        }
        s if s.is_server_error() => AppError::external_unavailable(
            service_names::GITHUB,
            format!("GitHub unavailable ({s})"),
        ),
        s => AppError::external_service(service_names::GITHUB, format!("Unexpected status {s}")),
    })
}

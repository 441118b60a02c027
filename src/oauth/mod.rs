// ABOUTME: Third-party sign-in abstraction resolving an authorization code to an identity
// ABOUTME: GitHub is the production provider; tests substitute a stub implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # OAuth Sign-In
//!
//! The login route only needs one thing from an OAuth provider: given the
//! authorization code a browser brought back, who is this person? The
//! [`OAuthIdentityProvider`] trait captures exactly that.

/// GitHub implementation
pub mod github;

pub use github::GithubOAuthClient;

use crate::errors::AppResult;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Identity asserted by an OAuth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthIdentity {
    /// Verified email, used as the member principal
    pub email: String,
    /// Provider account name
    pub login: String,
}

/// Resolves an authorization code into an identity
#[async_trait]
pub trait OAuthIdentityProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Exchange `code` and read the signed-in profile
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the provider rejects the code and an
    /// `ExternalService*` error when the provider cannot be reached or
    /// answers unexpectedly
    async fn fetch_identity(&self, code: &str) -> AppResult<OAuthIdentity>;
}

/// HTTP client with the short timeouts suited to token exchanges
#[must_use]
pub fn oauth_http_client() -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|_| Client::new())
}

// ABOUTME: OAuth configuration for GitHub sign-in
// ABOUTME: Client credentials plus token and API endpoints, overridable for staging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::config::environment::env_var_or;
use crate::constants::defaults;
use std::env;
use tracing::warn;

/// GitHub OAuth application settings
#[derive(Debug, Clone)]
pub struct GithubOAuthConfig {
    /// OAuth client ID
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Code-for-token exchange endpoint
    pub token_url: String,
    /// REST API base used to read the signed-in profile
    pub api_base_url: String,
}

impl GithubOAuthConfig {
    /// Load GitHub OAuth configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            client_id: env::var("GITHUB_CLIENT_ID").ok().filter(|v| !v.is_empty()),
            client_secret: env::var("GITHUB_CLIENT_SECRET")
                .ok()
                .filter(|v| !v.is_empty()),
            token_url: env_var_or("GITHUB_TOKEN_URL", defaults::GITHUB_TOKEN_URL),
            api_base_url: env_var_or("GITHUB_API_URL", defaults::GITHUB_API_URL),
        }
    }

    /// Whether both client credentials are present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Log a warning when GitHub login cannot work
    pub fn warn_if_unconfigured(&self) {
        if !self.is_configured() {
            warn!("GitHub OAuth is missing GITHUB_CLIENT_ID or GITHUB_CLIENT_SECRET; /login/github will fail");
        }
    }
}

impl Default for GithubOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: defaults::GITHUB_TOKEN_URL.to_owned(),
            api_base_url: defaults::GITHUB_API_URL.to_owned(),
        }
    }
}

// ABOUTME: Centralized resource container shared by every route group
// ABOUTME: Wires the token service, member store, subway network, and favorites together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # Server Resources
//!
//! Everything a handler needs is built once here and shared behind `Arc`.
//! The subway network is shared twice: as the station/line registry and as
//! the [`RouteOracle`](crate::favorites::RouteOracle) the favorites service
//! validates against.

use crate::auth::{AuthManager, TokenService};
use crate::config::ServerConfig;
use crate::favorites::FavoriteService;
use crate::members::MemberStore;
use crate::middleware::AuthMiddleware;
use crate::oauth::{GithubOAuthClient, OAuthIdentityProvider};
use crate::subway::SubwayNetwork;
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Token issuance and verification
    pub token_service: Arc<dyn TokenService>,
    /// Bearer token resolution for protected routes
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Member registry
    pub members: Arc<MemberStore>,
    /// Stations and lines
    pub network: Arc<SubwayNetwork>,
    /// Favorite bookmarks
    pub favorites: Arc<FavoriteService>,
    /// OAuth identity provider used by `/login/github`
    pub identity_provider: Arc<dyn OAuthIdentityProvider>,
}

impl ServerResources {
    /// Build production resources from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::builder(config).build()
    }

    /// Start a builder, for swapping collaborators in tests
    #[must_use]
    pub fn builder(config: ServerConfig) -> ServerResourcesBuilder {
        ServerResourcesBuilder {
            config,
            identity_provider: None,
            token_service: None,
        }
    }
}

/// Builder for [`ServerResources`]
pub struct ServerResourcesBuilder {
    config: ServerConfig,
    identity_provider: Option<Arc<dyn OAuthIdentityProvider>>,
    token_service: Option<Arc<dyn TokenService>>,
}

impl ServerResourcesBuilder {
    /// Use a custom OAuth identity provider instead of GitHub
    #[must_use]
    pub fn with_identity_provider(mut self, provider: Arc<dyn OAuthIdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    /// Use a custom token service instead of the configured JWT signer
    #[must_use]
    pub fn with_token_service(mut self, token_service: Arc<dyn TokenService>) -> Self {
        self.token_service = Some(token_service);
        self
    }

    /// Assemble the resources
    #[must_use]
    pub fn build(self) -> ServerResources {
        let config = Arc::new(self.config);

        let token_service: Arc<dyn TokenService> = match self.token_service {
            Some(token_service) => token_service,
            None => Arc::new(AuthManager::new(
                &config.auth.jwt_secret,
                config.auth.jwt_expiry_hours,
            )),
        };
        let identity_provider: Arc<dyn OAuthIdentityProvider> = match self.identity_provider {
            Some(provider) => provider,
            None => Arc::new(GithubOAuthClient::new(config.github.clone())),
        };

        let members = Arc::new(MemberStore::new());
        let network = Arc::new(SubwayNetwork::new());
        let favorites = Arc::new(FavoriteService::new(network.clone()));
        let auth_middleware = Arc::new(AuthMiddleware::new(
            token_service.clone(),
            members.clone(),
        ));

        ServerResources {
            config,
            token_service,
            auth_middleware,
            members,
            network,
            favorites,
            identity_provider,
        }
    }
}

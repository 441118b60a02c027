// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads server, authentication, OAuth, and CORS settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Configuration module for the subway route server
//!
//! Configuration is environment-only:
//!
//! - **Environment**: server ports, deployment environment, timeouts
//! - **Security**: JWT secret and lifetime, CORS origins
//! - **OAuth**: GitHub client credentials and endpoints

/// Environment and server configuration
pub mod environment;
/// GitHub OAuth client configuration
pub mod oauth;
/// JWT and CORS configuration
pub mod security;

pub use environment::{Environment, ServerConfig};
pub use oauth::GithubOAuthConfig;
pub use security::{AuthConfig, CorsConfig};

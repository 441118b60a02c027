// ABOUTME: Security configuration types for token signing and cross-origin access
// ABOUTME: Handles the JWT secret, token lifetime, and CORS origin list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::config::environment::env_var_or;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;

/// Authentication configuration for JWT tokens
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign tokens
    pub jwt_secret: Vec<u8>,
    /// Whether the secret came from `JWT_SECRET` rather than being generated
    pub secret_from_env: bool,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

// Keeps the secret out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("secret_from_env", &self.secret_from_env)
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

impl AuthConfig {
    /// Load authentication configuration from environment
    ///
    /// When `JWT_SECRET` is unset a random secret is generated, so tokens do
    /// not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_EXPIRY_HOURS` is not an integer or the system
    /// RNG fails
    pub fn from_env() -> AppResult<Self> {
        let jwt_expiry_hours = env_var_or("JWT_EXPIRY_HOURS", &defaults::JWT_EXPIRY_HOURS.to_string())
            .parse::<i64>()
            .map_err(|e| AppError::config(format!("Invalid JWT_EXPIRY_HOURS value: {e}")))?;

        let (jwt_secret, secret_from_env) = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => (secret.into_bytes(), true),
            _ => (crate::auth::generate_jwt_secret()?.to_vec(), false),
        };

        Ok(Self {
            jwt_secret,
            secret_from_env,
            jwt_expiry_hours,
        })
    }
}

/// Cross-origin resource sharing configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Load CORS configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

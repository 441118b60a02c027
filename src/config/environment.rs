// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a validated ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Environment-based configuration management for production deployment

use crate::config::{AuthConfig, CorsConfig, GithubOAuthConfig};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use tracing::info;

/// Environment type for security and logging decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// GitHub OAuth configuration
    pub github: GithubOAuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", defaults::HOST),
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .map_err(|e| AppError::config(format!("Invalid HTTP_PORT value: {e}")))?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &defaults::REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .map_err(|e| AppError::config(format!("Invalid REQUEST_TIMEOUT_SECS value: {e}")))?,
            auth: AuthConfig::from_env()?,
            github: GithubOAuthConfig::from_env(),
            cors: CorsConfig::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the port is zero, the token lifetime is not
    /// positive, an explicit JWT secret is too short, or a GitHub endpoint is
    /// not a valid URL
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::config("HTTP_PORT must be non-zero"));
        }

        if self.auth.jwt_expiry_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.auth.secret_from_env && self.auth.jwt_secret.len() < defaults::MIN_JWT_SECRET_LEN
        {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} bytes",
                defaults::MIN_JWT_SECRET_LEN
            )));
        }

        for (name, value) in [
            ("GITHUB_TOKEN_URL", &self.github.token_url),
            ("GITHUB_API_URL", &self.github.api_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AppError::config(format!("Invalid {name} value: {e}")))?;
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Subway Route Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Request Timeout: {}s\n\
             - JWT Expiry: {}h ({})\n\
             - GitHub OAuth: {}\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.request_timeout_secs,
            self.auth.jwt_expiry_hours,
            if self.auth.secret_from_env {
                "configured secret"
            } else {
                "ephemeral secret"
            },
            if self.github.is_configured() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.cors.allowed_origins
        )
    }
}

/// Get environment variable or default value
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

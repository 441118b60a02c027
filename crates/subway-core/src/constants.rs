// ABOUTME: Application constants organized by domain
// ABOUTME: Service names, default limits, and user-facing error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Constants grouped by domain rather than kept in one flat list.

/// Service identifiers used in logs and token audiences
pub mod service_names {
    /// Name reported in startup logs
    pub const SUBWAY_ROUTE_SERVER: &str = "subway-route-server";
    /// Audience claim carried by every issued token
    pub const TOKEN_AUDIENCE: &str = "subway-route-server";
    /// Name used when reporting GitHub failures
    pub const GITHUB: &str = "github";
    /// Name used when the connectivity oracle fails
    pub const ROUTE_ORACLE: &str = "route-oracle";
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default token lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Minimum accepted length of an explicitly configured JWT secret
    pub const MIN_JWT_SECRET_LEN: usize = 32;
    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// GitHub OAuth token exchange endpoint
    pub const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
    /// GitHub REST API base URL
    pub const GITHUB_API_URL: &str = "https://api.github.com";
}

/// User-facing error messages
pub mod error_messages {
    /// Favorite endpoints are the same station
    pub const IDENTICAL_ENDPOINTS: &str =
        "Source and target stations must differ (identical endpoints)";
    /// Favorite endpoints are unknown or unreachable
    pub const UNREACHABLE_STATIONS: &str =
        "Source and target stations are unreachable or unknown station";
    /// Favorite missing or owned by another member
    pub const FAVORITE_NOT_FOUND: &str = "Favorite not found";
    /// Favorite owner was deleted while the request was in flight
    pub const FAVORITE_OWNER_REMOVED: &str = "Member no longer exists";
    /// Login failed
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// Malformed email address
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    /// Password missing
    pub const EMPTY_PASSWORD: &str = "Password must not be empty";
}

/// Time conversion helpers
pub mod time_constants {
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: i64 = 3600;
}

/// Name of the request id header
pub const REQUEST_ID_HEADER: &str = "x-request-id";

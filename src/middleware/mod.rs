// ABOUTME: HTTP middleware for request tracing, authentication, and CORS
// ABOUTME: Provides request ID generation, request spans, and bearer token resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

/// Bearer token authentication
pub mod auth;
/// Cross-origin policy
pub mod cors;
/// Request ids and spans
pub mod tracing;

pub use auth::{AuthMiddleware, AuthenticatedMember};
pub use cors::setup_cors;
pub use self::tracing::{create_request_span, MakeRequestUuid};

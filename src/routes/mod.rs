// ABOUTME: Route module organization for the subway route server HTTP endpoints
// ABOUTME: Groups handlers by domain and shares the authentication and Location helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Routes organized by domain
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the member store, subway network, or favorites service.

/// Login routes
pub mod auth;
/// Favorite route bookmarks
pub mod favorites;
/// Health check routes
pub mod health;
/// Line and section routes
pub mod lines;
/// Member routes
pub mod members;
/// Station routes
pub mod stations;

pub use auth::LoginRoutes;
pub use favorites::FavoriteRoutes;
pub use health::HealthRoutes;
pub use lines::LineRoutes;
pub use members::MemberRoutes;
pub use stations::StationRoutes;

use crate::errors::{AppError, AppResult};
use crate::middleware::{tracing::record_member, AuthenticatedMember};
use crate::resources::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Resolve the bearer token on a request to the calling member
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<AuthenticatedMember> {
    let member = resources.auth_middleware.authenticate_headers(headers).await?;
    record_member(member.member_id);
    Ok(member)
}

/// `201 Created` with a `Location` header and an optional JSON body
pub(crate) fn created<T: Serialize>(location: String, body: Option<T>) -> Response {
    let headers = [(header::LOCATION, location)];
    match body {
        Some(body) => (StatusCode::CREATED, headers, Json(body)).into_response(),
        None => (StatusCode::CREATED, headers).into_response(),
    }
}

/// Unwrap a JSON request body, reporting rejections as `INVALID_INPUT`
///
/// Handlers take the body as `Result<Json<T>, JsonRejection>` so malformed
/// bodies answer 400 through the common error envelope.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()).with_source(rejection))
}

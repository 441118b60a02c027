// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Generates request IDs and builds the per-request span used by the trace layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::constants::REQUEST_ID_HEADER;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Generates `req_<uuid>` identifiers for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&new_request_id())
            .ok()
            .map(RequestId::new)
    }
}

/// Fresh request identifier
#[must_use]
pub fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Create the tracing span for an HTTP request
///
/// The request id has already been assigned by the request-id layer, so it
/// is read straight from the headers.
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        member_id = tracing::field::Empty,
    )
}

/// Record the authenticated member on the current request span
pub fn record_member(member_id: i64) {
    Span::current().record("member_id", member_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert!(a.starts_with("req_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_make_request_id_produces_header_value() {
        let request = Request::builder().uri("/health").body(()).unwrap();
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        assert!(id.header_value().to_str().unwrap().starts_with("req_"));
    }
}

// ABOUTME: Bearer token authentication for protected routes
// ABOUTME: Verifies the token principal and resolves it to a registered member
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::auth::TokenService;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::members::MemberStore;
use axum::http::{header, HeaderMap};
use std::sync::Arc;

/// The caller behind a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedMember {
    /// Member identifier
    pub member_id: i64,
    /// Token principal (the member's email)
    pub email: String,
}

/// Middleware resolving `Authorization: Bearer` headers to members
#[derive(Clone)]
pub struct AuthMiddleware {
    token_service: Arc<dyn TokenService>,
    members: Arc<MemberStore>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub fn new(token_service: Arc<dyn TokenService>, members: Arc<MemberStore>) -> Self {
        Self {
            token_service,
            members,
        }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns an `Auth*` error when the header is missing or malformed, the
    /// token does not verify, or its principal is no longer a member
    pub async fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> AppResult<AuthenticatedMember> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        self.authenticate_request(auth_header).await
    }

    /// Authenticate a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_headers`]
    #[tracing::instrument(
        skip(self, auth_header),
        fields(member_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(
        &self,
        auth_header: Option<&str>,
    ) -> AppResult<AuthenticatedMember> {
        let Some(auth_str) = auth_header else {
            tracing::warn!("Authentication failed: Missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = bearer_token(auth_str) else {
            tracing::Span::current().record("success", false);
            AppLogger::log_security_event(
                "invalid_auth_header",
                "expected 'Bearer <token>'",
                None,
            );
            return Err(AppError::auth_malformed(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };

        let email = self.token_service.verify(token.trim()).inspect_err(|e| {
            tracing::Span::current().record("success", false);
            AppLogger::log_security_event("token_rejected", &e.message, None);
        })?;

        let member = self.members.find_by_email(&email).await.ok_or_else(|| {
            AppLogger::log_security_event(
                "unknown_principal",
                "token principal has no member",
                Some(&email),
            );
            AppError::auth_invalid("Token principal is not a registered member")
        })?;

        tracing::Span::current()
            .record("member_id", member.id)
            .record("success", true);
        tracing::debug!("Bearer authentication successful for member: {}", member.id);

        Ok(AuthenticatedMember {
            member_id: member.id,
            email,
        })
    }
}

/// Token following a case-insensitive `Bearer` scheme
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthManager;
    use crate::errors::ErrorCode;
    use crate::members::MemberDraft;

    async fn middleware() -> (AuthMiddleware, AuthManager) {
        let manager = AuthManager::new(b"middleware-test-secret-with-32-bytes!!", 1);
        let members = Arc::new(MemberStore::new());
        members
            .create(MemberDraft {
                email: "user@email.com".into(),
                password: "password".into(),
                age: Some(20),
            })
            .await
            .unwrap();
        (
            AuthMiddleware::new(Arc::new(manager.clone()), members),
            manager,
        )
    }

    #[tokio::test]
    async fn test_valid_bearer_token() {
        let (middleware, manager) = middleware().await;
        let token = manager.generate_token("user@email.com").unwrap().token;

        let member = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(member.member_id, 1);
        assert_eq!(member.email, "user@email.com");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers() {
        let (middleware, _) = middleware().await;

        let missing = middleware.authenticate_request(None).await.unwrap_err();
        assert_eq!(missing.code, ErrorCode::AuthRequired);

        let basic = middleware
            .authenticate_request(Some("Basic dXNlcjpwYXNz"))
            .await
            .unwrap_err();
        assert_eq!(basic.http_status(), 401);
    }

    #[tokio::test]
    async fn test_bearer_scheme_is_case_insensitive() {
        let (middleware, manager) = middleware().await;
        let token = manager.generate_token("user@email.com").unwrap().token;

        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let member = middleware
                .authenticate_request(Some(&format!("{scheme} {token}")))
                .await
                .unwrap();
            assert_eq!(member.member_id, 1);
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearerabc"), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }

    #[tokio::test]
    async fn test_token_for_unknown_member() {
        let (middleware, manager) = middleware().await;
        let token = manager.generate_token("ghost@email.com").unwrap().token;

        let error = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::AuthInvalid);
    }
}

// ABOUTME: Member route handlers for registration, profile lookup, and account removal
// ABOUTME: GET /members/me resolves the bearer token to the calling member
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use super::{authenticate, created, json_body};
use crate::errors::AppResult;
use crate::members::{Member, MemberDraft};
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration and update body
#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Optional age
    pub age: Option<u32>,
}

impl From<MemberRequest> for MemberDraft {
    fn from(request: MemberRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            age: request.age,
        }
    }
}

/// Public view of a member
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    /// Member identifier
    pub id: i64,
    /// Email address
    pub email: String,
    /// Age, when known
    pub age: Option<u32>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            email: member.email,
            age: member.age,
        }
    }
}

/// Member routes implementation
pub struct MemberRoutes;

impl MemberRoutes {
    /// Create all member routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/members", post(Self::handle_create))
            .route("/members/me", get(Self::handle_me))
            .route(
                "/members/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /members
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<MemberRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let request = json_body(body)?;
        let member = resources.members.create(request.into()).await?;
        Ok(created(
            format!("/members/{}", member.id),
            Some(MemberResponse::from(member)),
        ))
    }

    /// Handle GET /members/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<MemberResponse>> {
        let auth = authenticate(&headers, &resources).await?;
        let member = resources.members.get(auth.member_id).await?;
        Ok(Json(member.into()))
    }

    /// Handle GET /members/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<Json<MemberResponse>> {
        Ok(Json(resources.members.get(id).await?.into()))
    }

    /// Handle PUT /members/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        body: Result<Json<MemberRequest>, JsonRejection>,
    ) -> AppResult<Json<MemberResponse>> {
        let request = json_body(body)?;
        let member = resources.members.update(id, request.into()).await?;
        Ok(Json(member.into()))
    }

    /// Handle DELETE /members/:id, dropping the member's favorites too
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<StatusCode> {
        let member = resources.members.delete(id).await?;
        resources.favorites.remove_all_for_owner(member.id).await;
        Ok(StatusCode::NO_CONTENT)
    }
}

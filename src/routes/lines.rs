// ABOUTME: Line and section route handlers
// ABOUTME: Line CRUD plus adding and removing stations through sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use super::{created, json_body};
use crate::errors::AppResult;
use crate::resources::ServerResources;
use crate::subway::{LineDraft, LineView};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Line creation body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    /// First terminal
    pub up_station_id: i64,
    /// Last terminal
    pub down_station_id: i64,
    /// Distance between the terminals
    pub distance: i64,
}

/// Line rename/recolor body
#[derive(Debug, Deserialize)]
pub struct LineUpdateRequest {
    /// New name
    pub name: String,
    /// New color
    pub color: String,
}

/// Section creation body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    /// Up station
    pub up_station_id: i64,
    /// Down station
    pub down_station_id: i64,
    /// Distance between the two
    pub distance: i64,
}

/// `?stationId=` for section removal
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSectionQuery {
    /// Station to take off the line
    pub station_id: i64,
}

/// Line routes implementation
pub struct LineRoutes;

impl LineRoutes {
    /// Create all line routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/lines", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/lines/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/lines/:id/sections",
                post(Self::handle_add_section).delete(Self::handle_remove_section),
            )
            .with_state(resources)
    }

    /// Handle POST /lines
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LineRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let request = json_body(body)?;
        let line = resources
            .network
            .create_line(LineDraft {
                name: request.name,
                color: request.color,
                up_station_id: request.up_station_id,
                down_station_id: request.down_station_id,
                distance: request.distance,
            })
            .await?;
        Ok(created(format!("/lines/{}", line.id), Some(line)))
    }

    /// Handle GET /lines
    async fn handle_list(State(resources): State<Arc<ServerResources>>) -> Json<Vec<LineView>> {
        Json(resources.network.list_lines().await)
    }

    /// Handle GET /lines/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<Json<LineView>> {
        Ok(Json(resources.network.get_line(id).await?))
    }

    /// Handle PUT /lines/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        body: Result<Json<LineUpdateRequest>, JsonRejection>,
    ) -> AppResult<Json<LineView>> {
        let request = json_body(body)?;
        let line = resources
            .network
            .update_line(id, &request.name, &request.color)
            .await?;
        Ok(Json(line))
    }

    /// Handle DELETE /lines/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<StatusCode> {
        resources.network.delete_line(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// Handle POST /lines/:id/sections
    async fn handle_add_section(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        body: Result<Json<SectionRequest>, JsonRejection>,
    ) -> AppResult<Json<LineView>> {
        let request = json_body(body)?;
        let line = resources
            .network
            .add_section(
                id,
                request.up_station_id,
                request.down_station_id,
                request.distance,
            )
            .await?;
        Ok(Json(line))
    }

    /// Handle DELETE /lines/:id/sections?stationId=
    async fn handle_remove_section(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Query(query): Query<RemoveSectionQuery>,
    ) -> AppResult<StatusCode> {
        resources.network.remove_section(id, query.station_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

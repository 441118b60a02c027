// ABOUTME: Station route handlers
// ABOUTME: Create, list, and delete subway stations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use super::{created, json_body};
use crate::errors::AppResult;
use crate::resources::ServerResources;
use crate::subway::Station;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Station creation body
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    /// Display name
    pub name: String,
}

/// Station as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    /// Station identifier
    pub id: i64,
    /// Display name; `None` once the station has been deleted
    pub name: Option<String>,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: Some(station.name),
        }
    }
}

/// Station routes implementation
pub struct StationRoutes;

impl StationRoutes {
    /// Create all station routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/stations",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/stations/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /stations
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<StationRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let request = json_body(body)?;
        let station = resources.network.create_station(&request.name).await?;
        Ok(created(
            format!("/stations/{}", station.id),
            Some(StationResponse::from(station)),
        ))
    }

    /// Handle GET /stations
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<Vec<StationResponse>> {
        let stations = resources.network.list_stations().await;
        Json(stations.into_iter().map(Into::into).collect())
    }

    /// Handle DELETE /stations/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<StatusCode> {
        resources.network.delete_station(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

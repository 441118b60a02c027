// ABOUTME: Favorite route handlers; every endpoint requires a bearer token
// ABOUTME: Maps create, list, and delete onto the favorites service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Favorites routes
//!
//! Validation failures and unknown or foreign favorite ids both answer
//! `400 Bad Request`; a missing or invalid token answers `401`.

use super::stations::StationResponse;
use super::{authenticate, created, json_body};
use crate::errors::AppResult;
use crate::favorites::Favorite;
use crate::resources::ServerResources;
use crate::subway::SubwayNetwork;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Favorite creation body
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    /// Departure station id
    pub source: i64,
    /// Arrival station id
    pub target: i64,
}

/// Favorite with its stations resolved
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    /// Favorite identifier
    pub id: i64,
    /// Departure station
    pub source: StationResponse,
    /// Arrival station
    pub target: StationResponse,
}

/// Favorite routes implementation
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorite routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/favorites",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/favorites/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /favorites
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<FavoriteRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let auth = authenticate(&headers, &resources).await?;
        let request = json_body(body)?;
        let favorite = resources
            .favorites
            .create(auth.member_id, request.source, request.target)
            .await?;
        Ok(created::<()>(format!("/favorites/{}", favorite.id), None))
    }

    /// Handle GET /favorites
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<Vec<FavoriteResponse>>> {
        let auth = authenticate(&headers, &resources).await?;
        let favorites = resources.favorites.list_by_owner(auth.member_id).await;

        let mut response = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            response.push(Self::resolve(&resources.network, &favorite).await);
        }
        Ok(Json(response))
    }

    /// Handle DELETE /favorites/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> AppResult<StatusCode> {
        let auth = authenticate(&headers, &resources).await?;
        resources.favorites.delete(auth.member_id, id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn resolve(network: &SubwayNetwork, favorite: &Favorite) -> FavoriteResponse {
        FavoriteResponse {
            id: favorite.id,
            source: Self::station(network, favorite.source_station_id).await,
            target: Self::station(network, favorite.target_station_id).await,
        }
    }

    async fn station(network: &SubwayNetwork, id: i64) -> StationResponse {
        network
            .find_station(id)
            .await
            .map_or(StationResponse { id, name: None }, StationResponse::from)
    }
}

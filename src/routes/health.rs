// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! Health check routes for service monitoring

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes() -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
    }

    async fn handle_health() -> Json<Value> {
        Json(Self::status("healthy"))
    }

    async fn handle_ready() -> Json<Value> {
        Json(Self::status("ready"))
    }

    fn status(status: &str) -> Value {
        json!({
            "status": status,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })
    }
}

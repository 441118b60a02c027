// ABOUTME: Router assembly and HTTP server lifecycle
// ABOUTME: Merges every route group, applies the middleware stack, and serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::config::ServerConfig;
use crate::constants::{service_names, REQUEST_ID_HEADER};
use crate::errors::{AppError, AppResult};
use crate::middleware::{create_request_span, setup_cors, MakeRequestUuid};
use crate::resources::ServerResources;
use crate::routes::{
    FavoriteRoutes, HealthRoutes, LineRoutes, LoginRoutes, MemberRoutes, StationRoutes,
};
use axum::body::Body;
use axum::http::HeaderName;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the complete application router
///
/// Layers run outermost first: the request id is assigned before the trace
/// span is opened, so every log line of a request carries it.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(LoginRoutes::routes(resources.clone()))
        .merge(MemberRoutes::routes(resources.clone()))
        .merge(StationRoutes::routes(resources.clone()))
        .merge(LineRoutes::routes(resources.clone()))
        .merge(FavoriteRoutes::routes(resources))
        .layer(cors)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span::<Body>))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn run(config: ServerConfig) -> AppResult<()> {
    let addr = format!("{}:{}", config.host, config.http_port);
    let resources = Arc::new(ServerResources::new(config));
    let app = build_router(resources);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::config(format!("Failed to bind {addr}: {e}")).with_source(e)
    })?;

    info!(
        service = service_names::SUBWAY_ROUTE_SERVER,
        %addr,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")).with_source(e))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

// ABOUTME: Main library entry point for the subway route server
// ABOUTME: Exposes members, authentication, subway network, and favorite route REST APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

#![deny(unsafe_code)]

//! # Subway Route Server
//!
//! A REST backend for managing subway stations and lines, member accounts, and
//! per-member "favorite route" bookmarks between two stations.
//!
//! ## Features
//!
//! - **Members**: registration, profile lookup, password login
//! - **`OAuth2` login**: GitHub sign-in with automatic member provisioning
//! - **Subway network**: stations, lines, and ordered line sections
//! - **Favorites**: bookmarks validated against the live line network
//!
//! ## Architecture
//!
//! - **auth**: JWT issuance and verification behind the `TokenService` trait
//! - **favorites**: the favorite entity, its collection, and validation rules
//! - **subway**: station/line registry acting as the `RouteOracle`
//! - **routes**: thin axum handlers delegating to the layers above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use subway_route_server::config::environment::ServerConfig;
//! use subway_route_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Subway route server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and token management
pub mod auth;

/// Configuration management
pub mod config;

/// Favorite route bookmarks: entity, collection, and validation service
pub mod favorites;

/// Production logging and structured output
pub mod logging;

/// Member accounts and password handling
pub mod members;

/// HTTP middleware for authentication, CORS, and request tracing
pub mod middleware;

/// Third-party identity providers for OAuth login
pub mod oauth;

/// Shared server state handed to every route group
pub mod resources;

/// `HTTP` routes grouped by domain
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Subway stations, lines, sections, and the connectivity oracle
pub mod subway;

/// Re-export of the core error taxonomy
pub use subway_core::errors;

/// Re-export of the core constants
pub use subway_core::constants;

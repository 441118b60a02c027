// ABOUTME: Connectivity capability consulted before a favorite is stored
// ABOUTME: Answers station existence and reachability without exposing graph search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::errors::AppResult;
use async_trait::async_trait;

/// Read-only view of the line network used to validate favorites
///
/// Implementations report infrastructure failures as `Err`; a station that
/// simply does not exist or a pair that is not connected is `Ok(false)`.
#[async_trait]
pub trait RouteOracle: Send + Sync {
    /// Whether a station with this id exists
    async fn station_exists(&self, station_id: i64) -> AppResult<bool>;

    /// Whether any path joins `source` and `target`
    async fn are_connected(&self, source: i64, target: i64) -> AppResult<bool>;
}

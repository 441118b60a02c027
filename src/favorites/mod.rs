// ABOUTME: Favorite route bookmarks with connectivity validation
// ABOUTME: Service layer that validates through a RouteOracle before mutating the shared collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # Favorites
//!
//! A favorite is a `(member, source station, target station)` triple. It is
//! validated once, when created: the endpoints must differ and the
//! [`RouteOracle`] must report both stations as existing and connected.
//! Later changes to the line network never touch stored favorites.
//!
//! Validation completes before the collection lock is taken, so a rejected
//! request never writes anything.

/// Owner-indexed storage
pub mod collection;
/// Connectivity capability
pub mod oracle;

pub use collection::{Favorite, Favorites};
pub use oracle::RouteOracle;

use crate::constants::{error_messages, service_names};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Shared favorites store guarded by a single lock
pub struct FavoriteService {
    favorites: RwLock<Favorites>,
    oracle: Arc<dyn RouteOracle>,
}

impl FavoriteService {
    /// Create an empty service validating against `oracle`
    #[must_use]
    pub fn new(oracle: Arc<dyn RouteOracle>) -> Self {
        Self {
            favorites: RwLock::new(Favorites::new()),
            oracle,
        }
    }

    /// Validate and store a new favorite for `member_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the endpoints are identical, unknown, or
    /// not connected, `AuthInvalid` when the member was deleted meanwhile, and
    /// an `ExternalService*` error when the oracle fails
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        member_id: i64,
        source_station_id: i64,
        target_station_id: i64,
    ) -> AppResult<Favorite> {
        if source_station_id == target_station_id {
            return Err(AppError::invalid_input(error_messages::IDENTICAL_ENDPOINTS));
        }

        if !self.is_reachable(source_station_id, target_station_id).await? {
            return Err(AppError::invalid_input(error_messages::UNREACHABLE_STATIONS));
        }

        let favorite =
            self.favorites
                .write()
                .await
                .insert(member_id, source_station_id, target_station_id)?;

        AppLogger::log_favorite_event(member_id, favorite.id, "created");
        Ok(favorite)
    }

    /// Favorites of `member_id` in creation order
    pub async fn list_by_owner(&self, member_id: i64) -> Vec<Favorite> {
        self.favorites.read().await.list_by_owner(member_id)
    }

    /// Delete a favorite owned by `member_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the favorite does not exist or is owned by
    /// someone else
    #[instrument(skip(self))]
    pub async fn delete(&self, member_id: i64, favorite_id: i64) -> AppResult<()> {
        self.favorites.write().await.remove(member_id, favorite_id)?;
        AppLogger::log_favorite_event(member_id, favorite_id, "deleted");
        Ok(())
    }

    /// Drop every favorite belonging to a removed member and refuse new ones
    pub async fn remove_all_for_owner(&self, member_id: i64) -> usize {
        let removed = self.favorites.write().await.remove_all_for_owner(member_id);
        debug!(member_id, removed, "Removed favorites of deleted member");
        removed
    }

    async fn is_reachable(&self, source: i64, target: i64) -> AppResult<bool> {
        let oracle = &self.oracle;
        let reachable = oracle
            .station_exists(source)
            .await
            .map_err(dependency_error)?
            && oracle
                .station_exists(target)
                .await
                .map_err(dependency_error)?
            && oracle
                .are_connected(source, target)
                .await
                .map_err(dependency_error)?;
        Ok(reachable)
    }
}

/// Oracle failures surface as dependency errors whatever code the oracle used
fn dependency_error(error: AppError) -> AppError {
    if error.code.is_dependency_failure() {
        error
    } else {
        AppError::external_unavailable(service_names::ROUTE_ORACLE, error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stations 1..=3 form one component, station 4 is isolated
    struct StubOracle {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubOracle {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl RouteOracle for StubOracle {
        async fn station_exists(&self, station_id: i64) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::internal("graph store offline"));
            }
            Ok((1..=4).contains(&station_id))
        }

        async fn are_connected(&self, source: i64, target: i64) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(source != 4 && target != 4)
        }
    }

    fn service() -> (FavoriteService, Arc<StubOracle>) {
        let oracle = Arc::new(StubOracle::new());
        (FavoriteService::new(oracle.clone()), oracle)
    }

    #[tokio::test]
    async fn test_create_connected_pair() {
        let (service, _) = service();
        let favorite = service.create(7, 1, 3).await.unwrap();

        assert_eq!(favorite.member_id, 7);
        assert_eq!(favorite.source_station_id, 1);
        assert_eq!(favorite.target_station_id, 3);
        assert_eq!(service.list_by_owner(7).await, vec![favorite]);
    }

    #[tokio::test]
    async fn test_identical_endpoints_skip_the_oracle() {
        let (service, oracle) = service();
        let error = service.create(7, 1, 1).await.unwrap_err();

        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_or_unreachable_station_rejected() {
        let (service, _) = service();

        let unknown = service.create(7, 1, -9999).await.unwrap_err();
        assert_eq!(unknown.code, ErrorCode::InvalidInput);

        let isolated = service.create(7, 1, 4).await.unwrap_err();
        assert_eq!(isolated.code, ErrorCode::InvalidInput);

        assert!(service.list_by_owner(7).await.is_empty());
    }

    #[tokio::test]
    async fn test_oracle_failure_is_dependency_error() {
        let service = FavoriteService::new(Arc::new(StubOracle::failing()));
        let error = service.create(7, 1, 2).await.unwrap_err();

        assert!(error.code.is_dependency_failure());
        assert!(error.http_status() >= 500);
    }

    #[tokio::test]
    async fn test_delete_then_list_is_empty() {
        let (service, _) = service();
        let favorite = service.create(7, 1, 2).await.unwrap();

        service.delete(7, favorite.id).await.unwrap();
        assert!(service.list_by_owner(7).await.is_empty());

        let again = service.delete(7, favorite.id).await.unwrap_err();
        assert_eq!(again.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_delete_of_other_members_favorite() {
        let (service, _) = service();
        let favorite = service.create(7, 1, 2).await.unwrap();

        assert!(service.delete(8, favorite.id).await.is_err());
        assert_eq!(service.list_by_owner(7).await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let (service, _) = service();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.create(7, 1, 2).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_create_after_owner_removal_is_unauthorized() {
        let (service, _) = service();
        service.create(7, 1, 2).await.unwrap();

        assert_eq!(service.remove_all_for_owner(7).await, 1);
        let error = service.create(7, 1, 3).await.unwrap_err();

        assert_eq!(error.code, ErrorCode::AuthInvalid);
        assert_eq!(error.http_status(), 401);
        assert!(service.list_by_owner(7).await.is_empty());
    }

    #[tokio::test]
    async fn test_creates_racing_owner_removal_leave_nothing_behind() {
        let (service, _) = service();
        let service = Arc::new(service);

        let creates: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.create(7, 1, 2).await })
            })
            .collect();
        let removal = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.remove_all_for_owner(7).await })
        };

        removal.await.unwrap();
        for handle in creates {
            let _ = handle.await.unwrap();
        }
        assert!(service.list_by_owner(7).await.is_empty());
    }
}

// ABOUTME: Owner-indexed favorites collection with monotonically allocated ids
// ABOUTME: Pure data structure; locking and validation live in the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A member's bookmarked (source, target) station pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Favorite identifier, never reused
    pub id: i64,
    /// Owning member
    pub member_id: i64,
    /// Departure station
    pub source_station_id: i64,
    /// Arrival station
    pub target_station_id: i64,
}

/// All favorites, keyed by id and indexed by owner in creation order
#[derive(Debug, Default)]
pub struct Favorites {
    next_id: i64,
    by_id: HashMap<i64, Favorite>,
    by_owner: HashMap<i64, Vec<i64>>,
    retired_owners: HashSet<i64>,
}

impl Favorites {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new favorite under a freshly allocated id
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when `member_id` was retired by
    /// [`Favorites::remove_all_for_owner`]
    pub fn insert(
        &mut self,
        member_id: i64,
        source_station_id: i64,
        target_station_id: i64,
    ) -> AppResult<Favorite> {
        if self.retired_owners.contains(&member_id) {
            return Err(AppError::auth_invalid(error_messages::FAVORITE_OWNER_REMOVED)
                .with_resource_id(member_id.to_string()));
        }

        self.next_id += 1;
        let favorite = Favorite {
            id: self.next_id,
            member_id,
            source_station_id,
            target_station_id,
        };

        self.by_owner.entry(member_id).or_default().push(favorite.id);
        self.by_id.insert(favorite.id, favorite.clone());
        Ok(favorite)
    }

    /// Favorites owned by `member_id`, oldest first
    #[must_use]
    pub fn list_by_owner(&self, member_id: i64) -> Vec<Favorite> {
        self.by_owner
            .get(&member_id)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    /// Remove a favorite owned by `member_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the id is unknown or belongs to another
    /// member; the two cases produce the same error
    pub fn remove(&mut self, member_id: i64, favorite_id: i64) -> AppResult<Favorite> {
        let owned = matches!(
            self.by_id.get(&favorite_id),
            Some(favorite) if favorite.member_id == member_id
        );
        if !owned {
            return Err(AppError::invalid_input(error_messages::FAVORITE_NOT_FOUND)
                .with_resource_id(favorite_id.to_string()));
        }

        if let Some(ids) = self.by_owner.get_mut(&member_id) {
            ids.retain(|id| *id != favorite_id);
            if ids.is_empty() {
                self.by_owner.remove(&member_id);
            }
        }

        self.by_id
            .remove(&favorite_id)
            .ok_or_else(|| AppError::internal("Favorite index out of sync"))
    }

    /// Drop every favorite owned by `member_id`, returning how many were removed
    ///
    /// The owner is retired: later inserts for it fail, so a create racing the
    /// member's deletion cannot leave an orphan behind. Member ids are never
    /// reused.
    pub fn remove_all_for_owner(&mut self, member_id: i64) -> usize {
        self.retired_owners.insert(member_id);
        let ids = self.by_owner.remove(&member_id).unwrap_or_default();
        for id in &ids {
            self.by_id.remove(id);
        }
        ids.len()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.by_id.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_ids_are_never_reused() {
        let mut favorites = Favorites::new();
        let first = favorites.insert(1, 10, 20).unwrap();
        favorites.remove(1, first.id).unwrap();
        let second = favorites.insert(1, 10, 20).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_list_preserves_creation_order_per_owner() {
        let mut favorites = Favorites::new();
        let a = favorites.insert(1, 10, 20).unwrap();
        favorites.insert(2, 10, 30).unwrap();
        let c = favorites.insert(1, 30, 40).unwrap();

        let listed: Vec<i64> = favorites.list_by_owner(1).iter().map(|f| f.id).collect();
        assert_eq!(listed, vec![a.id, c.id]);
        assert!(favorites.list_by_owner(99).is_empty());
    }

    #[test]
    fn test_remove_rejects_foreign_owner_like_missing_id() {
        let mut favorites = Favorites::new();
        let favorite = favorites.insert(1, 10, 20).unwrap();

        let foreign = favorites.remove(2, favorite.id).unwrap_err();
        let missing = favorites.remove(1, 9999).unwrap_err();

        assert_eq!(foreign.code, ErrorCode::InvalidInput);
        assert_eq!(foreign.message, missing.message);
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_second_remove_fails() {
        let mut favorites = Favorites::new();
        let favorite = favorites.insert(1, 10, 20).unwrap();

        assert!(favorites.remove(1, favorite.id).is_ok());
        assert!(favorites.remove(1, favorite.id).is_err());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_remove_all_for_owner() {
        let mut favorites = Favorites::new();
        favorites.insert(1, 10, 20).unwrap();
        favorites.insert(1, 20, 30).unwrap();
        favorites.insert(2, 10, 20).unwrap();

        assert_eq!(favorites.remove_all_for_owner(1), 2);
        assert!(favorites.list_by_owner(1).is_empty());
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_insert_for_retired_owner_is_rejected() {
        let mut favorites = Favorites::new();
        favorites.insert(1, 10, 20).unwrap();
        favorites.remove_all_for_owner(1);

        let err = favorites.insert(1, 10, 20).unwrap_err();

        assert_eq!(err.code, ErrorCode::AuthInvalid);
        assert!(favorites.list_by_owner(1).is_empty());
        assert!(favorites.is_empty());
        assert!(favorites.insert(2, 10, 20).is_ok());
    }
}

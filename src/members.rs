// ABOUTME: Member registry with bcrypt password hashing and email uniqueness
// ABOUTME: In-memory store used by the member, login, and OAuth routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # Members
//!
//! Members are identified by a numeric id and a unique email. The email is
//! the principal carried in bearer tokens; members created through GitHub
//! sign-in have no password and can only log in through GitHub again.

use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// A registered member
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    /// Member identifier
    pub id: i64,
    /// Unique email, used as the token principal
    pub email: String,
    /// bcrypt hash, absent for members provisioned through OAuth
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Optional age
    pub age: Option<u32>,
}

/// Input for registering or updating a member
#[derive(Debug, Clone)]
pub struct MemberDraft {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Optional age
    pub age: Option<u32>,
}

#[derive(Debug, Default)]
struct MemberTable {
    next_id: i64,
    by_id: BTreeMap<i64, Member>,
    id_by_email: HashMap<String, i64>,
}

impl MemberTable {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert(&mut self, member: Member) {
        self.id_by_email.insert(member.email.clone(), member.id);
        self.by_id.insert(member.id, member);
    }
}

/// Process-local member registry
#[derive(Debug, Default)]
pub struct MemberStore {
    table: RwLock<MemberTable>,
}

impl MemberStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new member
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or empty password and
    /// `ResourceAlreadyExists` when the email is taken
    pub async fn create(&self, draft: MemberDraft) -> AppResult<Member> {
        validate_draft(&draft)?;
        let password_hash = hash_password(draft.password).await?;

        let mut table = self.table.write().await;
        if table.id_by_email.contains_key(&draft.email) {
            return Err(AppError::already_exists(format!(
                "Member with email {}",
                draft.email
            )));
        }

        let member = Member {
            id: table.allocate_id(),
            email: draft.email,
            password_hash: Some(password_hash),
            age: draft.age,
        };
        table.insert(member.clone());
        drop(table);

        info!(member_id = member.id, "Registered member");
        Ok(member)
    }

    /// Look up a member by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no member has this id
    pub async fn get(&self, id: i64) -> AppResult<Member> {
        self.table
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| member_not_found(id))
    }

    /// Look up a member by email
    pub async fn find_by_email(&self, email: &str) -> Option<Member> {
        let table = self.table.read().await;
        table
            .id_by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned()
    }

    /// Replace a member's email, password, and age
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `InvalidInput` for bad
    /// fields, and `ResourceAlreadyExists` if the new email belongs to
    /// another member
    pub async fn update(&self, id: i64, draft: MemberDraft) -> AppResult<Member> {
        validate_draft(&draft)?;
        let password_hash = hash_password(draft.password).await?;

        let mut table = self.table.write().await;
        if !table.by_id.contains_key(&id) {
            return Err(member_not_found(id));
        }
        if table
            .id_by_email
            .get(&draft.email)
            .is_some_and(|owner| *owner != id)
        {
            return Err(AppError::already_exists(format!(
                "Member with email {}",
                draft.email
            )));
        }

        if let Some(previous) = table.by_id.remove(&id) {
            table.id_by_email.remove(&previous.email);
        }
        let member = Member {
            id,
            email: draft.email,
            password_hash: Some(password_hash),
            age: draft.age,
        };
        table.insert(member.clone());
        drop(table);

        debug!(member_id = id, "Updated member");
        Ok(member)
    }

    /// Remove a member, returning the removed record
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no member has this id
    pub async fn delete(&self, id: i64) -> AppResult<Member> {
        let mut table = self.table.write().await;
        let member = table
            .by_id
            .remove(&id)
            .ok_or_else(|| member_not_found(id))?;
        table.id_by_email.remove(&member.email);
        drop(table);

        info!(member_id = id, "Deleted member");
        Ok(member)
    }

    /// Check an email/password pair
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for an unknown email, a member without a
    /// password, or a wrong password. The three cases are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Member> {
        let member = self
            .find_by_email(email)
            .await
            .ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))?;

        let Some(hash) = member.password_hash.clone() else {
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        };

        if verify_password(password, &hash).await {
            Ok(member)
        } else {
            Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))
        }
    }

    /// Return the member with this email, creating a password-less one if
    /// none exists
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the email is malformed
    pub async fn find_or_create_by_email(&self, email: &str) -> AppResult<Member> {
        validate_email(email)?;

        let mut table = self.table.write().await;
        if let Some(existing) = table
            .id_by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
        {
            return Ok(existing.clone());
        }

        let member = Member {
            id: table.allocate_id(),
            email: email.to_owned(),
            password_hash: None,
            age: None,
        };
        table.insert(member.clone());
        drop(table);

        info!(member_id = member.id, "Provisioned member from OAuth sign-in");
        Ok(member)
    }
}

fn member_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Member {id}")).with_resource_id(id.to_string())
}

fn validate_draft(draft: &MemberDraft) -> AppResult<()> {
    validate_email(&draft.email)?;
    if draft.password.is_empty() {
        return Err(AppError::invalid_input(error_messages::EMPTY_PASSWORD));
    }
    Ok(())
}

/// Minimal structural email check: `local@domain.tld` without whitespace
///
/// # Errors
///
/// Returns `InvalidInput` when the address does not have that shape
pub fn validate_email(email: &str) -> AppResult<()> {
    let well_formed = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });

    if well_formed {
        Ok(())
    } else {
        Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT))
    }
}

const fn bcrypt_cost() -> u32 {
    if cfg!(debug_assertions) {
        4
    } else {
        bcrypt::DEFAULT_COST
    }
}

async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost()))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

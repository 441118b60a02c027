// ABOUTME: Core types and constants for the subway route server
// ABOUTME: Foundation crate with error handling and constants shared by every layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

#![deny(unsafe_code)]

//! # Subway Core
//!
//! Foundation crate providing the shared error taxonomy and constants for the
//! subway route server. It changes rarely, so the main crate recompiles less.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

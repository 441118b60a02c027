// ABOUTME: Subway station model
// ABOUTME: A named stop that lines connect through sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use serde::Serialize;

/// A subway station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    /// Station identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

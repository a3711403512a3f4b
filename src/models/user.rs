// ABOUTME: User account model for store owners and authenticated shoppers
// ABOUTME: Minimal identity record; tenant ownership lives on the tenant side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account
///
/// Tenant identity never derives from the user: the Host header is the sole
/// input to resolution. A user id only feeds the `is_owner_viewer` check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address, unique across the platform
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Bcrypt password hash, never serialized outward
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user account
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

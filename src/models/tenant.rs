// ABOUTME: Tenant record model for the multi-tenant storefront directory
// ABOUTME: One merchant store with subdomain label, custom domain, and owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One merchant store within the shared platform
///
/// `subdomain_label` and `custom_domain`, when present, are each globally
/// unique across all tenants (enforced by the storage layer). A tenant with
/// neither binding is administratively orphaned and unreachable by hostname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier, stable and immutable
    pub id: Uuid,
    /// Human-readable store name
    pub display_name: String,
    /// Platform-issued subdomain label; `{label}.{root_domain}` resolves here
    pub subdomain_label: Option<String>,
    /// Externally bound fully-qualified hostname
    pub custom_domain: Option<String>,
    /// The single user account that administers this store
    pub owner_user_id: Uuid,
    /// When the tenant was created
    pub created_at: DateTime<Utc>,
    /// When the tenant was last updated
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new tenant with a platform-issued subdomain label
    #[must_use]
    pub fn new(display_name: String, subdomain_label: String, owner_user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            subdomain_label: Some(subdomain_label),
            custom_domain: None,
            owner_user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the tenant can be reached by any hostname at all
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.subdomain_label.is_some() || self.custom_domain.is_some()
    }
}

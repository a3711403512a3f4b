// ABOUTME: Multi-tenant isolation core: tenant context, resolver, scoping, provisioning
// ABOUTME: Maps request hostnames to tenant identity and builds ownership filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Tenant Isolation Core
//!
//! The resolved [`TenantContext`] is the single source of tenant identity for
//! a request. It is constructed once per inbound request (server) or once per
//! navigation (client), never persisted, and never mutated — a change in
//! hostname or viewer identity requires a new resolution.

/// Unique subdomain generation and tenant creation
pub mod provisioning;
/// Ordered hostname-to-tenant resolution chain
pub mod resolver;
/// Ownership predicate construction for owned-entity access
pub mod scope;

pub use provisioning::TenantProvisioner;
pub use resolver::TenantResolver;
pub use scope::{require_write_scope, OwnershipFilter};

use crate::models::Tenant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of the request hostname after resolution
///
/// A closed variant set so every consumer handles all four cases explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    /// The platform's own domain (or a reserved label / unparseable host)
    BaseDomain,
    /// A subdomain of the root domain that matched a tenant
    TenantSubdomain,
    /// A bound custom domain that matched a tenant
    TenantCustomDomain,
    /// A hostname that matched nothing in the directory
    UnmatchedHost,
}

/// The resolved, immutable view of tenant identity for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Resolved tenant, absent for the base domain and unmatched hosts
    pub tenant_id: Option<Uuid>,
    /// How the hostname classified
    pub host_kind: HostKind,
    /// True only if the authenticated viewer owns the resolved tenant
    pub is_owner_viewer: bool,
    /// Denormalized store name for UI convenience
    pub display_name: Option<String>,
}

impl TenantContext {
    /// Context for a hostname that resolved to no tenant
    #[must_use]
    pub const fn unresolved(host_kind: HostKind) -> Self {
        Self {
            tenant_id: None,
            host_kind,
            is_owner_viewer: false,
            display_name: None,
        }
    }

    /// Context for a resolved tenant, computing the owner-viewer flag
    #[must_use]
    pub fn for_tenant(tenant: &Tenant, host_kind: HostKind, viewer_user_id: Option<Uuid>) -> Self {
        Self {
            tenant_id: Some(tenant.id),
            host_kind,
            is_owner_viewer: viewer_user_id == Some(tenant.owner_user_id),
            display_name: Some(tenant.display_name.clone()),
        }
    }

    /// Whether a tenant was resolved
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.tenant_id.is_some()
    }

    /// The resolved tenant id, or a soft `TenantUnresolved` error
    ///
    /// # Errors
    ///
    /// Returns `TenantUnresolved` when no tenant matched the hostname.
    pub fn require_tenant(&self) -> crate::errors::AppResult<Uuid> {
        self.tenant_id.ok_or_else(|| {
            crate::errors::AppError::tenant_unresolved(format!(
                "no store is bound to this hostname (host kind: {:?})",
                self.host_kind
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tenant(owner: Uuid) -> Tenant {
        Tenant::new("Shop One".into(), "shop1".into(), owner)
    }

    #[test]
    fn test_owner_viewer_flag() {
        let owner = Uuid::new_v4();
        let tenant = sample_tenant(owner);

        let as_owner = TenantContext::for_tenant(&tenant, HostKind::TenantSubdomain, Some(owner));
        assert!(as_owner.is_owner_viewer);

        let as_stranger =
            TenantContext::for_tenant(&tenant, HostKind::TenantSubdomain, Some(Uuid::new_v4()));
        assert!(!as_stranger.is_owner_viewer);

        let as_anonymous = TenantContext::for_tenant(&tenant, HostKind::TenantSubdomain, None);
        assert!(!as_anonymous.is_owner_viewer);
    }

    #[test]
    fn test_require_tenant() {
        let ctx = TenantContext::unresolved(HostKind::UnmatchedHost);
        let err = ctx.require_tenant().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::TenantUnresolved);

        let tenant = sample_tenant(Uuid::new_v4());
        let ctx = TenantContext::for_tenant(&tenant, HostKind::TenantSubdomain, None);
        assert_eq!(ctx.require_tenant().unwrap(), tenant.id);
    }
}

// ABOUTME: Ownership predicate construction for tenant-owned entity access
// ABOUTME: An unresolved tenant scopes reads to the empty set and refuses writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Scoped Query Filters
//!
//! Every read of an owned collection goes through an [`OwnershipFilter`]
//! built from the request's [`TenantContext`]. The single most important
//! correctness property of the platform lives here: an absent tenant selects
//! **no records**, never all of them. Write paths call
//! [`require_write_scope`] before constructing a record, so an unscoped
//! write fails before anything exists to mis-own.

use crate::errors::{AppError, AppResult};
use crate::tenant::TenantContext;
use uuid::Uuid;

/// Ownership predicate applied to reads of owned entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipFilter {
    /// Restrict to records owned by this tenant
    Tenant(Uuid),
    /// Select no records at all
    Empty,
}

impl OwnershipFilter {
    /// Build the filter from a tenant context
    ///
    /// Absent tenant means the empty-set predicate, by construction: there is
    /// no code path from "no tenant" to "all records".
    #[must_use]
    pub fn for_context(ctx: &TenantContext) -> Self {
        ctx.tenant_id.map_or(Self::Empty, Self::Tenant)
    }

    /// Whether this filter selects nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The owning tenant, if any
    #[must_use]
    pub const fn tenant_id(&self) -> Option<Uuid> {
        match self {
            Self::Tenant(id) => Some(*id),
            Self::Empty => None,
        }
    }

    /// Whether a record with the given owner passes this filter
    #[must_use]
    pub fn matches(&self, owner: Uuid) -> bool {
        match self {
            Self::Tenant(id) => *id == owner,
            Self::Empty => false,
        }
    }
}

/// The owning tenant id for a write, or an `UnscopedWrite` failure
///
/// # Errors
///
/// Returns `UnscopedWrite` when the context carries no tenant. This is a
/// contract violation fatal to the write, not a transient condition to retry.
pub fn require_write_scope(ctx: &TenantContext) -> AppResult<Uuid> {
    ctx.tenant_id.ok_or_else(|| {
        AppError::unscoped_write(format!(
            "owned-entity write without a resolved store (host kind: {:?})",
            ctx.host_kind
        ))
    })
}

// ABOUTME: Ordered hostname-to-tenant resolution with an explicit fallback chain
// ABOUTME: Directory failures resolve to UnmatchedHost; stale "no tenant" is safe, "wrong tenant" is not
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Tenant Resolver
//!
//! The resolution chain, first match wins:
//!
//! 1. Normalize the host. Base domain (including reserved labels) resolves to
//!    no tenant immediately.
//! 2. Subdomain-shaped host: look up the label in the directory. On a miss,
//!    try the full host as a custom domain — this ordering is the documented
//!    tie-break: platform-issued subdomain labels beat externally bound
//!    custom domains when both would match. If that also misses, a configured
//!    marketing label falls back to the base-domain surface; anything else is
//!    an unmatched host.
//! 3. Custom-domain-shaped host: look up the exact host. On a miss, re-attempt
//!    the leftmost DNS label as a subdomain label (legacy lookup order), then
//!    give up as unmatched.
//!
//! Directory I/O failure never propagates: it resolves to `UnmatchedHost`
//! with no tenant, because every downstream filter treats "no tenant" as
//! "select nothing". There is no retry loop; every request restarts the
//! chain from scratch.

use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppError;
use crate::hostname::{HostnameNormalizer, NormalizedHost};
use crate::models::Tenant;
use crate::tenant::{HostKind, TenantContext};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Resolves request hostnames to tenant contexts through the tenant directory
#[derive(Clone)]
pub struct TenantResolver {
    database: Arc<Database>,
    normalizer: HostnameNormalizer,
    marketing_labels: Vec<String>,
}

impl TenantResolver {
    /// Create a resolver over the given directory and domain configuration
    #[must_use]
    pub fn new(
        database: Arc<Database>,
        normalizer: HostnameNormalizer,
        marketing_labels: Vec<String>,
    ) -> Self {
        Self {
            database,
            normalizer,
            marketing_labels: marketing_labels
                .iter()
                .map(|label| label.trim().to_lowercase())
                .collect(),
        }
    }

    /// The normalizer this resolver classifies hostnames with
    #[must_use]
    pub const fn normalizer(&self) -> &HostnameNormalizer {
        &self.normalizer
    }

    /// Resolve a raw request hostname to a tenant context
    ///
    /// Infallible by design: failures degrade to an unresolved context.
    pub async fn resolve(&self, raw_host: &str, viewer_user_id: Option<Uuid>) -> TenantContext {
        let context = match self.normalizer.normalize(raw_host) {
            NormalizedHost::BaseDomain => TenantContext::unresolved(HostKind::BaseDomain),
            NormalizedHost::TenantSubdomain { label } => {
                self.resolve_subdomain(&label, viewer_user_id).await
            }
            NormalizedHost::PossibleCustomDomain { host } => {
                self.resolve_custom_domain(&host, viewer_user_id).await
            }
        };

        debug!(
            host = %raw_host,
            host_kind = ?context.host_kind,
            tenant_id = ?context.tenant_id,
            "resolved tenant context"
        );
        context
    }

    /// Resolve a tenant by explicit id for call sites that cannot see a
    /// tenant-bearing Host header (e.g. an admin UI calling through the base
    /// domain).
    ///
    /// Host-derived identity is authoritative: when the host context already
    /// carries a tenant, a mismatched explicit id is rejected rather than
    /// honored. With no host-derived tenant, the explicit id is honored only
    /// for the tenant's own owner.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` on a host/explicit mismatch or a non-owner
    /// caller, and `ResourceNotFound` for an unknown tenant id.
    pub async fn resolve_with_explicit(
        &self,
        host_context: TenantContext,
        explicit_tenant_id: Option<Uuid>,
        viewer_user_id: Option<Uuid>,
    ) -> Result<TenantContext, AppError> {
        let Some(explicit) = explicit_tenant_id else {
            return Ok(host_context);
        };

        match host_context.tenant_id {
            Some(host_tenant) if host_tenant == explicit => Ok(host_context),
            Some(host_tenant) => {
                warn!(
                    host_tenant = %host_tenant,
                    explicit_tenant = %explicit,
                    "explicit tenant id contradicts Host-derived tenant"
                );
                Err(AppError::permission_denied(
                    "tenant id parameter does not match the request hostname",
                ))
            }
            None => {
                let tenant = self
                    .database
                    .get_tenant_by_id(explicit)
                    .await?
                    .ok_or_else(|| AppError::not_found("tenant"))?;

                if viewer_user_id != Some(tenant.owner_user_id) {
                    return Err(AppError::permission_denied(
                        "explicit tenant scoping is limited to the store owner",
                    ));
                }

                Ok(TenantContext::for_tenant(
                    &tenant,
                    host_context.host_kind,
                    viewer_user_id,
                ))
            }
        }
    }

    async fn resolve_subdomain(&self, label: &str, viewer_user_id: Option<Uuid>) -> TenantContext {
        match self.database.get_tenant_by_subdomain(label).await {
            Ok(Some(tenant)) => {
                Self::context_for(&tenant, HostKind::TenantSubdomain, viewer_user_id)
            }
            Ok(None) => {
                // Tie-break: only after the platform-issued label misses may
                // the same host match as an externally bound custom domain.
                let full_host = self.normalizer.subdomain_host(label);
                match self.database.get_tenant_by_custom_domain(&full_host).await {
                    Ok(Some(tenant)) => {
                        Self::context_for(&tenant, HostKind::TenantCustomDomain, viewer_user_id)
                    }
                    Ok(None) if self.is_marketing_label(label) => {
                        TenantContext::unresolved(HostKind::BaseDomain)
                    }
                    Ok(None) => TenantContext::unresolved(HostKind::UnmatchedHost),
                    Err(error) => Self::degrade(&full_host, &error),
                }
            }
            Err(error) => Self::degrade(label, &error),
        }
    }

    async fn resolve_custom_domain(
        &self,
        host: &str,
        viewer_user_id: Option<Uuid>,
    ) -> TenantContext {
        match self.database.get_tenant_by_custom_domain(host).await {
            Ok(Some(tenant)) => {
                Self::context_for(&tenant, HostKind::TenantCustomDomain, viewer_user_id)
            }
            Ok(None) => {
                // Legacy lookup order: deployments that checked custom
                // domains first still resolve a subdomain-labeled host.
                let Some(label) = host.split('.').next().filter(|label| !label.is_empty()) else {
                    return TenantContext::unresolved(HostKind::UnmatchedHost);
                };
                if self.normalizer.is_reserved(label) {
                    return TenantContext::unresolved(HostKind::BaseDomain);
                }
                match self.database.get_tenant_by_subdomain(label).await {
                    Ok(Some(tenant)) => {
                        Self::context_for(&tenant, HostKind::TenantSubdomain, viewer_user_id)
                    }
                    Ok(None) => TenantContext::unresolved(HostKind::UnmatchedHost),
                    Err(error) => Self::degrade(host, &error),
                }
            }
            Err(error) => Self::degrade(host, &error),
        }
    }

    fn context_for(
        tenant: &Tenant,
        host_kind: HostKind,
        viewer_user_id: Option<Uuid>,
    ) -> TenantContext {
        TenantContext::for_tenant(tenant, host_kind, viewer_user_id)
    }

    /// Directory failure degrades to "no tenant", never to an error
    fn degrade(host: &str, error: &AppError) -> TenantContext {
        warn!(
            host = %host,
            error = %error,
            "tenant directory lookup failed, resolving as unmatched host"
        );
        TenantContext::unresolved(HostKind::UnmatchedHost)
    }

    fn is_marketing_label(&self, label: &str) -> bool {
        self.marketing_labels.iter().any(|known| known == label)
    }
}

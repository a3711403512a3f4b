// ABOUTME: Tenant provisioning with bounded unique subdomain generation
// ABOUTME: Slugifies a seed name and suffixes a counter until the directory misses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Tenant Provisioning
//!
//! Thin write path over the tenant directory. The directory pre-check only
//! picks a candidate label; the storage layer's unique index is what actually
//! decides a race, surfacing as `TenantConflict`.

use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use crate::hostname::HostnameNormalizer;
use crate::models::Tenant;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Upper bound on label candidates tried per provisioning call
pub const MAX_SUBDOMAIN_ATTEMPTS: u32 = 50;

/// Provisions tenants with generated unique subdomain labels
#[derive(Clone)]
pub struct TenantProvisioner {
    database: Arc<Database>,
    normalizer: HostnameNormalizer,
}

impl TenantProvisioner {
    /// Create a provisioner over the given directory
    #[must_use]
    pub const fn new(database: Arc<Database>, normalizer: HostnameNormalizer) -> Self {
        Self {
            database,
            normalizer,
        }
    }

    /// Derive a label candidate base from a seed name
    ///
    /// Lowercases and strips everything but ASCII alphanumerics; an empty
    /// result falls back to `store`.
    #[must_use]
    pub fn slugify(seed: &str) -> String {
        let slug: String = seed
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        if slug.is_empty() {
            "store".into()
        } else {
            slug
        }
    }

    /// Generate a unique subdomain label from a seed name
    ///
    /// Tries the bare slug first, then counter-suffixed variants (`anjums`,
    /// `anjums2`, `anjums3`, ...). Reserved labels are refused outright, so a
    /// seed like "www" can never shadow the base domain.
    ///
    /// # Errors
    ///
    /// Returns `ProvisioningExhausted` after [`MAX_SUBDOMAIN_ATTEMPTS`]
    /// candidates, and `DatabaseError` if a directory lookup fails.
    pub async fn generate_unique_subdomain(&self, seed: &str) -> AppResult<String> {
        let base = Self::slugify(seed);

        for attempt in 0..MAX_SUBDOMAIN_ATTEMPTS {
            let candidate = if attempt == 0 {
                base.clone()
            } else {
                format!("{base}{}", attempt + 1)
            };

            if self.normalizer.is_reserved(&candidate) {
                continue;
            }

            if self
                .database
                .get_tenant_by_subdomain(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }

        Err(AppError::provisioning_exhausted(format!(
            "no free subdomain label within {MAX_SUBDOMAIN_ATTEMPTS} attempts for seed '{seed}'"
        )))
    }

    /// Create a tenant from a seed name, generating its subdomain label
    ///
    /// Enforces one-store-per-owner before insertion; the storage unique
    /// constraints remain authoritative for label and owner collisions under
    /// concurrent provisioning.
    ///
    /// # Errors
    ///
    /// Returns `TenantConflict` if the owner already administers a store or a
    /// generated label loses a creation race, and `ProvisioningExhausted` if
    /// label generation runs out of attempts.
    pub async fn provision(&self, seed_name: &str, owner_user_id: Uuid) -> AppResult<Tenant> {
        if let Some(existing) = self.database.get_tenant_by_owner(owner_user_id).await? {
            return Err(AppError::tenant_conflict(format!(
                "user already administers store '{}'",
                existing.display_name
            ))
            .with_tenant_id(existing.id));
        }

        let label = self.generate_unique_subdomain(seed_name).await?;
        let tenant = Tenant::new(seed_name.trim().to_owned(), label.clone(), owner_user_id);

        self.database.create_tenant(&tenant).await?;

        info!(
            tenant_id = %tenant.id,
            subdomain_label = %label,
            "provisioned tenant"
        );
        Ok(tenant)
    }

    /// Bind a custom domain to an existing tenant
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a domain that does not normalize to a
    /// custom-domain shape, `TenantConflict` if another tenant holds it, and
    /// `ResourceNotFound` for an unknown tenant.
    pub async fn bind_custom_domain(&self, tenant_id: Uuid, domain: &str) -> AppResult<Tenant> {
        let normalized = domain.trim().to_lowercase();
        if normalized.is_empty() || !normalized.contains('.') {
            return Err(AppError::invalid_input(format!(
                "'{domain}' is not a usable custom domain"
            )));
        }

        self.database
            .get_tenant_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("tenant"))?;

        self.database
            .bind_custom_domain(tenant_id, &normalized)
            .await?;

        self.database
            .get_tenant_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("tenant"))
    }
}

// ABOUTME: Tenant route handlers: hostname lookup, provisioning, domain binding
// ABOUTME: REST surface over the tenant resolver and provisioner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Tenant routes
//!
//! `GET /api/tenant/lookup` is the public resolution endpoint the client-side
//! propagator calls once per navigation. Provisioning and domain binding
//! require an authenticated owner.

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::tenant::HostKind;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Query parameters for hostname lookup
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Hostname to resolve, as the browser sees it
    pub host: String,
}

/// Resolution result returned to storefront clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantLookupResponse {
    /// How the hostname classified
    pub host_kind: HostKind,
    /// Resolved tenant id, absent for base-domain and unmatched hosts
    pub tenant_id: Option<String>,
    /// The store's subdomain label; clients use it to qualify base-domain paths
    pub subdomain_label: Option<String>,
    /// The store's bound custom domain, if any
    pub custom_domain: Option<String>,
    /// Store display name for the storefront header
    pub display_name: Option<String>,
    /// Whether the authenticated caller owns the resolved store
    pub is_owner_viewer: bool,
}

/// Request body for tenant provisioning
#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    /// Store display name; also seeds the subdomain label
    pub name: String,
}

/// Response after successful provisioning
#[derive(Debug, Serialize)]
pub struct CreateTenantResponse {
    /// New tenant id
    pub tenant_id: String,
    /// Store display name
    pub display_name: String,
    /// Generated subdomain label
    pub subdomain_label: String,
    /// Full storefront hostname
    pub storefront_host: String,
}

/// Request body for custom domain binding
#[derive(Debug, Deserialize)]
pub struct BindDomainRequest {
    /// Custom domain to bind to the caller's store
    pub domain: String,
}

/// Tenant routes implementation
pub struct TenantRoutes;

impl TenantRoutes {
    /// Create all tenant routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tenant/lookup", get(Self::handle_lookup))
            .route("/api/tenants", post(Self::handle_create_tenant))
            .route("/api/tenants/domain", put(Self::handle_bind_domain))
            .with_state(resources)
    }

    /// Resolve an arbitrary hostname to a tenant context
    ///
    /// Public and infallible: an unknown host is a normal answer here, not an
    /// error. Clients decide what to render from `host_kind`.
    async fn handle_lookup(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<LookupQuery>,
    ) -> Json<TenantLookupResponse> {
        let viewer = resources.auth_manager.viewer_from_headers(&headers);
        let context = resources.tenant_resolver.resolve(&query.host, viewer).await;

        // Best effort: a directory failure here only omits the bindings,
        // matching the resolver's infallible contract.
        let tenant = match context.tenant_id {
            Some(id) => resources.database.get_tenant_by_id(id).await.ok().flatten(),
            None => None,
        };

        Json(TenantLookupResponse {
            host_kind: context.host_kind,
            tenant_id: context.tenant_id.map(|id| id.to_string()),
            subdomain_label: tenant.as_ref().and_then(|t| t.subdomain_label.clone()),
            custom_domain: tenant.and_then(|t| t.custom_domain),
            display_name: context.display_name,
            is_owner_viewer: context.is_owner_viewer,
        })
    }

    /// Provision a store for the authenticated caller
    async fn handle_create_tenant(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateTenantRequest>,
    ) -> Result<Response, AppError> {
        let owner = resources.auth_manager.require_user(&headers)?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("store name must not be empty"));
        }

        let tenant = resources.provisioner.provision(name, owner).await?;

        let label = tenant.subdomain_label.clone().unwrap_or_default();
        let storefront_host = resources
            .tenant_resolver
            .normalizer()
            .subdomain_host(&label);

        Ok((
            StatusCode::CREATED,
            Json(CreateTenantResponse {
                tenant_id: tenant.id.to_string(),
                display_name: tenant.display_name,
                subdomain_label: label,
                storefront_host,
            }),
        )
            .into_response())
    }

    /// Bind a custom domain to the caller's store
    async fn handle_bind_domain(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<BindDomainRequest>,
    ) -> Result<Response, AppError> {
        let owner = resources.auth_manager.require_user(&headers)?;

        let tenant = resources
            .database
            .get_tenant_by_owner(owner)
            .await?
            .ok_or_else(|| AppError::not_found("store for this account"))?;

        let updated = resources
            .provisioner
            .bind_custom_domain(tenant.id, &request.domain)
            .await?;

        info!(
            tenant_id = %updated.id,
            custom_domain = ?updated.custom_domain,
            "bound custom domain"
        );

        Ok((StatusCode::OK, Json(updated)).into_response())
    }
}

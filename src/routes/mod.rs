// ABOUTME: Route module organization for storefront HTTP endpoints
// ABOUTME: Centralized route definitions by domain plus top-level router assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Route modules for the storefront server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the tenant and database layers. The tenant context middleware
//! runs before every route; handlers read the resolved context from request
//! extensions and never parse hostnames themselves.

/// Authentication routes for store owners
pub mod auth;
/// Catalog routes (products and categories)
pub mod catalog;
/// Owner dashboard aggregates
pub mod dashboard;
/// Health check and system status routes
pub mod health;
/// Order and customer routes
pub mod orders;
/// Tenant lookup, provisioning, and domain binding routes
pub mod tenants;

pub use auth::{AuthRoutes, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use catalog::CatalogRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use orders::OrderRoutes;
pub use tenants::{CreateTenantRequest, TenantLookupResponse, TenantRoutes};

use crate::errors::AppError;
use crate::middleware::{setup_cors, tenant_context_middleware, ExtractedTenantContext};
use crate::resources::ServerResources;
use crate::tenant::{require_write_scope, TenantContext};
use crate::utils::uuid::parse_uuid;
use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assemble the full application router
///
/// Layer order matters: request ids are assigned first so tracing picks them
/// up, CORS answers preflights before tenant resolution, and the tenant
/// middleware runs for every route so even the health endpoint carries a
/// context.
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(TenantRoutes::routes(resources.clone()))
        .merge(CatalogRoutes::routes(resources.clone()))
        .merge(OrderRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()))
        .layer(axum::middleware::from_fn_with_state(
            resources,
            tenant_context_middleware,
        ))
        .layer(setup_cors())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Scope query parameters shared by owned-collection endpoints
#[derive(Debug, serde::Deserialize)]
pub struct ScopeQuery {
    /// Explicit tenant id for base-domain admin callers; the Host-derived
    /// tenant stays authoritative when both are present
    pub tenant_id: Option<String>,
}

/// Combine the Host-derived context with an optional explicit tenant id
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed id, `PermissionDenied` when the
/// explicit id contradicts the Host-derived tenant or the caller does not own
/// the named store, and `ResourceNotFound` for an unknown id.
pub(crate) async fn scoped_context(
    resources: &Arc<ServerResources>,
    extracted: &ExtractedTenantContext,
    headers: &HeaderMap,
    query: &ScopeQuery,
) -> Result<TenantContext, AppError> {
    let explicit = query.tenant_id.as_deref().map(parse_uuid).transpose()?;
    let viewer = resources.auth_manager.viewer_from_headers(headers);

    resources
        .tenant_resolver
        .resolve_with_explicit(extracted.0.clone(), explicit, viewer)
        .await
}

/// The owning tenant for a catalog write, restricted to the store owner
///
/// # Errors
///
/// Returns `UnscopedWrite` without a resolved tenant and `PermissionDenied`
/// when the caller is not the store owner.
pub(crate) fn require_owner_write(ctx: &TenantContext) -> Result<Uuid, AppError> {
    let tenant_id = require_write_scope(ctx)?;
    if !ctx.is_owner_viewer {
        return Err(AppError::permission_denied(
            "only the store owner can modify the catalog",
        ));
    }
    Ok(tenant_id)
}

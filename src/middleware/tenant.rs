// ABOUTME: Tower middleware resolving the request hostname to a tenant context
// ABOUTME: Injects ExtractedTenantContext into request extensions for route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Tenant Context Middleware
//!
//! Runs once per request, before any handler: reads the Host header, resolves
//! it through [`crate::tenant::TenantResolver`], and injects the resulting
//! [`ExtractedTenantContext`] into request extensions. Handlers never parse
//! hostnames themselves.
//!
//! The middleware never rejects a request. An unresolvable host still yields
//! a context (with no tenant); whether that is acceptable is the handler's
//! decision. The viewer identity from the Authorization header is advisory
//! here, it only determines the owner-viewer flag.

use crate::resources::ServerResources;
use crate::tenant::TenantContext;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Resolved tenant context wrapper for request extensions
///
/// Always present after the middleware runs; resolution failures surface as
/// an unresolved context, not a missing extension.
#[derive(Debug, Clone)]
pub struct ExtractedTenantContext(pub TenantContext);

impl ExtractedTenantContext {
    /// Get the resolved tenant id, if any
    #[must_use]
    pub const fn tenant_id(&self) -> Option<Uuid> {
        self.0.tenant_id
    }

    /// Check whether a tenant was resolved
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.0.is_resolved()
    }
}

/// Resolve the Host header to a tenant context and stash it in extensions
pub async fn tenant_context_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers();

    let raw_host = headers
        .get(http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let viewer = resources.auth_manager.viewer_from_headers(headers);

    let context = resources.tenant_resolver.resolve(&raw_host, viewer).await;

    if let Some(tenant_id) = context.tenant_id {
        tracing::Span::current().record("tenant_id", tenant_id.to_string());
    } else {
        debug!(host = %raw_host, host_kind = ?context.host_kind, "request carries no tenant");
    }

    req.extensions_mut().insert(ExtractedTenantContext(context));

    next.run(req).await
}

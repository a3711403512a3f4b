// ABOUTME: Owner dashboard route handler
// ABOUTME: Per-store aggregates with the ownership predicate composed into the query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Dashboard routes
//!
//! The dashboard belongs to the store owner; a shopper on the same hostname
//! gets a permission error, not a zeroed summary.

use super::{scoped_context, ScopeQuery};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::middleware::ExtractedTenantContext;
use crate::models::DashboardSummary;
use crate::resources::ServerResources;
use crate::tenant::OwnershipFilter;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

/// Dashboard routes implementation
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::handle_summary))
            .with_state(resources)
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<DashboardSummary>, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        ctx.require_tenant()?;

        if !ctx.is_owner_viewer {
            return Err(AppError::permission_denied(
                "the dashboard is only visible to the store owner",
            ));
        }

        let filter = OwnershipFilter::for_context(&ctx);
        let summary = resources.database.dashboard_summary(&filter).await?;
        Ok(Json(summary))
    }
}

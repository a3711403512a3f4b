// ABOUTME: Catalog route handlers for products and categories
// ABOUTME: Reads pass through the ownership filter, writes require the store owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Catalog routes
//!
//! Every read builds an [`crate::tenant::OwnershipFilter`] from the resolved
//! context, so an unresolved host lists nothing rather than everything.
//! Writes stamp `created_by_tenant_id` from the context before the record
//! exists; there is no way to create a catalog row for another store.

use super::{require_owner_write, scoped_context, ScopeQuery};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::middleware::ExtractedTenantContext;
use crate::models::{Category, Product};
use crate::resources::ServerResources;
use crate::tenant::OwnershipFilter;
use crate::utils::uuid::parse_uuid;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for product creation
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Price in minor currency units
    pub price_cents: i64,
    /// Optional category id within the same store
    pub category_id: Option<String>,
}

/// Request body for category creation
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name
    pub name: String,
}

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/products",
                get(Self::handle_list_products).post(Self::handle_create_product),
            )
            .route("/api/products/:id", get(Self::handle_get_product))
            .route(
                "/api/categories",
                get(Self::handle_list_categories).post(Self::handle_create_category),
            )
            .with_state(resources)
    }

    async fn handle_list_products(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<Vec<Product>>, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let filter = OwnershipFilter::for_context(&ctx);

        let products = resources.database.list_products(&filter).await?;
        Ok(Json(products))
    }

    async fn handle_get_product(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<Product>, AppError> {
        let product_id = parse_uuid(&id)?;
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let filter = OwnershipFilter::for_context(&ctx);

        // A cross-tenant id fails the filter inside the query and reads as
        // "not found", indistinguishable from a genuinely absent record.
        let product = resources
            .database
            .get_product(&filter, product_id)
            .await?
            .ok_or_else(|| AppError::not_found("product"))?;

        Ok(Json(product))
    }

    async fn handle_create_product(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
        Json(request): Json<CreateProductRequest>,
    ) -> Result<Response, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let tenant_id = require_owner_write(&ctx)?;

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("product name must not be empty"));
        }
        if request.price_cents < 0 {
            return Err(AppError::invalid_input("price must not be negative"));
        }

        let category_id = request.category_id.as_deref().map(parse_uuid).transpose()?;
        if let Some(category_id) = category_id {
            let filter = OwnershipFilter::Tenant(tenant_id);
            let owned = resources
                .database
                .list_categories(&filter)
                .await?
                .iter()
                .any(|c| c.id == category_id);
            if !owned {
                return Err(AppError::invalid_input(
                    "category does not belong to this store",
                ));
            }
        }

        let product = Product::new(
            tenant_id,
            request.name.trim().to_owned(),
            request.description,
            request.price_cents,
            category_id,
        );
        resources.database.create_product(&product).await?;

        Ok((StatusCode::CREATED, Json(product)).into_response())
    }

    async fn handle_list_categories(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<Vec<Category>>, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let filter = OwnershipFilter::for_context(&ctx);

        let categories = resources.database.list_categories(&filter).await?;
        Ok(Json(categories))
    }

    async fn handle_create_category(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
        Json(request): Json<CreateCategoryRequest>,
    ) -> Result<Response, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let tenant_id = require_owner_write(&ctx)?;

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("category name must not be empty"));
        }

        let category = Category::new(tenant_id, request.name.trim().to_owned());
        resources.database.create_category(&category).await?;

        Ok((StatusCode::CREATED, Json(category)).into_response())
    }
}

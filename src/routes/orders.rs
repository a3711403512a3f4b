// ABOUTME: Order and customer route handlers
// ABOUTME: Shopper-facing writes scoped to the storefront host, reads owner-filtered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Order and customer routes
//!
//! Unlike catalog writes, checkout writes come from anonymous shoppers, so
//! they require only a resolved storefront host, not an authenticated owner.
//! The ownership stamp still comes from the resolved context, never from the
//! request body.

use super::{scoped_context, ScopeQuery};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::middleware::ExtractedTenantContext;
use crate::models::{Customer, Order};
use crate::resources::ServerResources;
use crate::tenant::{require_write_scope, OwnershipFilter};
use crate::utils::uuid::parse_uuid;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for order placement
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Customer placing the order, from this store's roster
    pub customer_id: String,
    /// Order total in minor currency units
    pub total_cents: i64,
}

/// Request body for customer creation
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer name
    pub name: String,
    /// Phone number for order updates
    pub phone: Option<String>,
}

/// Order and customer routes implementation
pub struct OrderRoutes;

impl OrderRoutes {
    /// Create all order and customer routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/orders",
                get(Self::handle_list_orders).post(Self::handle_create_order),
            )
            .route(
                "/api/customers",
                get(Self::handle_list_customers).post(Self::handle_create_customer),
            )
            .with_state(resources)
    }

    async fn handle_list_orders(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<Vec<Order>>, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let filter = OwnershipFilter::for_context(&ctx);

        let orders = resources.database.list_orders(&filter).await?;
        Ok(Json(orders))
    }

    async fn handle_create_order(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
        Json(request): Json<CreateOrderRequest>,
    ) -> Result<Response, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let tenant_id = require_write_scope(&ctx)?;

        if request.total_cents < 0 {
            return Err(AppError::invalid_input("order total must not be negative"));
        }

        let customer_id = parse_uuid(&request.customer_id)?;
        let filter = OwnershipFilter::Tenant(tenant_id);
        let known = resources
            .database
            .list_customers(&filter)
            .await?
            .iter()
            .any(|c| c.id == customer_id);
        if !known {
            return Err(AppError::invalid_input(
                "customer does not belong to this store",
            ));
        }

        let order = Order::new(tenant_id, customer_id, request.total_cents);
        resources.database.create_order(&order).await?;

        Ok((StatusCode::CREATED, Json(order)).into_response())
    }

    async fn handle_list_customers(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
    ) -> Result<Json<Vec<Customer>>, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let filter = OwnershipFilter::for_context(&ctx);

        let customers = resources.database.list_customers(&filter).await?;
        Ok(Json(customers))
    }

    async fn handle_create_customer(
        State(resources): State<Arc<ServerResources>>,
        Extension(extracted): Extension<ExtractedTenantContext>,
        headers: HeaderMap,
        Query(query): Query<ScopeQuery>,
        Json(request): Json<CreateCustomerRequest>,
    ) -> Result<Response, AppError> {
        let ctx = scoped_context(&resources, &extracted, &headers, &query).await?;
        let tenant_id = require_write_scope(&ctx)?;

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("customer name must not be empty"));
        }

        let customer = Customer::new(tenant_id, request.name.trim().to_owned(), request.phone);
        resources.database.create_customer(&customer).await?;

        Ok((StatusCode::CREATED, Json(customer)).into_response())
    }
}

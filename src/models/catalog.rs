// ABOUTME: Tenant-owned catalog entities: products, categories, orders, customers
// ABOUTME: Every record carries created_by_tenant_id, stamped at creation and never reassigned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Owned catalog entities
//!
//! Constructors take the owning tenant id explicitly; call sites obtain it
//! through [`crate::tenant::scope::require_write_scope`], which is what turns
//! an unresolved tenant into an `UnscopedWrite` failure before any record
//! exists to mis-own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product in a store's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: Uuid,
    /// Owning tenant, set at creation time
    pub created_by_tenant_id: Uuid,
    /// Product name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Price in minor currency units
    pub price_cents: i64,
    /// Optional category within the same store
    pub category_id: Option<Uuid>,
    /// When the product was created
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product owned by the given tenant
    #[must_use]
    pub fn new(
        created_by_tenant_id: Uuid,
        name: String,
        description: Option<String>,
        price_cents: i64,
        category_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_by_tenant_id,
            name,
            description,
            price_cents,
            category_id,
            created_at: Utc::now(),
        }
    }
}

/// A catalog category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: Uuid,
    /// Owning tenant, set at creation time
    pub created_by_tenant_id: Uuid,
    /// Category name
    pub name: String,
    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category owned by the given tenant
    #[must_use]
    pub fn new(created_by_tenant_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_by_tenant_id,
            name,
            created_at: Utc::now(),
        }
    }
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: Uuid,
    /// Owning tenant, set at creation time
    pub created_by_tenant_id: Uuid,
    /// Customer placing the order, within the same store
    pub customer_id: Uuid,
    /// Order total in minor currency units
    pub total_cents: i64,
    /// Order status (pending, paid, shipped, cancelled)
    pub status: String,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order owned by the given tenant
    #[must_use]
    pub fn new(created_by_tenant_id: Uuid, customer_id: Uuid, total_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_by_tenant_id,
            customer_id,
            total_cents,
            status: "pending".into(),
            created_at: Utc::now(),
        }
    }
}

/// A customer on a store's roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer identifier
    pub id: Uuid,
    /// Owning tenant, set at creation time
    pub created_by_tenant_id: Uuid,
    /// Customer name
    pub name: String,
    /// Phone number for order updates
    pub phone: Option<String>,
    /// When the customer first appeared
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer owned by the given tenant
    #[must_use]
    pub fn new(created_by_tenant_id: Uuid, name: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_by_tenant_id,
            name,
            phone,
            created_at: Utc::now(),
        }
    }
}

/// Dashboard aggregates for one store
///
/// Produced by a query that composes the ownership predicate before
/// aggregation; an unresolved tenant yields the zeroed summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of products in the store
    pub product_count: i64,
    /// Number of categories in the store
    pub category_count: i64,
    /// Number of orders placed
    pub order_count: i64,
    /// Number of customers on the roster
    pub customer_count: i64,
    /// Revenue across all orders, in minor currency units
    pub revenue_cents: i64,
}

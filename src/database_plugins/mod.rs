// ABOUTME: Database abstraction layer for the storefront platform
// ABOUTME: Plugin architecture with a SQLite backend and room for PostgreSQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Database Abstraction Layer
//!
//! The tenant directory and every owned-collection accessor live behind
//! [`DatabaseProvider`]. The resolver, provisioner, and routes depend only on
//! this contract; the storage engine is an external collaborator.
//!
//! Read methods over owned collections take an
//! [`crate::tenant::OwnershipFilter`], and implementations must honor its
//! empty variant by returning nothing — the filter is the isolation boundary,
//! not a hint.

use crate::errors::AppResult;
use crate::models::{Category, Customer, DashboardSummary, Order, Product, Tenant, User};
use crate::tenant::OwnershipFilter;
use async_trait::async_trait;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide a
/// consistent interface for the application layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database connection
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> AppResult<()>;

    // ================================
    // User Accounts
    // ================================

    /// Create a new user account
    async fn create_user(&self, user: &User) -> AppResult<Uuid>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    // ================================
    // Tenant Directory
    // ================================

    /// Create a new tenant record
    ///
    /// Uniqueness of `subdomain_label`, `custom_domain`, and `owner_user_id`
    /// is enforced by storage constraints; violations surface as
    /// `TenantConflict`.
    async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()>;

    /// Get tenant by ID
    async fn get_tenant_by_id(&self, tenant_id: Uuid) -> AppResult<Option<Tenant>>;

    /// Get tenant by subdomain label
    async fn get_tenant_by_subdomain(&self, label: &str) -> AppResult<Option<Tenant>>;

    /// Get tenant by exact custom domain
    async fn get_tenant_by_custom_domain(&self, domain: &str) -> AppResult<Option<Tenant>>;

    /// Get tenant by owner user id
    async fn get_tenant_by_owner(&self, owner_user_id: Uuid) -> AppResult<Option<Tenant>>;

    /// Bind a custom domain to a tenant
    async fn bind_custom_domain(&self, tenant_id: Uuid, domain: &str) -> AppResult<()>;

    // ================================
    // Owned Collections
    // ================================

    /// Insert a product (ownership already stamped)
    async fn create_product(&self, product: &Product) -> AppResult<()>;

    /// List products passing the ownership filter
    async fn list_products(&self, filter: &OwnershipFilter) -> AppResult<Vec<Product>>;

    /// Get one product, still subject to the ownership filter
    async fn get_product(
        &self,
        filter: &OwnershipFilter,
        product_id: Uuid,
    ) -> AppResult<Option<Product>>;

    /// Insert a category (ownership already stamped)
    async fn create_category(&self, category: &Category) -> AppResult<()>;

    /// List categories passing the ownership filter
    async fn list_categories(&self, filter: &OwnershipFilter) -> AppResult<Vec<Category>>;

    /// Insert an order (ownership already stamped)
    async fn create_order(&self, order: &Order) -> AppResult<()>;

    /// List orders passing the ownership filter
    async fn list_orders(&self, filter: &OwnershipFilter) -> AppResult<Vec<Order>>;

    /// Insert a customer (ownership already stamped)
    async fn create_customer(&self, customer: &Customer) -> AppResult<()>;

    /// List customers passing the ownership filter
    async fn list_customers(&self, filter: &OwnershipFilter) -> AppResult<Vec<Customer>>;

    /// Dashboard aggregates with the ownership predicate composed into the
    /// query; never aggregate globally and filter afterwards
    async fn dashboard_summary(&self, filter: &OwnershipFilter) -> AppResult<DashboardSummary>;
}

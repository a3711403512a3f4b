// ABOUTME: Database factory with runtime backend selection from the connection string
// ABOUTME: Delegating enum over the compiled-in database implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Database factory for creating database providers
//!
//! Detects the backend from the connection string scheme and delegates every
//! [`DatabaseProvider`] call to the selected implementation.

use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, Customer, DashboardSummary, Order, Product, Tenant, User};
use crate::tenant::OwnershipFilter;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

/// Database instance wrapper that delegates to the appropriate implementation
///
/// Single-backend today; the enum is the seam a second backend would slot
/// into without touching any call site.
#[derive(Clone)]
pub enum Database {
    SQLite(SqliteDatabase),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite",
        }
    }
}

macro_rules! delegate {
    ($self:expr, $db:ident => $body:expr) => {
        match $self {
            Self::SQLite($db) => $body,
        }
    };
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> AppResult<Self> {
        if database_url.starts_with("sqlite:") {
            let db = SqliteDatabase::new(database_url).await?;
            info!("database backend selected: SQLite");
            return Ok(Self::SQLite(db));
        }

        Err(AppError::config(format!(
            "unsupported database URL scheme: {database_url}"
        )))
    }

    async fn migrate(&self) -> AppResult<()> {
        delegate!(self, db => db.migrate().await)
    }

    async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        delegate!(self, db => db.create_user(user).await)
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        delegate!(self, db => db.get_user(user_id).await)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        delegate!(self, db => db.get_user_by_email(email).await)
    }

    async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        delegate!(self, db => db.create_tenant(tenant).await)
    }

    async fn get_tenant_by_id(&self, tenant_id: Uuid) -> AppResult<Option<Tenant>> {
        delegate!(self, db => db.get_tenant_by_id(tenant_id).await)
    }

    async fn get_tenant_by_subdomain(&self, label: &str) -> AppResult<Option<Tenant>> {
        delegate!(self, db => db.get_tenant_by_subdomain(label).await)
    }

    async fn get_tenant_by_custom_domain(&self, domain: &str) -> AppResult<Option<Tenant>> {
        delegate!(self, db => db.get_tenant_by_custom_domain(domain).await)
    }

    async fn get_tenant_by_owner(&self, owner_user_id: Uuid) -> AppResult<Option<Tenant>> {
        delegate!(self, db => db.get_tenant_by_owner(owner_user_id).await)
    }

    async fn bind_custom_domain(&self, tenant_id: Uuid, domain: &str) -> AppResult<()> {
        delegate!(self, db => db.bind_custom_domain(tenant_id, domain).await)
    }

    async fn create_product(&self, product: &Product) -> AppResult<()> {
        delegate!(self, db => db.create_product(product).await)
    }

    async fn list_products(&self, filter: &OwnershipFilter) -> AppResult<Vec<Product>> {
        delegate!(self, db => db.list_products(filter).await)
    }

    async fn get_product(
        &self,
        filter: &OwnershipFilter,
        product_id: Uuid,
    ) -> AppResult<Option<Product>> {
        delegate!(self, db => db.get_product(filter, product_id).await)
    }

    async fn create_category(&self, category: &Category) -> AppResult<()> {
        delegate!(self, db => db.create_category(category).await)
    }

    async fn list_categories(&self, filter: &OwnershipFilter) -> AppResult<Vec<Category>> {
        delegate!(self, db => db.list_categories(filter).await)
    }

    async fn create_order(&self, order: &Order) -> AppResult<()> {
        delegate!(self, db => db.create_order(order).await)
    }

    async fn list_orders(&self, filter: &OwnershipFilter) -> AppResult<Vec<Order>> {
        delegate!(self, db => db.list_orders(filter).await)
    }

    async fn create_customer(&self, customer: &Customer) -> AppResult<()> {
        delegate!(self, db => db.create_customer(customer).await)
    }

    async fn list_customers(&self, filter: &OwnershipFilter) -> AppResult<Vec<Customer>> {
        delegate!(self, db => db.list_customers(filter).await)
    }

    async fn dashboard_summary(&self, filter: &OwnershipFilter) -> AppResult<DashboardSummary> {
        delegate!(self, db => db.dashboard_summary(filter).await)
    }
}

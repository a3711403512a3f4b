// ABOUTME: SQLite database implementation of the storefront DatabaseProvider
// ABOUTME: Schema migration, tenant directory lookups, and ownership-filtered queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! SQLite database implementation
//!
//! Uniqueness of `subdomain_label`, `custom_domain`, and `owner_user_id` is
//! carried by unique indexes; a violation reaches the caller as
//! `TenantConflict` through the `sqlx::Error` conversion, regardless of any
//! pre-check the caller ran.

use super::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, Customer, DashboardSummary, Order, Product, Tenant, User};
use crate::tenant::OwnershipFilter;
use crate::utils::uuid::parse_uuid;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// SQLite database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Access the underlying pool (test support)
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        // rwc: create the database file on first run
        let connection_string = if in_memory || database_url.contains('?') {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        // An in-memory database lives and dies with its connection; a wider
        // pool would hand out empty databases.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_string)
                .await?
        } else {
            SqlitePool::connect(&connection_string).await?
        };

        Ok(Self { pool })
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tenants (
                id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                subdomain_label TEXT UNIQUE,
                custom_domain TEXT UNIQUE,
                owner_user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                created_by_tenant_id TEXT NOT NULL REFERENCES tenants(id),
                name TEXT NOT NULL,
                description TEXT,
                price_cents INTEGER NOT NULL,
                category_id TEXT,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                created_by_tenant_id TEXT NOT NULL REFERENCES tenants(id),
                name TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS customers (
                id TEXT PRIMARY KEY,
                created_by_tenant_id TEXT NOT NULL REFERENCES tenants(id),
                name TEXT NOT NULL,
                phone TEXT,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                created_by_tenant_id TEXT NOT NULL REFERENCES tenants(id),
                customer_id TEXT NOT NULL REFERENCES customers(id),
                total_cents INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_tenants_subdomain ON tenants(subdomain_label)",
            "CREATE INDEX IF NOT EXISTS idx_tenants_custom_domain ON tenants(custom_domain)",
            "CREATE INDEX IF NOT EXISTS idx_products_owner ON products(created_by_tenant_id)",
            "CREATE INDEX IF NOT EXISTS idx_categories_owner ON categories(created_by_tenant_id)",
            "CREATE INDEX IF NOT EXISTS idx_customers_owner ON customers(created_by_tenant_id)",
            "CREATE INDEX IF NOT EXISTS idx_orders_owner ON orders(created_by_tenant_id)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }

    async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO tenants
                (id, display_name, subdomain_label, custom_domain, owner_user_id,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(tenant.id.to_string())
        .bind(&tenant.display_name)
        .bind(&tenant.subdomain_label)
        .bind(&tenant.custom_domain)
        .bind(tenant.owner_user_id.to_string())
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_tenant_by_id(&self, tenant_id: Uuid) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE id = ?")
            .bind(tenant_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_tenant(&r)).transpose()
    }

    async fn get_tenant_by_subdomain(&self, label: &str) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE subdomain_label = ?")
            .bind(label)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_tenant(&r)).transpose()
    }

    async fn get_tenant_by_custom_domain(&self, domain: &str) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE custom_domain = ?")
            .bind(domain)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_tenant(&r)).transpose()
    }

    async fn get_tenant_by_owner(&self, owner_user_id: Uuid) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE owner_user_id = ?")
            .bind(owner_user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_tenant(&r)).transpose()
    }

    async fn bind_custom_domain(&self, tenant_id: Uuid, domain: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE tenants SET custom_domain = ?, updated_at = ? WHERE id = ?",
        )
        .bind(domain)
        .bind(Utc::now())
        .bind(tenant_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("tenant"));
        }
        Ok(())
    }

    async fn create_product(&self, product: &Product) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO products
                (id, created_by_tenant_id, name, description, price_cents,
                 category_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(product.id.to_string())
        .bind(product.created_by_tenant_id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.category_id.map(|id| id.to_string()))
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_products(&self, filter: &OwnershipFilter) -> AppResult<Vec<Product>> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            "SELECT * FROM products WHERE created_by_tenant_id = ? ORDER BY created_at DESC",
        )
        .bind(tenant_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn get_product(
        &self,
        filter: &OwnershipFilter,
        product_id: Uuid,
    ) -> AppResult<Option<Product>> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(None);
        };

        let row = sqlx::query("SELECT * FROM products WHERE id = ? AND created_by_tenant_id = ?")
            .bind(product_id.to_string())
            .bind(tenant_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    async fn create_category(&self, category: &Category) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO categories (id, created_by_tenant_id, name, created_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(category.id.to_string())
        .bind(category.created_by_tenant_id.to_string())
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_categories(&self, filter: &OwnershipFilter) -> AppResult<Vec<Category>> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            "SELECT * FROM categories WHERE created_by_tenant_id = ? ORDER BY name",
        )
        .bind(tenant_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_category).collect()
    }

    async fn create_order(&self, order: &Order) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO orders
                (id, created_by_tenant_id, customer_id, total_cents, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(order.id.to_string())
        .bind(order.created_by_tenant_id.to_string())
        .bind(order.customer_id.to_string())
        .bind(order.total_cents)
        .bind(&order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_orders(&self, filter: &OwnershipFilter) -> AppResult<Vec<Order>> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            "SELECT * FROM orders WHERE created_by_tenant_id = ? ORDER BY created_at DESC",
        )
        .bind(tenant_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect()
    }

    async fn create_customer(&self, customer: &Customer) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO customers (id, created_by_tenant_id, name, phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(customer.id.to_string())
        .bind(customer.created_by_tenant_id.to_string())
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_customers(&self, filter: &OwnershipFilter) -> AppResult<Vec<Customer>> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            "SELECT * FROM customers WHERE created_by_tenant_id = ? ORDER BY created_at DESC",
        )
        .bind(tenant_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn dashboard_summary(&self, filter: &OwnershipFilter) -> AppResult<DashboardSummary> {
        let Some(tenant_id) = filter.tenant_id() else {
            return Ok(DashboardSummary::default());
        };
        let owner = tenant_id.to_string();

        // Ownership predicate composed inside each aggregate, never applied
        // after a global aggregation.
        let row = sqlx::query(
            r"
            SELECT
                (SELECT COUNT(*) FROM products  WHERE created_by_tenant_id = ?1) AS product_count,
                (SELECT COUNT(*) FROM categories WHERE created_by_tenant_id = ?1) AS category_count,
                (SELECT COUNT(*) FROM orders    WHERE created_by_tenant_id = ?1) AS order_count,
                (SELECT COUNT(*) FROM customers WHERE created_by_tenant_id = ?1) AS customer_count,
                (SELECT COALESCE(SUM(total_cents), 0) FROM orders
                    WHERE created_by_tenant_id = ?1) AS revenue_cents
            ",
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardSummary {
            product_count: row.try_get("product_count").map_err(AppError::from)?,
            category_count: row.try_get("category_count").map_err(AppError::from)?,
            order_count: row.try_get("order_count").map_err(AppError::from)?,
            customer_count: row.try_get("customer_count").map_err(AppError::from)?,
            revenue_cents: row.try_get("revenue_cents").map_err(AppError::from)?,
        })
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        email: row.try_get("email").map_err(AppError::from)?,
        display_name: row.try_get("display_name").map_err(AppError::from)?,
        password_hash: row.try_get("password_hash").map_err(AppError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
    })
}

fn row_to_tenant(row: &SqliteRow) -> AppResult<Tenant> {
    Ok(Tenant {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        display_name: row.try_get("display_name").map_err(AppError::from)?,
        subdomain_label: row.try_get("subdomain_label").map_err(AppError::from)?,
        custom_domain: row.try_get("custom_domain").map_err(AppError::from)?,
        owner_user_id: parse_uuid(
            &row.try_get::<String, _>("owner_user_id")
                .map_err(AppError::from)?,
        )?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(AppError::from)?,
    })
}

fn row_to_product(row: &SqliteRow) -> AppResult<Product> {
    Ok(Product {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        created_by_tenant_id: parse_uuid(
            &row.try_get::<String, _>("created_by_tenant_id")
                .map_err(AppError::from)?,
        )?,
        name: row.try_get("name").map_err(AppError::from)?,
        description: row.try_get("description").map_err(AppError::from)?,
        price_cents: row.try_get("price_cents").map_err(AppError::from)?,
        category_id: row
            .try_get::<Option<String>, _>("category_id")
            .map_err(AppError::from)?
            .as_deref()
            .map(parse_uuid)
            .transpose()?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
    })
}

fn row_to_category(row: &SqliteRow) -> AppResult<Category> {
    Ok(Category {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        created_by_tenant_id: parse_uuid(
            &row.try_get::<String, _>("created_by_tenant_id")
                .map_err(AppError::from)?,
        )?,
        name: row.try_get("name").map_err(AppError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
    })
}

fn row_to_order(row: &SqliteRow) -> AppResult<Order> {
    Ok(Order {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        created_by_tenant_id: parse_uuid(
            &row.try_get::<String, _>("created_by_tenant_id")
                .map_err(AppError::from)?,
        )?,
        customer_id: parse_uuid(
            &row.try_get::<String, _>("customer_id")
                .map_err(AppError::from)?,
        )?,
        total_cents: row.try_get("total_cents").map_err(AppError::from)?,
        status: row.try_get("status").map_err(AppError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
    })
}

fn row_to_customer(row: &SqliteRow) -> AppResult<Customer> {
    Ok(Customer {
        id: parse_uuid(&row.try_get::<String, _>("id").map_err(AppError::from)?)?,
        created_by_tenant_id: parse_uuid(
            &row.try_get::<String, _>("created_by_tenant_id")
                .map_err(AppError::from)?,
        )?,
        name: row.try_get("name").map_err(AppError::from)?,
        phone: row.try_get("phone").map_err(AppError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(AppError::from)?,
    })
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, resolver, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `storefront_server`
//!
//! Common setup to reduce duplication across integration tests.

use anyhow::Result;
use std::sync::{Arc, Once};
use storefront_server::{
    auth::AuthManager,
    config::environment::{ServerConfig, TenancyConfig},
    database_plugins::{factory::Database, DatabaseProvider},
    hostname::HostnameNormalizer,
    models::{Tenant, User},
    resources::ServerResources,
    tenant::{TenantProvisioner, TenantResolver},
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database with migrations applied
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    database.migrate().await?;
    Ok(Arc::new(database))
}

/// Normalizer configured like production: codeopx.com root, www/localhost reserved
pub fn test_normalizer() -> HostnameNormalizer {
    HostnameNormalizer::new("codeopx.com", &["www".into(), "localhost".into()])
}

/// Resolver over the given database with the "admin" marketing label
pub fn create_test_resolver(database: Arc<Database>) -> TenantResolver {
    TenantResolver::new(database, test_normalizer(), vec!["admin".into()])
}

/// Provisioner over the given database
pub fn create_test_provisioner(database: Arc<Database>) -> TenantProvisioner {
    TenantProvisioner::new(database, test_normalizer())
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    Arc::new(AuthManager::new("test-jwt-secret", 24))
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    create_test_user_with_email(database, "owner@example.com").await
}

/// Create a test user with custom email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<(Uuid, User)> {
    let user = User::new(
        email.to_owned(),
        "test_hash".to_owned(),
        Some("Test Owner".to_owned()),
    );
    let user_id = user.id;

    database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Create a tenant with a subdomain label directly in the directory
pub async fn create_test_tenant(
    database: &Database,
    name: &str,
    label: &str,
    owner: Uuid,
) -> Result<Tenant> {
    let tenant = Tenant::new(name.to_owned(), label.to_owned(), owner);
    database.create_tenant(&tenant).await?;
    Ok(tenant)
}

/// Full resource container over an in-memory database, for router tests
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = test_config();

    // ServerResources owns its Database; rebuild one over the same pool by
    // cloning out of the Arc.
    let resources = ServerResources::new((*database).clone(), config);
    Ok(Arc::new(resources))
}

/// Server configuration matching the test normalizer and auth manager
pub fn test_config() -> ServerConfig {
    use storefront_server::config::environment::{
        AuthConfig, DatabaseConfig, Environment, LogLevel,
    };

    ServerConfig {
        http_port: 0,
        base_url: "http://localhost:0".into(),
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
        },
        auth: AuthConfig {
            jwt_secret: "test-jwt-secret".into(),
            jwt_expiry_hours: 24,
        },
        tenancy: TenancyConfig {
            root_domain: "codeopx.com".into(),
            reserved_labels: vec!["www".into(), "localhost".into()],
            marketing_labels: vec!["admin".into()],
        },
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
    }
}

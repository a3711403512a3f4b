// ABOUTME: Shared server resources container for dependency injection
// ABOUTME: Single construction point for database, auth, resolver, and provisioner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Centralized server resources
//!
//! All shared dependencies are created once at startup and passed around as
//! `Arc<ServerResources>` instead of cloning individual Arcs everywhere.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::hostname::HostnameNormalizer;
use crate::tenant::{TenantProvisioner, TenantResolver};
use std::sync::Arc;

/// Container for all shared server dependencies
pub struct ServerResources {
    /// Database connection
    pub database: Arc<Database>,
    /// JWT authentication manager
    pub auth_manager: Arc<AuthManager>,
    /// Hostname-to-tenant resolver
    pub tenant_resolver: Arc<TenantResolver>,
    /// Tenant provisioning service
    pub provisioner: Arc<TenantProvisioner>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire up the resource container from a connected database and config
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let database = Arc::new(database);
        let normalizer = HostnameNormalizer::new(
            &config.tenancy.root_domain,
            &config.tenancy.reserved_labels,
        );

        let tenant_resolver = Arc::new(TenantResolver::new(
            database.clone(),
            normalizer.clone(),
            config.tenancy.marketing_labels.clone(),
        ));
        let provisioner = Arc::new(TenantProvisioner::new(database.clone(), normalizer));
        let auth_manager = Arc::new(AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.jwt_expiry_hours,
        ));

        Self {
            database,
            auth_manager,
            tenant_resolver,
            provisioner,
            config: Arc::new(config),
        }
    }
}

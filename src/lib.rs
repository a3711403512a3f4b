// ABOUTME: Main library entry point for the multi-tenant storefront platform
// ABOUTME: Hostname-based tenant resolution, scoped data access, and provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

#![deny(unsafe_code)]

//! # Storefront Server
//!
//! A single deployment hosts many independent merchant stores, each reachable
//! through its own subdomain of the platform root domain or a bound custom
//! domain. The crate centers on the tenant isolation boundary:
//!
//! - **Hostname normalization**: pure classification of a raw Host header into
//!   base domain / tenant subdomain / possible custom domain.
//! - **Tenant resolution**: an ordered, documented fallback chain from a
//!   normalized hostname to a [`tenant::TenantContext`].
//! - **Request-scope propagation**: axum middleware attaching the resolved
//!   context to every inbound request, plus a client-side navigation context.
//! - **Scoped query filters**: every read of tenant-owned records carries an
//!   ownership predicate; an unresolved tenant scopes to the empty set, never
//!   to "all records".
//!
//! Catalog, order, and customer endpoints exist as thin consumers of the
//! scoped filter layer; they carry no business logic of their own.

/// Viewer authentication (JWT issuing and validation)
pub mod auth;

/// Client-side tenant context and API path qualification helpers
pub mod client;

/// Configuration management and environment parsing
pub mod config;

/// Database abstraction layer with plugin support
pub mod database_plugins;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pure hostname normalization and classification
pub mod hostname;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request tracing and tenant context propagation
pub mod middleware;

/// Persistent data models (tenants, users, owned catalog entities)
pub mod models;

/// Centralized resource container for dependency injection
pub mod resources;

/// `HTTP` routes for tenant lookup, provisioning, and scoped entity access
pub mod routes;

/// Tenant resolution, provisioning, and ownership scoping
pub mod tenant;

/// Utility functions and helpers
pub mod utils;

// ABOUTME: Persistent data models for the storefront platform
// ABOUTME: Tenant records, user accounts, and tenant-owned catalog entities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Common data models
//!
//! Every record under [`catalog`] plays the "owned entity" role: it carries a
//! `created_by_tenant_id` attribute set at creation time and never reassigned.

/// Tenant-owned catalog entities (products, categories, orders, customers)
pub mod catalog;
/// Tenant (merchant store) records
pub mod tenant;
/// User accounts (store owners and shoppers)
pub mod user;

pub use catalog::{Category, Customer, DashboardSummary, Order, Product};
pub use tenant::Tenant;
pub use user::User;

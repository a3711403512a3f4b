// ABOUTME: HTTP middleware for the storefront server
// ABOUTME: Tenant context extraction and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

pub mod cors;
pub mod tenant;

pub use cors::setup_cors;
pub use tenant::{tenant_context_middleware, ExtractedTenantContext};

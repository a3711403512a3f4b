// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Cross-Origin Resource Sharing setup for storefront web clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS for the storefront API
///
/// Reads `CORS_ALLOWED_ORIGINS` (comma-separated). Empty or "*" allows any
/// origin, which suits development where every tenant subdomain is a distinct
/// origin.
#[must_use]
pub fn setup_cors() -> CorsLayer {
    let configured = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allow_origin = if configured.is_empty() || configured == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = configured
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

// ABOUTME: Client-side tenant resolution support for storefront frontends
// ABOUTME: Lookup client, last-write-wins navigation context, and idempotent path qualifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Storefront Client Support
//!
//! The server resolves tenants from the Host header; a browser-style client
//! resolves once per navigation through `GET /api/tenant/lookup` and keeps
//! the result in a [`NavigationContext`].
//!
//! Navigations race: a user can click away before the previous lookup
//! returns. The context is last-write-wins by navigation order, not by
//! response arrival order — a stale response for an abandoned navigation is
//! dropped, never installed over the newer one.

use crate::errors::{AppError, AppResult};
use crate::routes::TenantLookupResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use url::Url;

/// HTTP client for the tenant lookup endpoint
#[derive(Clone)]
pub struct TenantLookupClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TenantLookupClient {
    /// Create a lookup client against the given API base URL
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the base URL does not parse.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::invalid_input(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Resolve a hostname through the platform API
    ///
    /// # Errors
    ///
    /// Returns an internal error if the request fails or the response body
    /// does not parse. An unmatched host is a successful response, not an
    /// error.
    pub async fn lookup(
        &self,
        host: &str,
        bearer_token: Option<&str>,
    ) -> AppResult<TenantLookupResponse> {
        let mut endpoint = self.base_url.clone();
        endpoint.set_path("/api/tenant/lookup");

        let mut request = self.http.get(endpoint).query(&[("host", host)]);

        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::internal(format!("tenant lookup request failed: {e}")))?;

        response
            .error_for_status()
            .map_err(|e| AppError::internal(format!("tenant lookup failed: {e}")))?
            .json::<TenantLookupResponse>()
            .await
            .map_err(|e| AppError::internal(format!("tenant lookup response malformed: {e}")))
    }
}

/// Ticket for one navigation, handed back to [`NavigationContext::install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationToken {
    generation: u64,
}

/// Per-session tenant context with last-write-wins navigation semantics
///
/// `begin_navigation` stamps each navigation with a generation counter;
/// `install` accepts a result only if no newer navigation has begun since.
pub struct NavigationContext {
    generation: AtomicU64,
    current: Mutex<Option<(u64, TenantLookupResponse)>>,
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationContext {
    /// Create an empty navigation context
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Begin a navigation, invalidating any in-flight older lookup
    pub fn begin_navigation(&self) -> NavigationToken {
        NavigationToken {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Install a lookup result for the given navigation
    ///
    /// Returns `true` if installed; `false` means a newer navigation has
    /// begun and this result was discarded.
    pub fn install(&self, token: NavigationToken, resolved: TenantLookupResponse) -> bool {
        if token.generation != self.generation.load(Ordering::SeqCst) {
            return false;
        }

        let mut current = self.current.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match current.as_ref() {
            Some((installed, _)) if *installed > token.generation => false,
            _ => {
                *current = Some((token.generation, resolved));
                true
            }
        }
    }

    /// The currently installed resolution, if any
    #[must_use]
    pub fn current(&self) -> Option<TenantLookupResponse> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|(_, resolved)| resolved.clone())
    }

    /// Clear the context, e.g. on logout
    pub fn clear(&self) {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
    }
}

/// Qualify an app path with a store prefix for base-domain navigation
///
/// On a storefront host the hostname already scopes the request and paths
/// pass through untouched (`label` is `None`). On the base domain, paths are
/// prefixed with `/store/{label}`. Idempotent: an already-qualified path is
/// returned unchanged, so repeated rewrites cannot stack prefixes.
#[must_use]
pub fn tenant_qualified_path(path: &str, label: Option<&str>) -> String {
    let normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    let Some(label) = label else {
        return normalized;
    };

    let prefix = format!("/store/{label}");
    if normalized == prefix || normalized.starts_with(&format!("{prefix}/")) {
        return normalized;
    }

    if normalized == "/" {
        prefix
    } else {
        format!("{prefix}{normalized}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::HostKind;

    fn resolved(label: &str) -> TenantLookupResponse {
        TenantLookupResponse {
            host_kind: HostKind::TenantSubdomain,
            tenant_id: Some(uuid::Uuid::new_v4().to_string()),
            subdomain_label: Some(label.to_owned()),
            custom_domain: None,
            display_name: Some(label.to_owned()),
            is_owner_viewer: false,
        }
    }

    #[test]
    fn test_client_rejects_malformed_base_url() {
        assert!(TenantLookupClient::new("http://localhost:8080").is_ok());
        assert!(TenantLookupClient::new("not a url").is_err());
    }

    #[test]
    fn test_last_navigation_wins() {
        let ctx = NavigationContext::new();

        let first = ctx.begin_navigation();
        let second = ctx.begin_navigation();

        // The newer navigation's result lands first
        assert!(ctx.install(second, resolved("shop2")));
        // The older lookup returns late and must be discarded
        assert!(!ctx.install(first, resolved("shop1")));

        let current = ctx.current().unwrap();
        assert_eq!(current.display_name.as_deref(), Some("shop2"));
    }

    #[test]
    fn test_install_in_order() {
        let ctx = NavigationContext::new();

        let token = ctx.begin_navigation();
        assert!(ctx.install(token, resolved("shop1")));
        assert_eq!(
            ctx.current().unwrap().display_name.as_deref(),
            Some("shop1")
        );

        let token = ctx.begin_navigation();
        assert!(ctx.install(token, resolved("shop2")));
        assert_eq!(
            ctx.current().unwrap().display_name.as_deref(),
            Some("shop2")
        );
    }

    #[test]
    fn test_clear() {
        let ctx = NavigationContext::new();
        let token = ctx.begin_navigation();
        ctx.install(token, resolved("shop1"));

        ctx.clear();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_path_qualifier() {
        assert_eq!(
            tenant_qualified_path("/products", Some("shop1")),
            "/store/shop1/products"
        );
        assert_eq!(tenant_qualified_path("/", Some("shop1")), "/store/shop1");
        assert_eq!(
            tenant_qualified_path("products", Some("shop1")),
            "/store/shop1/products"
        );
        // No label means no rewrite
        assert_eq!(tenant_qualified_path("/products", None), "/products");

        // Driven from a lookup response, the label comes straight through
        let resp = resolved("shop1");
        assert_eq!(
            tenant_qualified_path("/cart", resp.subdomain_label.as_deref()),
            "/store/shop1/cart"
        );
    }

    #[test]
    fn test_path_qualifier_is_idempotent() {
        let once = tenant_qualified_path("/products", Some("shop1"));
        let twice = tenant_qualified_path(&once, Some("shop1"));
        assert_eq!(once, twice);

        assert_eq!(
            tenant_qualified_path("/store/shop1", Some("shop1")),
            "/store/shop1"
        );
    }
}

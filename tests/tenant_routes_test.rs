// ABOUTME: HTTP integration tests for tenant-scoped routes
// ABOUTME: Exercises lookup, provisioning, catalog scoping, and dashboard over the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use common::{create_test_resources, create_test_tenant, create_test_user_with_email};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use storefront_server::models::User;
use storefront_server::resources::ServerResources;
use storefront_server::routes::build_router;
use std::sync::Arc;

async fn owner_with_token(
    resources: &Arc<ServerResources>,
    email: &str,
) -> (uuid::Uuid, String) {
    let (owner, user) = create_test_user_with_email(&resources.database, email)
        .await
        .unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap();
    (owner, token)
}

fn token_for(resources: &Arc<ServerResources>, user: &User) -> String {
    resources.auth_manager.generate_token(user).unwrap()
}

#[tokio::test]
async fn test_lookup_endpoint_classifies_hosts() {
    let resources = create_test_resources().await.unwrap();
    let (owner, _) = owner_with_token(&resources, "a@example.com").await;
    create_test_tenant(&resources.database, "Shop One", "shop1", owner)
        .await
        .unwrap();

    let app = build_router(resources.clone());
    let response = AxumTestRequest::get("/api/tenant/lookup?host=shop1.codeopx.com")
        .host("codeopx.com")
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["host_kind"], "tenant_subdomain");
    assert!(body["tenant_id"].is_string());
    assert_eq!(body["subdomain_label"], "shop1");
    assert_eq!(body["display_name"], "Shop One");

    let app = build_router(resources);
    let response = AxumTestRequest::get("/api/tenant/lookup?host=nobody.codeopx.com")
        .host("codeopx.com")
        .send(app)
        .await;
    assert_eq!(response.json()["host_kind"], "unmatched_host");
}

#[tokio::test]
async fn test_register_login_and_provision_flow() {
    let resources = create_test_resources().await.unwrap();
    let app = build_router(resources.clone());

    let response = AxumTestRequest::post("/api/auth/register")
        .host("codeopx.com")
        .json(&json!({"email": "anjum@example.com", "password": "s3cret-pass"}))
        .send(app)
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/auth/login")
        .host("codeopx.com")
        .json(&json!({"email": "anjum@example.com", "password": "s3cret-pass"}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let token = response.json()["token"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::post("/api/tenants")
        .host("codeopx.com")
        .bearer(&token)
        .json(&json!({"name": "Anjum's"}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);
    let body = response.json();
    assert_eq!(body["subdomain_label"], "anjums");
    assert_eq!(body["storefront_host"], "anjums.codeopx.com");

    // Provisioning again for the same owner conflicts
    let response = AxumTestRequest::post("/api/tenants")
        .host("codeopx.com")
        .bearer(&token)
        .json(&json!({"name": "Another"}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 409);

    // And the new storefront host resolves immediately
    let response = AxumTestRequest::get("/api/tenant/lookup?host=anjums.codeopx.com")
        .host("codeopx.com")
        .send(build_router(resources))
        .await;
    assert_eq!(response.json()["host_kind"], "tenant_subdomain");
}

#[tokio::test]
async fn test_provisioning_requires_auth() {
    let resources = create_test_resources().await.unwrap();
    let app = build_router(resources);

    let response = AxumTestRequest::post("/api/tenants")
        .host("codeopx.com")
        .json(&json!({"name": "Anjum's"}))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_bind_domain_endpoint() {
    let resources = create_test_resources().await.unwrap();
    let (owner, token) = owner_with_token(&resources, "a@example.com").await;
    create_test_tenant(&resources.database, "Anjum's", "anjums", owner)
        .await
        .unwrap();

    let response = AxumTestRequest::put("/api/tenants/domain")
        .host("codeopx.com")
        .bearer(&token)
        .json(&json!({"domain": "anjums-store.pk"}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["custom_domain"], "anjums-store.pk");

    // The bound domain now resolves
    let response = AxumTestRequest::get("/api/tenant/lookup?host=anjums-store.pk")
        .host("codeopx.com")
        .send(build_router(resources))
        .await;
    assert_eq!(response.json()["host_kind"], "tenant_custom_domain");
}

#[tokio::test]
async fn test_product_listing_is_host_scoped() {
    let resources = create_test_resources().await.unwrap();
    let (owner_a, user_a) = create_test_user_with_email(&resources.database, "a@example.com")
        .await
        .unwrap();
    let (owner_b, user_b) = create_test_user_with_email(&resources.database, "b@example.com")
        .await
        .unwrap();
    create_test_tenant(&resources.database, "Store A", "storea", owner_a)
        .await
        .unwrap();
    create_test_tenant(&resources.database, "Store B", "storeb", owner_b)
        .await
        .unwrap();

    let token_a = token_for(&resources, &user_a);
    let token_b = token_for(&resources, &user_b);

    // Each owner creates a product on their own storefront host
    let response = AxumTestRequest::post("/api/products")
        .host("storea.codeopx.com")
        .bearer(&token_a)
        .json(&json!({"name": "Lamp", "price_cents": 4500}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/products")
        .host("storeb.codeopx.com")
        .bearer(&token_b)
        .json(&json!({"name": "Rug", "price_cents": 12000}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);

    // Listing is scoped by the Host header alone
    let response = AxumTestRequest::get("/api/products")
        .host("storea.codeopx.com")
        .send(build_router(resources.clone()))
        .await;
    let body = response.json();
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Lamp");

    // The base domain lists nothing, not everything
    let response = AxumTestRequest::get("/api/products")
        .host("codeopx.com")
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    assert!(response.json().as_array().unwrap().is_empty());

    // An unmatched host also lists nothing
    let response = AxumTestRequest::get("/api/products")
        .host("ghost.codeopx.com")
        .send(build_router(resources))
        .await;
    assert!(response.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unscoped_write_is_refused() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = owner_with_token(&resources, "a@example.com").await;

    let response = AxumTestRequest::post("/api/products")
        .host("codeopx.com")
        .bearer(&token)
        .json(&json!({"name": "Lamp", "price_cents": 4500}))
        .send(build_router(resources))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.json()["error"]["code"], "UNSCOPED_WRITE");
}

#[tokio::test]
async fn test_catalog_write_requires_store_owner() {
    let resources = create_test_resources().await.unwrap();
    let (owner, _) = owner_with_token(&resources, "a@example.com").await;
    let (_, stranger_token) = owner_with_token(&resources, "b@example.com").await;
    create_test_tenant(&resources.database, "Store A", "storea", owner)
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/products")
        .host("storea.codeopx.com")
        .bearer(&stranger_token)
        .json(&json!({"name": "Lamp", "price_cents": 4500}))
        .send(build_router(resources))
        .await;

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_explicit_tenant_mismatch_is_rejected() {
    let resources = create_test_resources().await.unwrap();
    let (owner_a, _) = owner_with_token(&resources, "a@example.com").await;
    let (owner_b, _) = owner_with_token(&resources, "b@example.com").await;
    create_test_tenant(&resources.database, "Store A", "storea", owner_a)
        .await
        .unwrap();
    let tenant_b = create_test_tenant(&resources.database, "Store B", "storeb", owner_b)
        .await
        .unwrap();

    // Host says Store A; the query parameter names Store B
    let response = AxumTestRequest::get(&format!("/api/products?tenant_id={}", tenant_b.id))
        .host("storea.codeopx.com")
        .send(build_router(resources))
        .await;

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_explicit_tenant_on_base_domain_for_owner() {
    let resources = create_test_resources().await.unwrap();
    let (owner, token) = owner_with_token(&resources, "a@example.com").await;
    let tenant = create_test_tenant(&resources.database, "Store A", "storea", owner)
        .await
        .unwrap();

    let product = storefront_server::models::Product::new(
        tenant.id,
        "Lamp".into(),
        None,
        4500,
        None,
    );
    use storefront_server::database_plugins::DatabaseProvider;
    resources.database.create_product(&product).await.unwrap();

    // The owner can scope a base-domain request to their store explicitly
    let response = AxumTestRequest::get(&format!("/api/products?tenant_id={}", tenant.id))
        .host("codeopx.com")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json().as_array().unwrap().len(), 1);

    // Anonymous callers cannot
    let response = AxumTestRequest::get(&format!("/api/products?tenant_id={}", tenant.id))
        .host("codeopx.com")
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_dashboard_access_control() {
    let resources = create_test_resources().await.unwrap();
    let (owner, token) = owner_with_token(&resources, "a@example.com").await;
    create_test_tenant(&resources.database, "Store A", "storea", owner)
        .await
        .unwrap();

    // Unresolved host: 404
    let response = AxumTestRequest::get("/api/dashboard")
        .host("codeopx.com")
        .bearer(&token)
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 404);

    // Shopper on the storefront host: 403
    let response = AxumTestRequest::get("/api/dashboard")
        .host("storea.codeopx.com")
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 403);

    // Owner: 200 with zeroed aggregates
    let response = AxumTestRequest::get("/api/dashboard")
        .host("storea.codeopx.com")
        .bearer(&token)
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["product_count"], 0);
}

#[tokio::test]
async fn test_checkout_flow_on_storefront_host() {
    let resources = create_test_resources().await.unwrap();
    let (owner, _) = owner_with_token(&resources, "a@example.com").await;
    create_test_tenant(&resources.database, "Store A", "storea", owner)
        .await
        .unwrap();

    // Anonymous shopper registers as a customer and places an order
    let response = AxumTestRequest::post("/api/customers")
        .host("storea.codeopx.com")
        .json(&json!({"name": "Asif", "phone": "+92-300-1234567"}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);
    let customer_id = response.json()["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::post("/api/orders")
        .host("storea.codeopx.com")
        .json(&json!({"customer_id": customer_id, "total_cents": 4500}))
        .send(build_router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);
    assert_eq!(response.json()["status"], "pending");

    // A customer from another store cannot be referenced
    let response = AxumTestRequest::post("/api/orders")
        .host("ghost.codeopx.com")
        .json(&json!({"customer_id": customer_id, "total_cents": 4500}))
        .send(build_router(resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_health_endpoint() {
    let resources = create_test_resources().await.unwrap();
    let app = build_router(resources);

    let response = AxumTestRequest::get("/health")
        .host("codeopx.com")
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["status"], "healthy");
}

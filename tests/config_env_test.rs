// ABOUTME: Integration tests for environment-based server configuration
// ABOUTME: Covers defaults, overrides, label list parsing, and production guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use serial_test::serial;
use storefront_server::config::environment::{Environment, ServerConfig};

const CONFIG_VARS: &[&str] = &[
    "HTTP_PORT",
    "BASE_URL",
    "DATABASE_URL",
    "ENVIRONMENT",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "ROOT_DOMAIN",
    "RESERVED_LABELS",
    "MARKETING_LABELS",
    "LOG_LEVEL",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    common::init_test_logging();
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.tenancy.root_domain, "codeopx.com");
    assert!(config.tenancy.reserved_labels.contains(&"www".to_owned()));
    assert!(config.database.url.starts_with("sqlite:"));
    assert_eq!(config.auth.jwt_expiry_hours, 24);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    common::init_test_logging();
    clear_config_env();

    std::env::set_var("HTTP_PORT", "9090");
    std::env::set_var("ROOT_DOMAIN", "Shops.Example.COM");
    std::env::set_var("RESERVED_LABELS", "www, api ,localhost");
    std::env::set_var("MARKETING_LABELS", "admin,pricing");
    std::env::set_var("JWT_EXPIRY_HOURS", "48");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.tenancy.root_domain, "shops.example.com");
    assert_eq!(
        config.tenancy.reserved_labels,
        vec!["www".to_owned(), "api".to_owned(), "localhost".to_owned()]
    );
    assert_eq!(
        config.tenancy.marketing_labels,
        vec!["admin".to_owned(), "pricing".to_owned()]
    );
    assert_eq!(config.auth.jwt_expiry_hours, 48);
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    common::init_test_logging();
    clear_config_env();

    std::env::set_var("HTTP_PORT", "not-a-port");
    let result = ServerConfig::from_env();
    clear_config_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    common::init_test_logging();
    clear_config_env();

    std::env::set_var("ENVIRONMENT", "production");
    let result = ServerConfig::from_env();
    clear_config_env();

    assert!(result.is_err());

    std::env::set_var("ENVIRONMENT", "production");
    std::env::set_var("JWT_SECRET", "a-real-secret");
    let result = ServerConfig::from_env();
    clear_config_env();

    let config = result.unwrap();
    assert!(config.environment.is_production());
    assert_eq!(config.auth.jwt_secret, "a-real-secret");
}

// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, tenancy domains, and auth secrets from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and logging defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string (`sqlite:...`)
    pub url: String,
}

/// Viewer authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret for JWT signing
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Tenancy domain configuration
///
/// `root_domain` is the platform's own domain; `{label}.{root_domain}`
/// resolves to the tenant holding that subdomain label. `reserved_labels`
/// never resolve to a tenant and are refused by the subdomain generator.
/// `marketing_labels` are the explicit resolver fallback: a miss on one of
/// these labels resolves to the base-domain surface instead of UnmatchedHost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Platform root domain (e.g. `codeopx.com`)
    pub root_domain: String,
    /// Labels that always classify as the base domain
    pub reserved_labels: Vec<String>,
    /// Labels that fall back to the base domain after a directory miss
    pub marketing_labels: Vec<String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            root_domain: "codeopx.com".into(),
            reserved_labels: vec!["www".into(), "localhost".into()],
            marketing_labels: vec!["admin".into()],
        }
    }
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Externally visible base URL (used by the client-side propagator)
    pub base_url: String,
    /// Database settings
    pub database: DatabaseConfig,
    /// Viewer auth settings
    pub auth: AuthConfig,
    /// Tenancy domain settings
    pub tenancy: TenancyConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
}

const DEV_JWT_SECRET: &str = "storefront-dev-secret-do-not-use-in-production";

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse (e.g. a
    /// non-numeric `HTTP_PORT`) or if `JWT_SECRET` is missing in production.
    pub fn from_env() -> Result<Self> {
        let http_port = parse_env_or("HTTP_PORT", 8080_u16)?;

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production");
            }
            Err(_) => {
                warn!("JWT_SECRET not set, using development default");
                DEV_JWT_SECRET.into()
            }
        };

        let tenancy = TenancyConfig {
            root_domain: env::var("ROOT_DOMAIN")
                .unwrap_or_else(|_| TenancyConfig::default().root_domain)
                .to_lowercase(),
            reserved_labels: parse_label_list(
                "RESERVED_LABELS",
                &TenancyConfig::default().reserved_labels,
            ),
            marketing_labels: parse_label_list(
                "MARKETING_LABELS",
                &TenancyConfig::default().marketing_labels,
            ),
        };

        Ok(Self {
            http_port,
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:./data/storefront.db".into()),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env_or("JWT_EXPIRY_HOURS", 24_i64)?,
            },
            tenancy,
            environment,
            log_level: LogLevel::from_str_or_default(
                &env::var("LOG_LEVEL").unwrap_or_default(),
            ),
        })
    }

    /// One-line startup summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} root_domain={} database={} environment={:?}",
            self.http_port, self.tenancy.root_domain, self.database.url, self.environment
        )
    }
}

fn parse_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid {name}: '{value}'")),
        Err(_) => Ok(default),
    }
}

fn parse_label_list(name: &str, default: &[String]) -> Vec<String> {
    env::var(name).map_or_else(
        |_| default.to_vec(),
        |value| {
            value
                .split(',')
                .map(|label| label.trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default(""),
            Environment::Development
        );
    }

    #[test]
    fn test_tenancy_defaults() {
        let tenancy = TenancyConfig::default();
        assert_eq!(tenancy.root_domain, "codeopx.com");
        assert!(tenancy.reserved_labels.contains(&"www".to_owned()));
        assert!(tenancy.reserved_labels.contains(&"localhost".to_owned()));
        assert!(tenancy.marketing_labels.contains(&"admin".to_owned()));
    }
}

// ABOUTME: JWT-based authentication for storefront owners
// ABOUTME: Token generation and validation plus bcrypt password handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Authentication
//!
//! Owner accounts authenticate with email and password and receive a JWT.
//! The viewer identity extracted from a token is advisory for tenant
//! resolution (it only sets the owner-viewer flag); write endpoints require
//! it outright.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::utils::uuid::parse_uuid;
use chrono::{Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for an authenticated owner session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Account email
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and validates owner session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create an auth manager from the shared HMAC secret
    #[must_use]
    pub fn new(jwt_secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if JWT encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for expired or malformed tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("invalid token: {e}")))
    }

    /// Extract the viewer user id from request headers, if any
    ///
    /// Missing or invalid credentials yield `None` rather than an error;
    /// resolution works for anonymous shoppers too.
    #[must_use]
    pub fn viewer_from_headers(&self, headers: &HeaderMap) -> Option<Uuid> {
        let token = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))?;

        let claims = self.validate_token(token).ok()?;
        parse_uuid(&claims.sub).ok()
    }

    /// Extract the viewer user id, failing if absent
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a bearer token and `AuthInvalid` for a
    /// bad one.
    pub fn require_user(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let token = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(AppError::auth_required)?;

        let claims = self.validate_token(token)?;
        parse_uuid(&claims.sub)
    }
}

/// Hash a password for storage
///
/// # Errors
///
/// Returns an internal error if hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

/// Verify a password against its stored hash
///
/// # Errors
///
/// Returns an internal error if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))
}

// ABOUTME: Authentication route handlers for store owner accounts
// ABOUTME: Registration and login endpoints issuing JWT session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! Authentication routes
//!
//! Owner accounts are ordinary users until they provision a store. Both
//! endpoints are host-agnostic: they work the same on the base domain and on
//! any storefront host.

use crate::auth::{hash_password, verify_password};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Account email, unique across the platform
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Optional display name
    pub display_name: Option<String>,
}

/// Registration response with user details
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user id
    pub user_id: String,
    /// Registered email
    pub email: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Login response with session token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// JWT session token
    pub token: String,
    /// Authenticated user id
    pub user_id: String,
    /// Account email
    pub email: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::invalid_input("a valid email address is required"));
        }
        if request.password.len() < 8 {
            return Err(AppError::invalid_input(
                "password must be at least 8 characters",
            ));
        }

        // The unique index on email is authoritative under concurrency; this
        // pre-check just produces a friendlier message.
        if resources.database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::invalid_input("email is already registered"));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(email.clone(), password_hash, request.display_name);
        let user_id = resources.database.create_user(&user).await?;

        info!(user_id = %user_id, "registered user");

        Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                user_id: user_id.to_string(),
                email,
            }),
        )
            .into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();

        let user = resources
            .database
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("invalid email or password"))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("invalid email or password"));
        }

        let token = resources.auth_manager.generate_token(&user)?;

        Ok((
            StatusCode::OK,
            Json(LoginResponse {
                token,
                user_id: user.id.to_string(),
                email: user.email,
                expires_in: resources.config.auth.jwt_expiry_hours * 3600,
            }),
        )
            .into_response())
    }
}

// ABOUTME: Small shared utilities
// ABOUTME: UUID parsing helpers used across the storefront server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

pub mod uuid;

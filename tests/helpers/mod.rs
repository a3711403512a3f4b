// ABOUTME: Test helper module organization
// ABOUTME: HTTP testing utilities shared across integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

pub mod axum_test;

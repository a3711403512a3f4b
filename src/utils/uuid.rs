// ABOUTME: UUID parsing with application-level error mapping
// ABOUTME: Keeps uuid::Error out of handler signatures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

use crate::errors::{AppError, AppResult};
use uuid::Uuid;

/// Parse a UUID from its string form
///
/// # Errors
///
/// Returns `InvalidInput` if the string is not a valid UUID.
pub fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::invalid_input(format!("invalid UUID: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()).unwrap(), id);
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_uuid("").is_err());
    }
}

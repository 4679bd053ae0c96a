//! Domain DTOs for the users API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently,
//! so the FFI surface never couples to Axum internals. Integration tests catch
//! any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single user returned by the API. The `id` is assigned by the remote
/// service and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request payload for both creating and replacing a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Reject empty fields. The email format is deliberately left unchecked.
    pub fn validate(&self) -> Result<(), crate::ApiError> {
        if self.name.is_empty() {
            return Err(crate::ApiError::EmptyField("name"));
        }
        if self.email.is_empty() {
            return Err(crate::ApiError::EmptyField("email"));
        }
        Ok(())
    }
}

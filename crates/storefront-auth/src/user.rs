//! User types.

use serde::{Deserialize, Serialize};
use storefront_commerce::ids::UserId;

/// A signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Derive a display name from the local part of an email address.
    pub fn name_from_email(email: &str) -> &str {
        email.split('@').next().unwrap_or(email)
    }
}

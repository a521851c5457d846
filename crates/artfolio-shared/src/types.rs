use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a signed-in user is allowed to do with the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Lists, edits and deletes their own artworks.
    Artist,
    /// Browses every artwork, keeps a wishlist and buys.
    Buyer,
}

impl Role {
    /// The value persisted in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Artist => "artist",
            Role::Buyer => "buyer",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(Role::Artist),
            "buyer" => Ok(Role::Buyer),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical form of an email address: trimmed and ASCII-lowercased.
///
/// Every store entry point runs caller-supplied emails through this, so
/// `A@X.com` and `a@x.com ` name the same user.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

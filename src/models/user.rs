//! This file defines a user of the application and its ID type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::database_id::DatabaseID;

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// The password is stored and echoed as an opaque string; hashing is out of
/// scope for this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The ID of the user.
    #[serde(rename = "userid")]
    pub id: UserID,
    /// The name the user signed up with.
    pub username: String,
    /// The user's password, stored as-is.
    pub password: String,
    /// The user's email address. Not validated and not required to be unique.
    pub email: String,
    /// When the user was created, as an RFC 3339 string.
    pub timestamp: String,
    /// The ID of the password-reset token assigned to the user, if any.
    ///
    /// This is a soft reference: no foreign key constraint backs it.
    #[serde(rename = "resetTokenId")]
    pub reset_token_id: Option<DatabaseID>,
}

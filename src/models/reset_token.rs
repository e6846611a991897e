//! This file defines a password-reset token.

use serde::{Deserialize, Serialize};

use crate::database_id::DatabaseID;

/// A token that allows a user to reset their password.
///
/// Tokens are created independently of users and referenced by
/// [User::reset_token_id](crate::models::User::reset_token_id). The token
/// string is opaque and not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetToken {
    /// The ID of the reset token.
    pub id: DatabaseID,
    /// The opaque token string.
    pub token: String,
    /// When the token expires, as an ISO-8601 string. Expiry is not enforced
    /// by this service.
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
}

//! Defines the reset-token store trait.

use crate::{Error, models::ResetToken};

/// Handles the creation and retrieval of password-reset tokens.
pub trait ResetTokenStore {
    /// Create a new reset token in the store.
    fn create(&mut self, token: &str, expires_at: &str) -> Result<ResetToken, Error>;

    /// Retrieve every reset token whose token string matches `token` exactly.
    ///
    /// Returns zero, one, or more rows; token strings are not unique.
    fn get_by_token(&self, token: &str) -> Result<Vec<ResetToken>, Error>;
}

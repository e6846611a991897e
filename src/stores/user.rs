//! Defines the user store trait.

use crate::{
    Error,
    database_id::DatabaseID,
    models::{User, UserID},
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Retrieve every user in the store.
    ///
    /// No ordering is guaranteed beyond what the store provides.
    fn get_all(&self) -> Result<Vec<User>, Error>;

    /// Create a new user in the store.
    ///
    /// The creation timestamp is assigned by the store. No uniqueness of
    /// username or email is enforced.
    fn create(&mut self, username: &str, password: &str, email: &str) -> Result<User, Error>;

    /// Point the user's reset-token reference at the token with `token_id`.
    ///
    /// Implementers should return [Error::NotFound] when no user with
    /// `user_id` exists.
    fn assign_reset_token(&mut self, user_id: UserID, token_id: DatabaseID) -> Result<(), Error>;

    /// Replace the user's password.
    ///
    /// Implementers should return [Error::NotFound] when no user with
    /// `user_id` exists.
    fn update_password(&mut self, user_id: UserID, password: &str) -> Result<(), Error>;
}

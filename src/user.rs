//! Route handlers for signing up, listing users, assigning reset tokens, and
//! updating passwords.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseID,
    models::{User, UserID},
    state::UserState,
    stores::UserStore,
};

/// The data needed to sign up a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// The name the user signs up with.
    pub username: String,
    /// The user's password, stored as-is.
    pub password: String,
    /// The user's email address.
    pub email: String,
}

/// A user and the reset token assigned to them, echoed back on success.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResetTokenAssignment {
    /// The ID of the user to assign the token to.
    #[serde(rename = "userid")]
    pub user_id: UserID,
    /// The ID of the reset token.
    #[serde(rename = "tokenid")]
    pub token_id: DatabaseID,
}

/// A user and their new password, echoed back on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordUpdate {
    /// The ID of the user whose password is replaced.
    #[serde(rename = "userid")]
    pub user_id: UserID,
    /// The new password, stored as-is.
    pub password: String,
}

/// A route handler for listing all users.
pub async fn get_users_endpoint<U>(
    State(state): State<UserState<U>>,
) -> Result<Json<Vec<User>>, Error>
where
    U: UserStore + Send + Sync,
{
    state.user_store.get_all().map(Json)
}

/// A route handler for signing up a new user.
///
/// No validation is performed on the input; a store-level failure (e.g., a
/// NOT NULL violation) is reported as 500.
pub async fn create_user_endpoint<U>(
    State(state): State<UserState<U>>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<User>, Error>
where
    U: UserStore + Send + Sync,
{
    let mut user_store = state.user_store;

    user_store
        .create(&new_user.username, &new_user.password, &new_user.email)
        .map(Json)
}

/// A route handler for assigning a reset token to a user.
///
/// Responds with 404 if no user with the given ID exists.
pub async fn assign_reset_token_endpoint<U>(
    State(state): State<UserState<U>>,
    Json(assignment): Json<ResetTokenAssignment>,
) -> Result<Json<ResetTokenAssignment>, Error>
where
    U: UserStore + Send + Sync,
{
    let mut user_store = state.user_store;

    user_store.assign_reset_token(assignment.user_id, assignment.token_id)?;

    Ok(Json(assignment))
}

/// A route handler for replacing a user's password.
///
/// Responds with 404 if no user with the given ID exists.
pub async fn update_password_endpoint<U>(
    State(state): State<UserState<U>>,
    Json(update): Json<PasswordUpdate>,
) -> Result<Json<PasswordUpdate>, Error>
where
    U: UserStore + Send + Sync,
{
    let mut user_store = state.user_store;

    user_store.update_password(update.user_id, &update.password)?;

    Ok(Json(update))
}

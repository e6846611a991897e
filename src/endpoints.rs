//! The API endpoint URIs.

/// The route for the liveness check.
pub const HEALTH: &str = "/health";
/// The route to list users, sign up a user, and assign a reset token to a user.
pub const USERS: &str = "/api/users";
/// The route to update a user's password.
pub const PASSWORD: &str = "/api/password";
/// The route to look up and create password-reset tokens.
pub const RESET_TOKEN: &str = "/api/resettoken";
/// The route to create a transaction.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to list a user's transactions (GET, `id` is a user ID) or delete
/// a transaction (DELETE, `id` is a transaction ID).
pub const TRANSACTION: &str = "/api/transactions/{id}";

//! Defines the domain models of the application.

mod reset_token;
mod transaction;
mod user;

pub use reset_token::ResetToken;
pub use transaction::{NewTransaction, Transaction};
pub use user::{User, UserID};

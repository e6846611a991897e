//! Contains traits and implementations for objects that store the domain [models](crate::models).

mod reset_token;
mod transaction;
mod user;

pub mod sqlite;

pub use reset_token::ResetTokenStore;
pub use transaction::TransactionStore;
pub use user::UserStore;

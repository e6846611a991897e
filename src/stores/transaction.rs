//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::DatabaseID,
    models::{NewTransaction, Transaction, UserID},
};

/// Handles the creation, retrieval, and deletion of transactions and their
/// user-ownership mapping rows.
pub trait TransactionStore {
    /// Create a new transaction in the store along with the mapping row that
    /// records which user owns it.
    ///
    /// The two inserts form one atomic unit: if the mapping row cannot be
    /// written, the transaction row must not be persisted either.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve all transactions owned by the user with `user_id`.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id` and all mapping rows that reference it.
    ///
    /// Implementers should return [Error::NotFound] and leave the mapping
    /// table untouched when no such transaction exists.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

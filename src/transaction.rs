//! Route handlers for creating, listing, and deleting transactions.
//!
//! Creating a transaction also writes the mapping row that records which user
//! owns it; deleting a transaction removes its mapping rows. Both composite
//! operations are atomic at the store level.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Error,
    database_id::DatabaseID,
    models::{NewTransaction, Transaction, UserID},
    state::TransactionState,
    stores::TransactionStore,
};

/// A created transaction echoed back with the ID of its owning user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedTransaction {
    /// The ID of the user that owns the transaction.
    #[serde(rename = "userid")]
    pub user_id: UserID,
    /// The created transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// A route handler for creating a new transaction owned by a user.
///
/// The owning user's ID is not checked against the user table; ownership is
/// recorded in the mapping table as-is.
pub async fn create_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<OwnedTransaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let user_id = new_transaction.user_id;
    let mut transaction_store = state.transaction_store;

    let transaction = transaction_store.create(new_transaction)?;

    Ok(Json(OwnedTransaction {
        user_id,
        transaction,
    }))
}

/// A route handler for listing the transactions owned by a user.
///
/// An unknown user ID yields an empty array.
pub async fn get_user_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(user_id): Path<UserID>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state.transaction_store.get_by_user(user_id).map(Json)
}

/// A route handler for deleting a transaction and its ownership mapping.
///
/// Responds with 404 if no transaction with the given ID exists.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<Value>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let mut transaction_store = state.transaction_store;

    transaction_store.delete(transaction_id)?;

    Ok(Json(json!({
        "message": format!("Transaction {transaction_id} deleted successfully"),
    })))
}

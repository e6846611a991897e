//! This file defines a financial transaction and the payload for creating one.

use serde::{Deserialize, Serialize};

use crate::{database_id::DatabaseID, models::UserID};

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A transaction carries no direct user field; ownership is expressed through
/// a separate user-transaction mapping row written by the store when the
/// transaction is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(rename = "transactionid")]
    pub id: DatabaseID,
    /// Whether money was spent (`true`) or earned (`false`).
    #[serde(rename = "isExpense")]
    pub is_expense: bool,
    /// The amount of money in the smallest currency unit (e.g., cents).
    pub amount: i64,
    /// The ID of the category the transaction belongs to.
    ///
    /// Opaque: there is no category table and no referential check.
    #[serde(rename = "categoryid")]
    pub category_id: DatabaseID,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction was created, as an RFC 3339 string.
    pub timestamp: String,
}

/// The data needed to create a [Transaction] and its ownership mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The ID of the user that owns the transaction.
    #[serde(rename = "userid")]
    pub user_id: UserID,
    /// Whether money was spent (`true`) or earned (`false`).
    #[serde(rename = "isExpense")]
    pub is_expense: bool,
    /// The amount of money in the smallest currency unit (e.g., cents).
    pub amount: i64,
    /// The ID of the category the transaction belongs to.
    #[serde(rename = "categoryid")]
    pub category_id: DatabaseID,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

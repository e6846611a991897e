//! Implements a SQLite backed transaction store.
//!
//! A transaction row carries no user column; ownership lives in the
//! `user_transaction` mapping table. The store keeps the pair of rows
//! consistent by wrapping each composite operation in a SQLite transaction.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    database_id::DatabaseID,
    db::{CreateTable, MapRow},
    models::{NewTransaction, Transaction, UserID},
    stores::TransactionStore,
};

/// Stores transactions and their user-ownership mapping rows in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database along with the mapping row
    /// that records which user owns it.
    ///
    /// Both inserts run inside one SQLite transaction: if the mapping insert
    /// fails, the transaction row is rolled back and no orphan is left
    /// behind.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred at
    /// either step.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|error| Error::InvalidTimestamp(error.to_string()))?;

        let connection = self.connection.lock().unwrap();

        // Using unchecked_transaction because we only have &Connection from the MutexGuard.
        let tx = connection.unchecked_transaction()?;

        let transaction = tx
            .prepare(
                "INSERT INTO \"transaction\" (isExpense, amount, categoryid, description, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING transactionid, isExpense, amount, categoryid, description, timestamp",
            )?
            .query_row(
                (
                    new_transaction.is_expense,
                    new_transaction.amount,
                    new_transaction.category_id,
                    &new_transaction.description,
                    &timestamp,
                ),
                Self::map_row,
            )?;

        tx.execute(
            "INSERT INTO user_transaction (userid, transactionid) VALUES (?1, ?2)",
            (new_transaction.user_id.as_i64(), transaction.id),
        )?;

        tx.commit()?;

        Ok(transaction)
    }

    /// Retrieve all transactions owned by the user with `user_id`.
    ///
    /// Performs an inner join with the mapping table and returns transaction
    /// columns only. An unknown user yields an empty vector.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT t.transactionid, t.isExpense, t.amount, t.categoryid, t.description, t.timestamp
                 FROM \"transaction\" t
                 INNER JOIN user_transaction ut ON t.transactionid = ut.transactionid
                 WHERE ut.userid = :userid",
            )?
            .query_map(&[(":userid", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Delete the transaction with `id` and all mapping rows that reference it.
    ///
    /// Both deletes run inside one SQLite transaction. If no transaction row
    /// matches `id`, nothing is touched and [Error::NotFound] is returned; a
    /// pre-existing mapping inconsistency is never cleaned up by a failed
    /// delete attempt.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no transaction with `id` exists, or an
    /// [Error::SqlError] if an SQL related error occurred.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();

        let tx = connection.unchecked_transaction()?;

        let rows_deleted = tx.execute(
            "DELETE FROM \"transaction\" WHERE transactionid = ?1",
            (id,),
        )?;

        if rows_deleted == 0 {
            // Dropping the uncommitted transaction rolls it back.
            return Err(Error::NotFound);
        }

        tx.execute(
            "DELETE FROM user_transaction WHERE transactionid = ?1",
            (id,),
        )?;

        tx.commit()?;

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // AUTOINCREMENT keeps transaction IDs monotonic and never reused.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    transactionid INTEGER PRIMARY KEY AUTOINCREMENT,
                    isExpense INTEGER NOT NULL,
                    amount INTEGER NOT NULL,
                    categoryid INTEGER NOT NULL,
                    description TEXT,
                    timestamp TEXT NOT NULL
                    )",
            (),
        )?;

        // The join table has no uniqueness constraint and no foreign keys.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user_transaction (
                    userid INTEGER NOT NULL,
                    transactionid INTEGER NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            is_expense: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            category_id: row.get(offset + 3)?,
            description: row.get(offset + 4)?,
            timestamp: row.get(offset + 5)?,
        })
    }
}

#[cfg(test)]
mod transaction_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::CreateTable,
        models::{NewTransaction, UserID},
    };

    use super::{Error, SQLiteTransactionStore, TransactionStore};

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        SQLiteTransactionStore::create_table(&conn).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn new_transaction(user_id: i64, amount: i64) -> NewTransaction {
        NewTransaction {
            user_id: UserID::new(user_id),
            is_expense: true,
            amount,
            category_id: 2,
            description: Some("coffee".to_owned()),
        }
    }

    #[test]
    fn create_transaction_succeeds() {
        let mut store = get_store();

        let transaction = store.create(new_transaction(1, 500)).unwrap();

        assert!(transaction.id > 0);
        assert!(transaction.is_expense);
        assert_eq!(transaction.amount, 500);
        assert_eq!(transaction.category_id, 2);
        assert_eq!(transaction.description.as_deref(), Some("coffee"));
        assert!(!transaction.timestamp.is_empty());
    }

    #[test]
    fn create_transaction_assigns_increasing_ids() {
        let mut store = get_store();

        let first = store.create(new_transaction(1, 500)).unwrap();
        let second = store.create(new_transaction(1, 700)).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn created_transaction_is_visible_to_its_owner() {
        let mut store = get_store();

        let transaction = store.create(new_transaction(1, 500)).unwrap();

        let transactions = store.get_by_user(UserID::new(1)).unwrap();

        assert_eq!(transactions, vec![transaction]);
    }

    #[test]
    fn get_by_user_excludes_other_users() {
        let mut store = get_store();

        let owned = store.create(new_transaction(1, 500)).unwrap();
        store.create(new_transaction(2, 700)).unwrap();

        let transactions = store.get_by_user(UserID::new(1)).unwrap();

        assert_eq!(transactions, vec![owned]);
    }

    #[test]
    fn get_by_user_returns_empty_vec_for_unknown_user() {
        let store = get_store();

        assert_eq!(store.get_by_user(UserID::new(42)).unwrap(), vec![]);
    }

    #[test]
    fn delete_removes_transaction_and_mapping() {
        let mut store = get_store();

        let transaction = store.create(new_transaction(1, 500)).unwrap();

        store.delete(transaction.id).unwrap();

        assert_eq!(store.get_by_user(UserID::new(1)).unwrap(), vec![]);
        assert_eq!(store.delete(transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_leaves_mappings_untouched() {
        let mut store = get_store();

        let transaction = store.create(new_transaction(1, 500)).unwrap();

        assert_eq!(store.delete(transaction.id + 1), Err(Error::NotFound));

        let transactions = store.get_by_user(UserID::new(1)).unwrap();
        assert_eq!(transactions, vec![transaction]);
    }

    #[test]
    fn create_rolls_back_transaction_when_mapping_insert_fails() {
        let conn = Connection::open_in_memory().unwrap();
        SQLiteTransactionStore::create_table(&conn).unwrap();
        let connection = Arc::new(Mutex::new(conn));
        let mut store = SQLiteTransactionStore::new(connection.clone());

        connection
            .lock()
            .unwrap()
            .execute("DROP TABLE user_transaction", ())
            .unwrap();

        let result = store.create(new_transaction(1, 500));
        assert!(matches!(result, Err(Error::SqlError(_))));

        let transaction_count: i64 = connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM \"transaction\"", [], |row| row.get(0))
            .unwrap();
        assert_eq!(transaction_count, 0);
    }

    #[test]
    fn deleted_transaction_id_is_not_reused() {
        let mut store = get_store();

        store.create(new_transaction(1, 500)).unwrap();
        let second = store.create(new_transaction(1, 700)).unwrap();
        store.delete(second.id).unwrap();

        let third = store.create(new_transaction(1, 900)).unwrap();

        assert!(third.id > second.id);
    }
}

//! Implements a SQLite backed reset-token store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::ResetToken,
    stores::ResetTokenStore,
};

/// Handles the creation and retrieval of password-reset tokens.
#[derive(Debug, Clone)]
pub struct SQLiteResetTokenStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteResetTokenStore {
    /// Create a new reset-token store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ResetTokenStore for SQLiteResetTokenStore {
    /// Create and insert a new reset token into the database.
    ///
    /// The expiry string is stored as-is; expiry is not enforced here.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred.
    fn create(&mut self, token: &str, expires_at: &str) -> Result<ResetToken, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO reset_token (token, expiresAt) VALUES (?1, ?2)",
            (token, expires_at),
        )?;

        let id = connection.last_insert_rowid();

        Ok(ResetToken {
            id,
            token: token.to_owned(),
            expires_at: expires_at.to_owned(),
        })
    }

    /// Retrieve every reset token whose token string matches `token` exactly.
    ///
    /// Token strings are not unique, so this may return several rows.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred.
    fn get_by_token(&self, token: &str) -> Result<Vec<ResetToken>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, token, expiresAt FROM reset_token WHERE token = :token")?
            .query_map(&[(":token", &token)], Self::map_row)?
            .map(|maybe_token| maybe_token.map_err(Error::SqlError))
            .collect()
    }
}

impl CreateTable for SQLiteResetTokenStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS reset_token (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    token TEXT NOT NULL,
                    expiresAt TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteResetTokenStore {
    type ReturnType = ResetToken;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(ResetToken {
            id: row.get(offset)?,
            token: row.get(offset + 1)?,
            expires_at: row.get(offset + 2)?,
        })
    }
}

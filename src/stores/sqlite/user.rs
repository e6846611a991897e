//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    database_id::DatabaseID,
    db::{CreateTable, MapRow},
    models::{User, UserID},
    stores::UserStore,
};

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Retrieve every user in the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred.
    fn get_all(&self) -> Result<Vec<User>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT userid, username, password, email, timestamp, resetTokenId FROM user")?
            .query_map([], Self::map_row)?
            .map(|maybe_user| maybe_user.map_err(Error::SqlError))
            .collect()
    }

    /// Create and insert a new user into the database.
    ///
    /// The creation timestamp is set to the current UTC time. The new user
    /// has no reset token assigned.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if an SQL related error occurred.
    fn create(&mut self, username: &str, password: &str, email: &str) -> Result<User, Error> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|error| Error::InvalidTimestamp(error.to_string()))?;

        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO user (username, password, email, timestamp) VALUES (?1, ?2, ?3, ?4)",
            (username, password, email, &timestamp),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User {
            id,
            username: username.to_owned(),
            password: password.to_owned(),
            email: email.to_owned(),
            timestamp,
            reset_token_id: None,
        })
    }

    /// Point the user's `resetTokenId` column at the reset token with `token_id`.
    ///
    /// The token ID is not checked against the reset token table.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no user with `user_id` exists, or an
    /// [Error::SqlError] if an SQL related error occurred.
    fn assign_reset_token(&mut self, user_id: UserID, token_id: DatabaseID) -> Result<(), Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE user SET resetTokenId = ?1 WHERE userid = ?2",
            (token_id, user_id.as_i64()),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Replace the user's password.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no user with `user_id` exists, or an
    /// [Error::SqlError] if an SQL related error occurred.
    fn update_password(&mut self, user_id: UserID, password: &str) -> Result<(), Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE user SET password = ?1 WHERE userid = ?2",
            (password, user_id.as_i64()),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // AUTOINCREMENT keeps user IDs monotonic and never reused.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    userid INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT NOT NULL,
                    password TEXT NOT NULL,
                    email TEXT NOT NULL,
                    timestamp TEXT NOT NULL,
                    resetTokenId INTEGER
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let username = row.get(offset + 1)?;
        let password = row.get(offset + 2)?;
        let email = row.get(offset + 3)?;
        let timestamp = row.get(offset + 4)?;
        let reset_token_id = row.get(offset + 5)?;

        Ok(User {
            id: UserID::new(raw_id),
            username,
            password,
            email,
            timestamp,
            reset_token_id,
        })
    }
}

#[cfg(test)]
mod user_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{db::CreateTable, models::UserID};

    use super::{Error, SQLiteUserStore, UserStore};

    fn get_store() -> SQLiteUserStore {
        let conn = Connection::open_in_memory().unwrap();
        SQLiteUserStore::create_table(&conn).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn insert_user_succeeds() {
        let mut store = get_store();

        let inserted_user = store.create("alice", "hunter2", "alice@example.com").unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.username, "alice");
        assert_eq!(inserted_user.password, "hunter2");
        assert_eq!(inserted_user.email, "alice@example.com");
        assert!(!inserted_user.timestamp.is_empty());
        assert_eq!(inserted_user.reset_token_id, None);
    }

    #[test]
    fn insert_user_assigns_increasing_ids() {
        let mut store = get_store();

        let first = store.create("alice", "hunter2", "alice@example.com").unwrap();
        let second = store.create("bob", "hunter3", "bob@example.com").unwrap();

        assert!(second.id.as_i64() > first.id.as_i64());
    }

    #[test]
    fn get_all_returns_inserted_users() {
        let mut store = get_store();

        let alice = store.create("alice", "hunter2", "alice@example.com").unwrap();
        let bob = store.create("bob", "hunter3", "bob@example.com").unwrap();

        let users = store.get_all().unwrap();

        assert_eq!(users.len(), 2);
        assert!(users.contains(&alice));
        assert!(users.contains(&bob));
    }

    #[test]
    fn get_all_returns_empty_vec_for_empty_table() {
        let store = get_store();

        assert_eq!(store.get_all().unwrap(), vec![]);
    }

    #[test]
    fn assign_reset_token_sets_reference() {
        let mut store = get_store();

        let user = store.create("alice", "hunter2", "alice@example.com").unwrap();

        store.assign_reset_token(user.id, 7).unwrap();

        let users = store.get_all().unwrap();
        assert_eq!(users[0].reset_token_id, Some(7));
    }

    #[test]
    fn assign_reset_token_fails_with_unknown_user() {
        let mut store = get_store();

        assert_eq!(
            store.assign_reset_token(UserID::new(42), 7),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn update_password_replaces_password() {
        let mut store = get_store();

        let user = store.create("alice", "hunter2", "alice@example.com").unwrap();

        store.update_password(user.id, "hunter3").unwrap();

        let users = store.get_all().unwrap();
        assert_eq!(users[0].password, "hunter3");
    }

    #[test]
    fn update_password_fails_with_unknown_user() {
        let mut store = get_store();

        assert_eq!(
            store.update_password(UserID::new(42), "hunter3"),
            Err(Error::NotFound)
        );
    }
}

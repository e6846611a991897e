//! Implements a struct that holds the state of the REST server.

use std::{
    marker::{Send, Sync},
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::stores::{ResetTokenStore, TransactionStore, UserStore};

/// The state of the REST server.
///
/// The database connection is opened once at process start and shared by all
/// stores; each store holds a clone of the handle and serializes its access
/// through the mutex.
#[derive(Debug, Clone)]
pub struct AppState<U, T, R>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: ResetTokenStore + Send + Sync,
{
    /// The database connection, used directly by the health check.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The store for managing [reset tokens](crate::models::ResetToken).
    pub reset_token_store: R,
}

impl<U, T, R> AppState<U, T, R>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: ResetTokenStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(
        db_connection: Arc<Mutex<Connection>>,
        user_store: U,
        transaction_store: T,
        reset_token_store: R,
    ) -> Self {
        Self {
            db_connection,
            user_store,
            transaction_store,
            reset_token_store,
        }
    }
}

/// The state needed to serve the user routes.
#[derive(Debug, Clone)]
pub struct UserState<U>
where
    U: UserStore + Send + Sync,
{
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
}

impl<U, T, R> FromRef<AppState<U, T, R>> for UserState<U>
where
    U: UserStore + Clone + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: ResetTokenStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, T, R>) -> Self {
        Self {
            user_store: state.user_store.clone(),
        }
    }
}

/// The state needed to serve the transaction routes.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<U, T, R> FromRef<AppState<U, T, R>> for TransactionState<T>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    R: ResetTokenStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, T, R>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed to serve the reset-token routes.
#[derive(Debug, Clone)]
pub struct ResetTokenState<R>
where
    R: ResetTokenStore + Send + Sync,
{
    /// The store for managing [reset tokens](crate::models::ResetToken).
    pub reset_token_store: R,
}

impl<U, T, R> FromRef<AppState<U, T, R>> for ResetTokenState<R>
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: ResetTokenStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<U, T, R>) -> Self {
        Self {
            reset_token_store: state.reset_token_store.clone(),
        }
    }
}

/// The state needed for the liveness check.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// The database connection to probe.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl<U, T, R> FromRef<AppState<U, T, R>> for HealthState
where
    U: UserStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: ResetTokenStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, T, R>) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

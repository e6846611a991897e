//! Pocketledger is a personal-finance bookkeeping backend.
//!
//! This library provides a JSON REST API over a SQLite database that stores
//! users, their transactions, and password-reset tokens. Ownership of a
//! transaction is expressed purely through a user-transaction mapping row
//! which is created and deleted together with the transaction itself.

#![warn(missing_docs)]

use std::{env, env::VarError, net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod database_id;
pub mod db;
mod endpoints;
mod health;
pub mod models;
mod reset_token;
mod routing;
mod state;
pub mod stores;
mod transaction;
mod user;

pub use database_id::DatabaseID;
pub use routing::build_router;
pub use state::AppState;

/// Get a port number from the environment variable `env_key` if set, otherwise return `default_port`.
///
/// # Panics
/// This function may panic if the environment variable `env_key` is not valid unicode.
///
/// This function may panic if the environment variable `env_key` cannot be parsed as an integer.
///
/// # Examples
///
/// ```
/// use pocketledger::parse_port_or_default;
///
/// assert_eq!(parse_port_or_default("FOO", 3000), 3000);
///
/// unsafe { std::env::set_var("FOO", "4321"); }
/// assert_eq!(parse_port_or_default("FOO", 3000), 4321);
/// # unsafe { std::env::remove_var("FOO"); }
/// ```
pub fn parse_port_or_default(env_key: &str, default_port: u16) -> u16 {
    let port_string = match env::var(env_key) {
        Ok(string) => string,
        Err(VarError::NotPresent) => {
            tracing::debug!(
                "The environment variable '{}' was not set, using the default port {}.",
                env_key,
                default_port
            );
            return default_port;
        }
        Err(e) => {
            tracing::error!(
                "An error occurred retrieving the environment variable '{}': {}",
                env_key,
                e
            );
            panic!();
        }
    };

    match port_string.parse() {
        Ok(port_number) => port_number,
        Err(e) => {
            tracing::error!(
                "An error occurred parsing the port number '{}' from the environment variable '{}': {}",
                port_string,
                env_key,
                e
            );
            panic!();
        }
    }
}

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows or when
    /// an update or delete affects zero rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// The underlying message is reported to the client verbatim.
    #[error("{0}")]
    SqlError(rusqlite::Error),

    /// The creation timestamp could not be formatted as an RFC 3339 string.
    #[error("could not format creation timestamp: {0}")]
    InvalidTimestamp(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status_code, body).into_response()
    }
}

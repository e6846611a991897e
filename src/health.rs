//! The liveness check route handler.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{Error, state::HealthState};

/// A route handler that reports whether the database is reachable.
///
/// Runs a trivial query against the shared connection and responds with 200
/// if it succeeds, or 500 with the underlying error message if it fails.
///
/// # Panics
///
/// Panics if the database lock is already acquired by the same thread or is poisoned.
pub async fn get_health_endpoint(State(state): State<HealthState>) -> Result<Json<Value>, Error> {
    state
        .db_connection
        .lock()
        .unwrap()
        .query_row("SELECT 1", [], |_| Ok(()))?;

    Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod health_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{build_router, stores::sqlite::create_app_state};

    #[tokio::test]
    async fn health_check_succeeds_with_live_database() {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = create_app_state(db_connection).expect("Could not initialize database.");
        let server = TestServer::new(build_router(state));

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>(), json!({ "status": "ok" }));
    }
}

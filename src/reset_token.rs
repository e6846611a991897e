//! Route handlers for looking up and creating password-reset tokens.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{Error, models::ResetToken, state::ResetTokenState, stores::ResetTokenStore};

/// The query parameters for looking up reset tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetTokenQuery {
    /// The token string to match exactly.
    pub token: String,
}

/// The data needed to create a reset token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResetToken {
    /// The opaque token string.
    pub token: String,
    /// When the token expires, as an ISO-8601 string.
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
}

/// A route handler for listing all reset tokens whose token string matches
/// the `token` query parameter exactly.
///
/// An unknown token yields an empty array; duplicate token strings yield
/// every matching row.
pub async fn get_reset_tokens_endpoint<R>(
    State(state): State<ResetTokenState<R>>,
    Query(query): Query<ResetTokenQuery>,
) -> Result<Json<Vec<ResetToken>>, Error>
where
    R: ResetTokenStore + Send + Sync,
{
    state.reset_token_store.get_by_token(&query.token).map(Json)
}

/// A route handler for creating a new reset token.
pub async fn create_reset_token_endpoint<R>(
    State(state): State<ResetTokenState<R>>,
    Json(new_token): Json<NewResetToken>,
) -> Result<Json<ResetToken>, Error>
where
    R: ResetTokenStore + Send + Sync,
{
    let mut reset_token_store = state.reset_token_store;

    reset_token_store
        .create(&new_token.token, &new_token.expires_at)
        .map(Json)
}

#[cfg(test)]
mod reset_token_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{build_router, models::ResetToken, stores::sqlite::create_app_state};

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = create_app_state(db_connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn create_reset_token_returns_created_token() {
        let server = get_test_server();

        let response = server
            .post("/api/resettoken")
            .content_type("application/json")
            .json(&json!({
                "token": "abc123",
                "expiresAt": "2026-09-01T00:00:00Z",
            }))
            .await;

        response.assert_status_ok();

        let token = response.json::<ResetToken>();
        assert_eq!(token.id, 1);
        assert_eq!(token.token, "abc123");
        assert_eq!(token.expires_at, "2026-09-01T00:00:00Z");
    }

    #[tokio::test]
    async fn get_reset_tokens_returns_empty_array_for_unknown_token() {
        let server = get_test_server();

        let response = server.get("/api/resettoken?token=missing").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<ResetToken>>(), vec![]);
    }

    #[tokio::test]
    async fn get_reset_tokens_returns_all_exact_matches() {
        let server = get_test_server();

        for expires_at in ["2026-09-01T00:00:00Z", "2026-10-01T00:00:00Z"] {
            server
                .post("/api/resettoken")
                .content_type("application/json")
                .json(&json!({
                    "token": "abc123",
                    "expiresAt": expires_at,
                }))
                .await
                .assert_status_ok();
        }

        server
            .post("/api/resettoken")
            .content_type("application/json")
            .json(&json!({
                "token": "other",
                "expiresAt": "2026-09-01T00:00:00Z",
            }))
            .await
            .assert_status_ok();

        let response = server.get("/api/resettoken?token=abc123").await;

        response.assert_status_ok();

        let tokens = response.json::<Vec<ResetToken>>();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|token| token.token == "abc123"));
    }
}

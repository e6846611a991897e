//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    health::get_health_endpoint,
    reset_token::{create_reset_token_endpoint, get_reset_tokens_endpoint},
    stores::{ResetTokenStore, TransactionStore, UserStore},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_user_transactions_endpoint,
    },
    user::{
        assign_reset_token_endpoint, create_user_endpoint, get_users_endpoint,
        update_password_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<U, T, R>(state: AppState<U, T, R>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    R: ResetTokenStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::HEALTH, get(get_health_endpoint))
        .route(
            endpoints::USERS,
            get(get_users_endpoint::<U>)
                .post(create_user_endpoint::<U>)
                .put(assign_reset_token_endpoint::<U>),
        )
        .route(endpoints::PASSWORD, put(update_password_endpoint::<U>))
        .route(
            endpoints::RESET_TOKEN,
            get(get_reset_tokens_endpoint::<R>).post(create_reset_token_endpoint::<R>),
        )
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_user_transactions_endpoint::<T>).delete(delete_transaction_endpoint::<T>),
        )
        .with_state(state)
}

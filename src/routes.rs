use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controllayer::health::{liveness, readiness},
    handlers::{auth, health, transactions},
    middleware::{
        auth::auth_middleware, error::error_logging_middleware,
        request_id::request_id_middleware,
    },
    state::AppState,
};

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness));

    // Public auth routes
    let auth_routes = Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in));

    // Transaction routes - bearer token required
    let transaction_routes = Router::new()
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Main router combining all routes
    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(transaction_routes)
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

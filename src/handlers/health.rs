use crate::controllayer::health;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use tracing::{info, instrument};

/// Health check handler that delegates to the control layer
#[instrument(skip_all, fields(service = "health_check"))]
pub async fn health_check(state: State<AppState>) -> impl IntoResponse {
    info!("Health check request received");
    health::health_check(state).await
}

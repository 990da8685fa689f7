use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    pub storage: StorageHealth,
}

/// Storage backend health status
#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub backend: String,
    pub status: String,
    pub latency_ms: Option<u64>,
}

/// Health check endpoint handler
///
/// Returns 200 OK if the storage backend answers a ping
/// Returns 503 Service Unavailable otherwise
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().timestamp();

    let start = std::time::Instant::now();
    let ping = state.store.ping().await;
    let latency = start.elapsed();

    let (status_code, storage) = match ping {
        Ok(()) => (
            StatusCode::OK,
            StorageHealth {
                backend: state.store.backend_name().to_string(),
                status: "healthy".to_string(),
                latency_ms: Some(latency.as_millis() as u64),
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                StorageHealth {
                    backend: state.store.backend_name().to_string(),
                    status: "unhealthy".to_string(),
                    latency_ms: None,
                },
            )
        }
    };

    let response = HealthResponse {
        status: if status_code == StatusCode::OK { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp,
        storage,
    };

    (status_code, Json(response))
}

/// Liveness probe endpoint
///
/// Returns 200 OK while the process is serving requests
pub async fn liveness() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe endpoint
///
/// Returns 503 Service Unavailable when the storage backend cannot be reached
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::CRUD::store::MockStore;
    use crate::datalayer::MemoryStore;
    use crate::errors::StoreError;
    use std::sync::Arc;

    fn failing_state() -> AppState {
        let mut store = MockStore::new();
        store
            .expect_ping()
            .returning(|| Err(StoreError::ConnectionError("refused".to_string())));
        store.expect_backend_name().return_const("mock");
        AppState::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        let response = health_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check_reports_unreachable_storage() {
        let response = health_check(State(failing_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = liveness().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = readiness(State(failing_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

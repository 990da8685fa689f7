use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::datalayer::CRUD::helper::password::PasswordHash;
use crate::datalayer::{MemoryStore, Store};
use crate::errors::ServiceResult;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage backend, ready to serve queries
    pub store: Arc<dyn Store>,
    /// bcrypt cost applied to new passwords
    pub password_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            password_cost: PasswordHash::DEFAULT_COST,
        }
    }

    pub fn with_password_cost(mut self, password_cost: u32) -> Self {
        self.password_cost = password_cost;
        self
    }

    /// Build the state for `config`, connecting and migrating the database
    /// when the Postgres backend is selected.
    pub async fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let store: Arc<dyn Store> = match config.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Postgres => connect_postgres(config).await?,
        };

        info!(backend = store.backend_name(), "Storage backend ready");

        Ok(Self::new(store).with_password_cost(config.password_cost))
    }
}

#[cfg(feature = "sqlx")]
async fn connect_postgres(config: &AppConfig) -> ServiceResult<Arc<dyn Store>> {
    use crate::datalayer::{PgStore, initialize_database};

    let db = initialize_database(config.db.clone()).await?;
    Ok(Arc::new(PgStore::new(db)))
}

#[cfg(not(feature = "sqlx"))]
async fn connect_postgres(_config: &AppConfig) -> ServiceResult<Arc<dyn Store>> {
    Err(crate::errors::ServiceError::ConfigurationError(
        "built without the sqlx feature, use STORAGE_BACKEND=memory".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_from_config() {
        let config = AppConfig::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            "PASSWORD_HASH_COST" => Some("4".to_string()),
            _ => None,
        })
        .unwrap();

        let state = AppState::from_config(&config).await.unwrap();
        assert_eq!(state.store.backend_name(), "memory");
        assert_eq!(state.password_cost, 4);
    }

    #[test]
    fn test_default_password_cost() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        assert_eq!(state.password_cost, PasswordHash::DEFAULT_COST);
    }
}

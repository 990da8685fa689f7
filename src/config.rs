use std::fmt;
use std::str::FromStr;

use crate::datalayer::CRUD::helper::password::PasswordHash;
use crate::datalayer::DbConfig;
use crate::errors::ServiceError;
use crate::logging::TelemetryConfig;

pub const DEFAULT_PORT: u16 = 5000;

/// Which [`Store`](crate::datalayer::Store) implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ServiceError::ConfigurationError(format!(
                "unknown STORAGE_BACKEND {:?}, expected \"postgres\" or \"memory\"",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Everything the server reads from its environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub password_cost: u32,
    pub db: DbConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ServiceError::ConfigurationError(format!("PORT must be a port number, got {:?}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Postgres,
        };

        let password_cost = match lookup("PASSWORD_HASH_COST") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| {
                    ServiceError::ConfigurationError(format!(
                        "PASSWORD_HASH_COST must be between 4 and 31, got {:?}",
                        raw
                    ))
                })?,
            None => PasswordHash::DEFAULT_COST,
        };

        Ok(Self {
            port,
            storage_backend,
            password_cost,
            db: DbConfig::from_lookup(&lookup),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        })
    }

    pub fn set_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn set_storage_backend(mut self, storage_backend: StorageBackend) -> Self {
        self.storage_backend = storage_backend;
        self
    }

    pub fn set_password_cost(mut self, password_cost: u32) -> Self {
        self.password_cost = password_cost;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

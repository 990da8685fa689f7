pub mod connection_pool;
pub mod constants;
#[cfg(feature = "sqlx")]
pub mod db_ops;

pub use constants::DbConfig;
#[cfg(feature = "sqlx")]
pub use db_ops::{DatabaseHealth, DbManager, initialize_database};

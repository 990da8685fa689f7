#[allow(non_snake_case)]
pub mod CRUD;
pub mod db_ops;

pub use CRUD::{MemoryStore, Store};
#[cfg(feature = "sqlx")]
pub use CRUD::PgStore;
pub use db_ops::DbConfig;
#[cfg(feature = "sqlx")]
pub use db_ops::{DbManager, initialize_database};

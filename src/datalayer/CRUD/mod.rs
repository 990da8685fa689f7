pub mod helper;
pub mod memory;
#[cfg(feature = "sqlx")]
pub mod postgres;
pub mod store;
pub mod types;

pub use memory::MemoryStore;
#[cfg(feature = "sqlx")]
pub use postgres::PgStore;
pub use store::Store;

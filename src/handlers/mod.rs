pub mod auth;
pub mod health;
pub mod transactions;
pub mod validated_json;
pub mod validation;

pub use validated_json::ValidatedJson;

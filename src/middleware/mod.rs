pub mod auth;
pub mod error;
pub mod request_id;

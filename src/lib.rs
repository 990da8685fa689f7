pub mod config;
pub mod controllayer;
pub mod datalayer;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

//! Diagnostic checks.

pub mod config;
pub mod connection;

pub use config::execute_config;
pub use connection::execute_connection;

//! employee-api: CRUD REST service for employee records
//!
//! PostgreSQL-backed, served with axum. The binary in `main.rs` wires
//! configuration, the connection pool and the router together; the library
//! exposes the same pieces for integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;

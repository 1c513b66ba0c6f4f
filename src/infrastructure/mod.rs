//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and migrations (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Outbound HTTP client and its retry policy (http_client)
//! - Key-value store implementations (repositories)
//! - Application state (state)

pub mod config;
pub mod db;
pub mod http_client;
pub mod repositories;
pub mod server;
pub mod state;

pub use repositories::*;
pub use state::AppState;

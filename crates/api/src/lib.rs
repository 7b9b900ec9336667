//! HTTP API: authentication endpoints, server wiring, configuration.

pub mod app;
pub mod config;
pub mod middleware;

pub use config::ApiConfig;

//! Shared utilities for the Inventory QR server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Tracing initialisation

pub mod config;
pub mod telemetry;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthSettings, ConfigError, Environment, LogFormat, LoggingConfig,
};
pub use telemetry::init_tracing;

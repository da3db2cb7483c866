//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access token generation and verification
//! - Password reset token generation and soft verification
//! - Signing key loading for HMAC and asymmetric algorithms

mod clock;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{KeyPaths, TokenServiceConfig};
pub use key_manager::KeyManager;
pub use service::TokenService;

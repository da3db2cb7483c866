//! Authentication service module
//!
//! This module ties the credential repository, password hasher and token
//! service together:
//! - Open and invitation-based registration
//! - Email/password authentication and login
//! - Current-user resolution from a bearer token
//! - Password reset through a reset token

mod service;


pub use service::AuthService;

//! # Inventory QR Core
//!
//! Credential and token logic for the Inventory QR backend: access and
//! password reset tokens, bcrypt password hashing, invitations, and
//! registration and login over a credential repository port.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessClaims, Invitation, NewUser, PasswordResetClaims, RoleAssignment, TokenClaims,
    TokenResponse, UserCredentials, UserStatus,
};
pub use errors::{AuthError, DomainError, DomainResult, PasswordError, TokenError};
pub use repositories::CredentialRepository;
pub use services::{
    generate_invitation_token, AuthService, Clock, FixedClock, InvitationService, PasswordHasher,
    SystemClock, TokenService, TokenServiceConfig,
};

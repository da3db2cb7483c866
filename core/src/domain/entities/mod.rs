//! Domain entities representing core business objects.

pub mod invitation;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use invitation::Invitation;
pub use token::{
    AccessClaims, PasswordResetClaims, TokenClaims, TokenResponse, BEARER_TOKEN_TYPE,
};
pub use user::{NewUser, RoleAssignment, UserCredentials, UserStatus};

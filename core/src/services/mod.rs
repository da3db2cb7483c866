//! Business services containing credential and token logic.

pub mod auth;
pub mod invitation;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use invitation::{generate_invitation_token, InvitationService};
pub use password::PasswordHasher;
pub use token::{Clock, FixedClock, KeyManager, SystemClock, TokenService, TokenServiceConfig};

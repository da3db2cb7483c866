//! Error types for authentication, token and password operations

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User account is {status}")]
    InactiveUser { status: String },

    #[error("Invitation has already been used")]
    InvitationUsed,

    #[error("Invalid or expired invitation")]
    InvitationExpired,

    #[error("Registration email does not match invitation email")]
    InvitationEmailMismatch,

    #[error("Email already registered")]
    EmailAlreadyRegistered,
}

/// Token-related errors
///
/// Every variant means the presented token must not be trusted. `decode_token`
/// returns these; the password-reset verifier swallows them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Token algorithm does not match the configured algorithm")]
    InvalidAlgorithm,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Failed to load signing key: {message}")]
    KeyLoad { message: String },
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::InvalidAlgorithm,
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                claim: claim.clone(),
            },
            _ => TokenError::InvalidFormat,
        }
    }
}

/// Password hashing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The stored hash is not a well-formed bcrypt string
    #[error("Invalid password hash format: {message}")]
    HashFormat { message: String },

    #[error("Failed to hash password: {message}")]
    HashingFailed { message: String },

    #[error("Invalid bcrypt cost: {cost}")]
    InvalidCost { cost: u32 },

    /// bcrypt only reads the first 72 bytes of its input
    #[error("Password is longer than {max} bytes")]
    TooLong { max: usize },
}

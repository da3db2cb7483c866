//! Main token service implementation

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::entities::token::{AccessClaims, PasswordResetClaims, TokenClaims, TokenResponse};
use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::key_manager::KeyManager;

/// Issues and validates access tokens and password reset tokens
///
/// Holds only read-only state, so one instance can be shared across
/// threads behind an `Arc`.
#[derive(Debug)]
pub struct TokenService {
    config: TokenServiceConfig,
    keys: KeyManager,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService` or `TokenError::KeyLoad` if the signing keys
    /// cannot be loaded
    pub fn new(config: TokenServiceConfig) -> Result<Self, TokenError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service that stamps issuance times from `clock`
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let keys = config.load_key_manager()?;
        Ok(Self::with_keys(config, keys, clock))
    }

    /// Creates a token service with explicit signing keys
    ///
    /// The key manager's algorithm overrides the one in `config`.
    pub fn with_keys(mut config: TokenServiceConfig, keys: KeyManager, clock: Arc<dyn Clock>) -> Self {
        config.algorithm = keys.algorithm();
        let validation = Self::build_validation(config.algorithm);

        Self {
            config,
            keys,
            validation,
            clock,
        }
    }

    fn build_validation(algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Claim sets are returned as issued; audience is not part of this contract.
        validation.validate_aud = false;
        validation
    }

    /// Default lifetime of an access token
    ///
    /// `TokenError::GenerationFailed` when the configured minutes do not fit
    /// a `Duration`.
    pub fn access_token_expiry(&self) -> Result<Duration, TokenError> {
        Duration::try_minutes(self.config.access_token_expiry_minutes).ok_or_else(|| {
            debug!(minutes = self.config.access_token_expiry_minutes, "access token expiry out of range");
            TokenError::GenerationFailed
        })
    }

    /// Lifetime of a password reset token
    pub fn password_reset_expiry(&self) -> Result<Duration, TokenError> {
        Duration::try_hours(self.config.password_reset_expiry_hours).ok_or_else(|| {
            debug!(hours = self.config.password_reset_expiry_hours, "reset token expiry out of range");
            TokenError::GenerationFailed
        })
    }

    fn expires_after(issued: DateTime<Utc>, lifetime: Duration) -> Result<DateTime<Utc>, TokenError> {
        issued.checked_add_signed(lifetime).ok_or_else(|| {
            debug!(seconds = lifetime.num_seconds(), "token expiry overflows the calendar");
            TokenError::GenerationFailed
        })
    }

    /// Creates a signed access token for `subject`
    ///
    /// # Arguments
    ///
    /// * `subject` - Any identifier; stored as its string form
    /// * `expires_delta` - Lifetime override, defaults to the configured expiry
    pub fn create_access_token(
        &self,
        subject: impl Display,
        expires_delta: Option<Duration>,
    ) -> Result<String, TokenError> {
        let lifetime = match expires_delta {
            Some(delta) => delta,
            None => self.access_token_expiry()?,
        };
        let expire = Self::expires_after(self.clock.now(), lifetime)?;
        let claims = AccessClaims {
            exp: expire.timestamp(),
            sub: subject.to_string(),
        };
        self.encode_jwt(&claims)
    }

    /// Creates a bearer response for a successful login
    pub fn issue_bearer_token(&self, subject: impl Display) -> Result<TokenResponse, TokenError> {
        let access_token = self.create_access_token(subject, None)?;
        Ok(TokenResponse::bearer(access_token))
    }

    /// Validates signature, algorithm, `exp` and `nbf`, and returns the claim set
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is invalid, expired, not yet valid, or malformed
    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        // `exp` and `nbf` may be integers or floats; both are validated here.
        let token_data = decode::<Map<String, Value>>(token, self.keys.decoding_key(), &self.validation)?;
        Ok(TokenClaims::new(token_data.claims))
    }

    /// Decodes a token and returns its subject
    ///
    /// A valid token without `sub` is rejected with `TokenError::MissingClaim`.
    pub fn subject_from_token(&self, token: &str) -> Result<String, TokenError> {
        self.decode_token(token)?
            .subject()
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "sub".to_string(),
            })
    }

    /// Creates a password reset token for `email`
    ///
    /// `nbf` is the issuance time and `exp` is issuance plus the configured
    /// reset lifetime.
    pub fn generate_password_reset_token(&self, email: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires = Self::expires_after(now, self.password_reset_expiry()?)?;
        let claims = PasswordResetClaims {
            exp: expires.timestamp(),
            nbf: now.timestamp(),
            sub: email.to_string(),
        };
        self.encode_jwt(&claims)
    }

    /// Returns the email a reset token was issued for, or `None` if the token
    /// is not valid for any reason
    pub fn verify_password_reset_token(&self, token: &str) -> Option<String> {
        match self.decode_token(token) {
            Ok(claims) => {
                let subject = claims.subject();
                if subject.is_none() {
                    debug!("password reset token has no usable subject");
                }
                subject
            }
            Err(e) => {
                debug!(reason = %e, "password reset token rejected");
                None
            }
        }
    }

    /// Encodes claims into a JWT
    fn encode_jwt<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, self.keys.encoding_key()).map_err(|e| {
            debug!(error = %e, "failed to sign token");
            TokenError::GenerationFailed
        })
    }
}

//! Authentication settings: JWT signing, token lifetimes and password hashing cost

use serde::{Deserialize, Serialize};

/// Secret used when nothing is configured. Never acceptable in production.
pub const DEFAULT_JWT_SECRET: &str = "change-this-secret-before-deploying";

/// Algorithm names accepted for `JWT_ALGORITHM`
pub const SUPPORTED_ALGORITHMS: &[&str] = &[
    "HS256", "HS384", "HS512",
    "RS256", "RS384", "RS512",
    "PS256", "PS384", "PS512",
    "ES256", "ES384",
    "EdDSA",
];

/// Longest token or invitation lifetime accepted, in hours (1000 years)
pub const MAX_LIFETIME_HOURS: i64 = 24 * 365 * 1000;

/// Authentication settings, read once at startup
///
/// Field names match the lowercased environment variables
/// (`JWT_SECRET` -> `jwt_secret`), so the struct deserializes straight
/// out of a `config::Environment` source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Signing key for HMAC algorithms
    #[serde(default = "default_secret")]
    pub jwt_secret: String,

    /// Signing algorithm identifier (e.g. `HS256`, `RS256`)
    #[serde(default = "default_algorithm")]
    pub jwt_algorithm: String,

    /// Default access token lifetime in minutes
    #[serde(default = "default_access_minutes")]
    pub access_token_expire_minutes: i64,

    /// Password reset token lifetime in hours
    #[serde(default = "default_long_lived_hours")]
    pub password_reset_token_expire_hours: i64,

    /// Invitation validity window in hours
    #[serde(default = "default_long_lived_hours")]
    pub invitation_token_expire_hours: i64,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// PEM private key, required for asymmetric algorithms
    #[serde(default)]
    pub jwt_private_key_path: Option<String>,

    /// PEM public key, required for asymmetric algorithms
    #[serde(default)]
    pub jwt_public_key_path: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_secret(),
            jwt_algorithm: default_algorithm(),
            access_token_expire_minutes: default_access_minutes(),
            password_reset_token_expire_hours: default_long_lived_hours(),
            invitation_token_expire_hours: default_long_lived_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            jwt_private_key_path: None,
            jwt_public_key_path: None,
        }
    }
}

impl AuthSettings {
    /// Create settings with the given secret and defaults for everything else
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the access token lifetime in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Set the password reset token lifetime in hours
    pub fn with_reset_expiry_hours(mut self, hours: i64) -> Self {
        self.password_reset_token_expire_hours = hours;
        self
    }

    /// Set the bcrypt work factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Whether the configured algorithm signs with an HMAC shared secret
    pub fn is_symmetric(&self) -> bool {
        self.jwt_algorithm.starts_with("HS")
    }

    /// Check the settings for values the token and password services would reject
    pub fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_ALGORITHMS.contains(&self.jwt_algorithm.as_str()) {
            return Err(format!("unsupported JWT algorithm: {}", self.jwt_algorithm));
        }
        if self.is_symmetric() && self.jwt_secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if !self.is_symmetric()
            && (self.jwt_private_key_path.is_none() || self.jwt_public_key_path.is_none())
        {
            return Err(format!(
                "{} requires jwt_private_key_path and jwt_public_key_path",
                self.jwt_algorithm
            ));
        }
        if !(1..=MAX_LIFETIME_HOURS * 60).contains(&self.access_token_expire_minutes) {
            return Err(format!(
                "access token expiry must be between 1 and {} minutes",
                MAX_LIFETIME_HOURS * 60
            ));
        }
        if !(1..=MAX_LIFETIME_HOURS).contains(&self.password_reset_token_expire_hours) {
            return Err(format!(
                "password reset token expiry must be between 1 and {} hours",
                MAX_LIFETIME_HOURS
            ));
        }
        if !(1..=MAX_LIFETIME_HOURS).contains(&self.invitation_token_expire_hours) {
            return Err(format!(
                "invitation expiry must be between 1 and {} hours",
                MAX_LIFETIME_HOURS
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(format!("bcrypt cost {} outside 4..=31", self.bcrypt_cost));
        }
        Ok(())
    }
}

fn default_secret() -> String {
    String::from(DEFAULT_JWT_SECRET)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

// 100 years; the deployment overrides these per environment.
fn default_access_minutes() -> i64 {
    60 * 24 * 365 * 100
}

fn default_long_lived_hours() -> i64 {
    24 * 365 * 100
}

fn default_bcrypt_cost() -> u32 {
    12
}

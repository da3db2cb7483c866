//! Password hashing and verification using bcrypt
//!
//! Hashes are salted per call, so hashing the same password twice yields two
//! different strings that both verify. bcrypt compares digests in constant time.
//!
//! Passwords longer than [`MAX_PASSWORD_BYTES`] are refused outright; bcrypt
//! would otherwise ignore everything past that point.

use iq_shared::config::AuthSettings;
use tracing::warn;

use crate::errors::PasswordError;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;
/// Longest password bcrypt hashes without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost { cost });
        }
        Ok(Self { cost })
    }

    /// Creates a hasher from loaded settings
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, PasswordError> {
        Self::new(settings.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produces a new salted hash of `plain`
    pub fn get_password_hash(&self, plain: &str) -> Result<String, PasswordError> {
        check_length(plain)?;
        bcrypt::hash(plain, self.cost).map_err(|e| PasswordError::HashingFailed {
            message: e.to_string(),
        })
    }

    /// Checks `plain` against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches hash
    /// * `Ok(false)` - Password does not match hash
    /// * `Err(PasswordError::HashFormat)` - The stored hash is malformed
    /// * `Err(PasswordError::TooLong)` - `plain` exceeds [`MAX_PASSWORD_BYTES`]
    pub fn verify_password(&self, plain: &str, hashed: &str) -> Result<bool, PasswordError> {
        check_length(plain)?;
        bcrypt::verify(plain, hashed).map_err(|e| {
            warn!(error = %e, "stored password hash is malformed");
            PasswordError::HashFormat {
                message: e.to_string(),
            }
        })
    }

    /// [`get_password_hash`](Self::get_password_hash) on the blocking thread pool
    pub async fn hash_password_blocking(&self, plain: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.get_password_hash(&plain))
            .await
            .map_err(|e| PasswordError::HashingFailed {
                message: e.to_string(),
            })?
    }

    /// [`verify_password`](Self::verify_password) on the blocking thread pool
    pub async fn verify_password_blocking(
        &self,
        plain: String,
        hashed: String,
    ) -> Result<bool, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify_password(&plain, &hashed))
            .await
            .map_err(|e| PasswordError::HashingFailed {
                message: e.to_string(),
            })?
    }
}

fn check_length(plain: &str) -> Result<(), PasswordError> {
    if plain.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong {
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

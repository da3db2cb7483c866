//! Credential repository trait: the storage port authentication reads and writes through.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{NewUser, UserCredentials};
use crate::errors::DomainError;

/// Repository trait for user credential lookups and registration writes
///
/// Implementations live with the persistence layer. Emails are matched
/// exactly; normalisation is the caller's concern.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find a user's credentials by email
    ///
    /// # Returns
    /// * `Ok(Some(UserCredentials))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;

    /// Replace a user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Hash updated
    /// * `Ok(false)` - No user with that id
    /// * `Err(DomainError)` - Storage error
    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Store a new user, and its role when one is given, in one write
    ///
    /// A pending user already registered under the same email is replaced.
    ///
    /// # Returns
    /// * `Ok(UserCredentials)` - The stored user with its new id
    /// * `Err(DomainError)` - Storage error
    async fn create_user(&self, user: NewUser) -> Result<UserCredentials, DomainError>;
}

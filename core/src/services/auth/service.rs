//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::invitation::Invitation;
use crate::domain::entities::token::TokenResponse;
use crate::domain::entities::user::{NewUser, RoleAssignment, UserCredentials, UserStatus};
use crate::errors::{AuthError, DomainResult, PasswordError};
use crate::repositories::CredentialRepository;
use crate::services::invitation::InvitationService;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

/// Email/password authentication on top of the token service
pub struct AuthService<R>
where
    R: CredentialRepository,
{
    /// Credential lookups and password updates
    repository: Arc<R>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// bcrypt hasher
    hasher: PasswordHasher,
    /// Invitation checks for invited sign-ups
    invitations: InvitationService,
}

impl<R> AuthService<R>
where
    R: CredentialRepository,
{
    /// Create a new authentication service
    pub fn new(
        repository: Arc<R>,
        token_service: Arc<TokenService>,
        hasher: PasswordHasher,
        invitations: InvitationService,
    ) -> Self {
        Self {
            repository,
            token_service,
            hasher,
            invitations,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Looks up `email` and checks `password` against the stored hash
    ///
    /// # Returns
    ///
    /// * `Ok(Some(user))` - Credentials match
    /// * `Ok(None)` - Unknown email, wrong password, or unreadable stored hash
    /// * `Err(DomainError)` - Storage or hashing failure
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<UserCredentials>> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            debug!("authentication failed: unknown email");
            return Ok(None);
        };

        let matches = self
            .hasher
            .verify_password_blocking(password.to_string(), user.password_hash.clone())
            .await;

        match matches {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                debug!(user_id = %user.id, "authentication failed: wrong password");
                Ok(None)
            }
            Err(PasswordError::HashFormat { .. }) => {
                warn!(user_id = %user.id, "authentication failed: stored hash is malformed");
                Ok(None)
            }
            Err(PasswordError::TooLong { .. }) => {
                debug!(user_id = %user.id, "authentication failed: password too long");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open registration: stores a `pending` user with no role
    ///
    /// Any existing account with the same email, whatever its status, is
    /// rejected with `AuthError::EmailAlreadyRegistered`.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> DomainResult<UserCredentials> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hasher.hash_password_blocking(password.to_string()).await?;
        let user = self
            .repository
            .create_user(NewUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password_hash,
                status: UserStatus::Pending,
                role: None,
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Invited registration: stores an `active` user holding the invited role
    /// and marks the invitation used
    ///
    /// The invitation must be unused, unexpired and addressed to `email`. A
    /// pending account under the same email is superseded; an active or
    /// suspended one is rejected with `AuthError::EmailAlreadyRegistered`.
    pub async fn register_with_invitation(
        &self,
        invitation: &mut Invitation,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<UserCredentials> {
        self.invitations.check_invitation(invitation, email)?;

        if let Some(existing) = self.repository.find_by_email(email).await? {
            if existing.status != UserStatus::Pending {
                debug!(user_id = %existing.id, status = %existing.status, "invited email already registered");
                return Err(AuthError::EmailAlreadyRegistered.into());
            }
        }

        let password_hash = self.hasher.hash_password_blocking(password.to_string()).await?;
        let user = self
            .repository
            .create_user(NewUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password_hash,
                status: UserStatus::Active,
                role: Some(RoleAssignment {
                    role_id: invitation.role_id,
                    school_id: invitation.school_id,
                }),
            })
            .await?;

        self.invitations.mark_used(invitation);
        info!(user_id = %user.id, invitation_id = %invitation.id, "user registered by invitation");
        Ok(user)
    }

    /// Authenticates and issues a bearer token whose subject is the user's email
    ///
    /// Account status is not checked here; `current_user` refuses tokens of
    /// non-active users.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenResponse> {
        let user = self
            .authenticate(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let response = self.token_service.issue_bearer_token(&user.email)?;
        info!(user_id = %user.id, "user logged in");
        Ok(response)
    }

    /// Resolves the active user a bearer token was issued to
    pub async fn current_user(&self, token: &str) -> DomainResult<UserCredentials> {
        let email = self.token_service.subject_from_token(token)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active() {
            return Err(AuthError::InactiveUser {
                status: user.status.to_string(),
            }
            .into());
        }

        Ok(user)
    }

    /// Sets a new password for the holder of a valid reset token
    ///
    /// Returns `Ok(false)` when the token is not valid or names an unknown
    /// user; nothing is changed in that case.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<bool> {
        let Some(email) = self.token_service.verify_password_reset_token(token) else {
            return Ok(false);
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            debug!("password reset for unknown email");
            return Ok(false);
        };

        let password_hash = self.hasher.hash_password_blocking(new_password.to_string()).await?;
        let updated = self.repository.update_password_hash(user.id, &password_hash).await?;
        if updated {
            info!(user_id = %user.id, "password reset");
        }
        Ok(updated)
    }
}

//! Invitation token generation and invitation checks

use std::sync::Arc;

use chrono::Duration;
use iq_shared::config::AuthSettings;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::invitation::Invitation;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::services::token::{Clock, SystemClock};

/// Returns a fresh random invitation token (UUID v4, hyphenated)
///
/// The token carries no expiry of its own; the invitation record does.
pub fn generate_invitation_token() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Builds invitations and checks whether one may be redeemed
#[derive(Debug, Clone)]
pub struct InvitationService {
    expire_hours: i64,
    clock: Arc<dyn Clock>,
}

impl InvitationService {
    pub fn new(expire_hours: i64) -> Self {
        Self::with_clock(expire_hours, Arc::new(SystemClock))
    }

    pub fn with_clock(expire_hours: i64, clock: Arc<dyn Clock>) -> Self {
        Self { expire_hours, clock }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.invitation_token_expire_hours)
    }

    /// Creates an unused invitation with a fresh token
    ///
    /// Fails with `DomainError::Validation` when the configured validity
    /// window does not fit the calendar.
    pub fn new_invitation(
        &self,
        email: &str,
        role_id: i16,
        school_id: Uuid,
        sent_by: Option<Uuid>,
    ) -> DomainResult<Invitation> {
        let now = self.clock.now();
        let expires_at = Duration::try_hours(self.expire_hours)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| DomainError::Validation {
                message: format!("invitation expiry of {} hours is out of range", self.expire_hours),
            })?;

        Ok(Invitation {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role_id,
            school_id,
            token: generate_invitation_token(),
            expires_at,
            used_at: None,
            sent_by,
            created_at: now,
        })
    }

    /// Marks `invitation` as redeemed now
    pub fn mark_used(&self, invitation: &mut Invitation) {
        invitation.mark_used(self.clock.now());
    }

    /// Checks that `invitation` can be redeemed by `email`
    pub fn check_invitation(&self, invitation: &Invitation, email: &str) -> Result<(), AuthError> {
        if invitation.is_used() {
            debug!(invitation_id = %invitation.id, "invitation already used");
            return Err(AuthError::InvitationUsed);
        }
        if !invitation.is_valid_at(self.clock.now()) {
            debug!(invitation_id = %invitation.id, "invitation expired");
            return Err(AuthError::InvitationExpired);
        }
        if invitation.email != email {
            return Err(AuthError::InvitationEmailMismatch);
        }
        Ok(())
    }
}

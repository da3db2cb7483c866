//! Invitation entity: a single-use, time-limited offer to join a school with a role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An invitation as the storage layer keeps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub role_id: i16,
    pub school_id: Uuid,
    /// Opaque random token sent to the invitee
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub sent_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// `true` once `expires_at` has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    /// Unused and strictly before `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.expires_at > now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Record that the invitation was redeemed
    pub fn mark_used(&mut self, at: DateTime<Utc>) {
        if self.used_at.is_none() {
            self.used_at = Some(at);
        }
    }
}

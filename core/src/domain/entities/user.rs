//! User credential projection used by authentication, plus the records
//! registration writes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Registered without an invitation, awaiting a role
    Pending,
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields of a stored user that authentication needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash, never the plaintext
    pub password_hash: String,
    pub status: UserStatus,
}

impl UserCredentials {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// A role granted within one school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role_id: i16,
    pub school_id: Uuid,
}

/// A user about to be stored by registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub status: UserStatus,
    /// Granted together with the user; invitation sign-ups carry one
    pub role: Option<RoleAssignment>,
}

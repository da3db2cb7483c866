//! Mock implementation of CredentialRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{NewUser, RoleAssignment, UserCredentials};
use crate::errors::DomainError;

use super::credential::CredentialRepository;

/// In-memory credential store keyed by email
pub struct MockCredentialRepository {
    users: Arc<RwLock<HashMap<String, UserCredentials>>>,
    roles: Arc<RwLock<Vec<(Uuid, RoleAssignment)>>>,
}

impl MockCredentialRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Seed a user
    pub async fn insert(&self, user: UserCredentials) {
        self.users.write().await.insert(user.email.clone(), user);
    }

    /// Roles granted to `user_id`
    pub async fn roles_for(&self, user_id: Uuid) -> Vec<RoleAssignment> {
        self.roles
            .read()
            .await
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, role)| *role)
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockCredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialRepository for MockCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_user(&self, user: NewUser) -> Result<UserCredentials, DomainError> {
        let stored = UserCredentials {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            status: user.status,
        };
        if let Some(role) = user.role {
            self.roles.write().await.push((stored.id, role));
        }
        self.users.write().await.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }
}

//! Configuration for the token service

use std::path::PathBuf;
use std::str::FromStr;

use iq_shared::config::AuthSettings;
use jsonwebtoken::Algorithm;

use crate::errors::TokenError;

use super::key_manager::KeyManager;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret (HMAC algorithms)
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Default access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Password reset token expiry in hours
    pub password_reset_expiry_hours: i64,
    /// PEM key files for asymmetric algorithms
    pub key_paths: Option<KeyPaths>,
}

/// Locations of a PEM key pair
#[derive(Debug, Clone)]
pub struct KeyPaths {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: 30,
            password_reset_expiry_hours: 48,
            key_paths: None,
        }
    }
}

impl TokenServiceConfig {
    /// Build the token configuration from loaded settings
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(&settings.jwt_algorithm)
            .map_err(|_| TokenError::InvalidAlgorithm)?;

        let key_paths = match (&settings.jwt_private_key_path, &settings.jwt_public_key_path) {
            (Some(private_key), Some(public_key)) => Some(KeyPaths {
                private_key: PathBuf::from(private_key),
                public_key: PathBuf::from(public_key),
            }),
            _ => None,
        };

        Ok(Self {
            jwt_secret: settings.jwt_secret.clone(),
            algorithm,
            access_token_expiry_minutes: settings.access_token_expire_minutes,
            password_reset_expiry_hours: settings.password_reset_token_expire_hours,
            key_paths,
        })
    }

    /// Load the signing keys this configuration describes
    pub(crate) fn load_key_manager(&self) -> Result<KeyManager, TokenError> {
        if KeyManager::is_hmac(self.algorithm) {
            return Ok(KeyManager::from_secret(self.algorithm, self.jwt_secret.as_bytes()));
        }

        let paths = self.key_paths.as_ref().ok_or_else(|| TokenError::KeyLoad {
            message: format!("{:?} requires a PEM key pair", self.algorithm),
        })?;
        KeyManager::from_pem_files(self.algorithm, &paths.private_key, &paths.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = AuthSettings::new("s3cret")
            .with_access_expiry_minutes(15)
            .with_reset_expiry_hours(3);

        let config = TokenServiceConfig::from_settings(&settings).unwrap();
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.password_reset_expiry_hours, 3);
        assert!(config.key_paths.is_none());
    }

    #[test]
    fn test_unknown_algorithm() {
        let mut settings = AuthSettings::new("s3cret");
        settings.jwt_algorithm = "HS999".to_string();

        let result = TokenServiceConfig::from_settings(&settings);
        assert_eq!(result.unwrap_err(), TokenError::InvalidAlgorithm);
    }

    #[test]
    fn test_asymmetric_without_keys_fails_to_load() {
        let config = TokenServiceConfig {
            algorithm: Algorithm::RS256,
            ..Default::default()
        };

        assert!(matches!(config.load_key_manager(), Err(TokenError::KeyLoad { .. })));
    }
}

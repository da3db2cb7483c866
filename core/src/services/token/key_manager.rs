//! Signing key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Holds the encoding/decoding key pair for the configured algorithm
#[derive(Clone)]
pub struct KeyManager {
    algorithm: Algorithm,
    /// Key for signing JWTs
    encoding_key: EncodingKey,
    /// Key for verifying JWTs
    decoding_key: DecodingKey,
    /// Where the keys came from, for diagnostics
    source: KeySource,
}

#[derive(Clone)]
enum KeySource {
    Secret,
    Memory,
    Files { private_key: PathBuf, public_key: PathBuf },
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Secret => f.write_str("shared secret"),
            KeySource::Memory => f.write_str("in-memory PEM"),
            KeySource::Files {
                private_key,
                public_key,
            } => write!(
                f,
                "PEM files (private: {}, public: {})",
                private_key.display(),
                public_key.display()
            ),
        }
    }
}

// Key material stays out of debug output.
impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("algorithm", &self.algorithm)
            .field("source", &format_args!("{}", self.source))
            .finish()
    }
}

impl KeyManager {
    /// Whether `algorithm` signs with a shared secret
    pub fn is_hmac(algorithm: Algorithm) -> bool {
        matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
    }

    /// Creates a key manager for an HMAC algorithm
    pub fn from_secret(algorithm: Algorithm, secret: &[u8]) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            source: KeySource::Secret,
        }
    }

    /// Creates a key manager from PEM key files
    ///
    /// # Arguments
    ///
    /// * `algorithm` - An RSA, RSA-PSS, ECDSA or EdDSA algorithm
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    pub fn from_pem_files<P: AsRef<Path>>(
        algorithm: Algorithm,
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, TokenError> {
        let private_key = private_key_path.as_ref().to_path_buf();
        let public_key = public_key_path.as_ref().to_path_buf();

        let private_pem = fs::read(&private_key).map_err(|e| TokenError::KeyLoad {
            message: format!("Failed to read private key {}: {}", private_key.display(), e),
        })?;
        let public_pem = fs::read(&public_key).map_err(|e| TokenError::KeyLoad {
            message: format!("Failed to read public key {}: {}", public_key.display(), e),
        })?;

        let (encoding_key, decoding_key) = Self::parse_pem(algorithm, &private_pem, &public_pem)?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            source: KeySource::Files { private_key, public_key },
        })
    }

    /// Creates a key manager from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        algorithm: Algorithm,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, TokenError> {
        let (encoding_key, decoding_key) =
            Self::parse_pem(algorithm, private_key_pem.as_bytes(), public_key_pem.as_bytes())?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            source: KeySource::Memory,
        })
    }

    fn parse_pem(
        algorithm: Algorithm,
        private_pem: &[u8],
        public_pem: &[u8],
    ) -> Result<(EncodingKey, DecodingKey), TokenError> {
        let invalid = |which: &str, e: jsonwebtoken::errors::Error| TokenError::KeyLoad {
            message: format!("Invalid {} key format: {}", which, e),
        };

        let keys = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512
            | Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => (
                EncodingKey::from_rsa_pem(private_pem).map_err(|e| invalid("private", e))?,
                DecodingKey::from_rsa_pem(public_pem).map_err(|e| invalid("public", e))?,
            ),
            Algorithm::ES256 | Algorithm::ES384 => (
                EncodingKey::from_ec_pem(private_pem).map_err(|e| invalid("private", e))?,
                DecodingKey::from_ec_pem(public_pem).map_err(|e| invalid("public", e))?,
            ),
            Algorithm::EdDSA => (
                EncodingKey::from_ed_pem(private_pem).map_err(|e| invalid("private", e))?,
                DecodingKey::from_ed_pem(public_pem).map_err(|e| invalid("public", e))?,
            ),
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                return Err(TokenError::KeyLoad {
                    message: format!("{:?} uses a shared secret, not PEM keys", algorithm),
                })
            }
        };

        Ok(keys)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

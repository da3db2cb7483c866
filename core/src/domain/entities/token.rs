//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `token_type` reported alongside every issued access token
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Subject, usually the user's email or id
    pub sub: String,
}

/// Claims carried by a password reset token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetClaims {
    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Not before; pinned to the issuance time
    pub nbf: i64,

    /// Email the reset was requested for
    pub sub: String,
}

/// A decoded and validated claim set
///
/// Holds the payload exactly as the issuer wrote it. Typed views of the
/// registered claims are read on demand, so a float `exp` or a numeric `sub`
/// from another issuer survives decoding unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenClaims(Map<String, Value>);

impl TokenClaims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Looks up a claim by name, registered or not
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Expiration as whole unix seconds, when present and numeric
    pub fn exp(&self) -> Option<i64> {
        self.timestamp("exp")
    }

    /// Not-before as whole unix seconds, when present and numeric
    pub fn nbf(&self) -> Option<i64> {
        self.timestamp("nbf")
    }

    /// Subject in string form
    ///
    /// Numeric subjects are rendered the way they were written; any other
    /// JSON type yields `None`.
    pub fn subject(&self) -> Option<String> {
        match self.0.get("sub")? {
            Value::String(sub) => Some(sub.clone()),
            Value::Number(sub) => Some(sub.to_string()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn timestamp(&self, name: &str) -> Option<i64> {
        let value = self.0.get(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|seconds| seconds.floor() as i64))
    }
}

/// Login response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed access token
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,
}

impl TokenResponse {
    /// Wraps an access token as a bearer response
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}

mod key_manager_tests;
mod reset_tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::Algorithm;

use super::{FixedClock, TokenService, TokenServiceConfig};

pub(super) const TEST_SECRET: &str = "test-secret-for-unit-tests";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        algorithm: Algorithm::HS256,
        access_token_expiry_minutes: 30,
        password_reset_expiry_hours: 48,
        key_paths: None,
    }
}

pub(super) fn create_test_service() -> TokenService {
    TokenService::new(test_config()).expect("Failed to create token service")
}

pub(super) fn service_at(now: DateTime<Utc>) -> TokenService {
    TokenService::with_clock(test_config(), Arc::new(FixedClock(now)))
        .expect("Failed to create token service")
}

/// Replaces the first character of the signature segment
pub(super) fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').expect("token has three segments");
    let mut chars: Vec<char> = signature.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", head, chars.into_iter().collect::<String>())
}

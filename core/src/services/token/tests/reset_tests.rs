//! Tests for password reset tokens and their soft-failure verification

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::{create_test_service, service_at, tamper_signature, test_config, TEST_SECRET};

#[test]
fn test_reset_token_round_trip() {
    let service = create_test_service();
    let token = service.generate_password_reset_token("a@b.com").unwrap();

    assert_eq!(service.verify_password_reset_token(&token), Some("a@b.com".to_string()));
}

#[test]
fn test_reset_token_claims() {
    let issued = Utc::now() - Duration::minutes(10);
    let service = service_at(issued);
    let token = service.generate_password_reset_token("a@b.com").unwrap();

    let claims = service.decode_token(&token).unwrap();
    assert_eq!(claims.nbf(), Some(issued.timestamp()));
    assert_eq!(claims.exp(), Some((issued + Duration::hours(48)).timestamp()));
    assert_eq!(claims.subject().as_deref(), Some("a@b.com"));
}

#[test]
fn test_expired_reset_token_returns_none() {
    let issued = Utc::now() - Duration::hours(48) - Duration::minutes(1);
    let issuer = service_at(issued);
    let token = issuer.generate_password_reset_token("a@b.com").unwrap();

    let verifier = create_test_service();
    assert_eq!(verifier.verify_password_reset_token(&token), None);
    assert_eq!(verifier.decode_token(&token).unwrap_err(), TokenError::Expired);
}

#[test]
fn test_post_dated_reset_token_is_not_yet_valid() {
    let issuer = service_at(Utc::now() + Duration::hours(1));
    let token = issuer.generate_password_reset_token("a@b.com").unwrap();

    let verifier = create_test_service();
    assert_eq!(verifier.verify_password_reset_token(&token), None);
    assert_eq!(verifier.decode_token(&token).unwrap_err(), TokenError::NotYetValid);
}

#[test]
fn test_tampered_reset_token_returns_none() {
    let service = create_test_service();
    let token = service.generate_password_reset_token("a@b.com").unwrap();

    assert_eq!(service.verify_password_reset_token(&tamper_signature(&token)), None);
}

#[test]
fn test_garbage_reset_token_returns_none() {
    let service = create_test_service();

    assert_eq!(service.verify_password_reset_token(""), None);
    assert_eq!(service.verify_password_reset_token("garbage"), None);
    assert_eq!(service.verify_password_reset_token("x.y.z"), None);
}

#[test]
fn test_reset_token_from_other_secret_returns_none() {
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "someone-elses-secret".to_string(),
        ..test_config()
    })
    .unwrap();
    let token = other.generate_password_reset_token("a@b.com").unwrap();

    assert_eq!(create_test_service().verify_password_reset_token(&token), None);
}

#[test]
fn test_reset_verifier_accepts_any_token_with_subject() {
    // Reset and access tokens share the signing key and the subject claim.
    let service = create_test_service();
    let token = service.create_access_token("a@b.com", None).unwrap();

    assert_eq!(service.verify_password_reset_token(&token), Some("a@b.com".to_string()));
}

#[test]
fn test_reset_token_with_fractional_exp_is_accepted() {
    // Python-style issuers write `exp` as a float timestamp.
    let now = Utc::now().timestamp() as f64;
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({ "exp": now + 3600.25, "nbf": now - 1.0, "sub": "a@b.com" }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let service = create_test_service();
    assert_eq!(service.verify_password_reset_token(&token), Some("a@b.com".to_string()));
    let claims = service.decode_token(&token).unwrap();
    assert_eq!(claims.get("exp"), Some(&json!(now + 3600.25)));
}

#[test]
fn test_reset_token_with_out_of_range_expiry_fails_to_generate() {
    let service = TokenService::new(TokenServiceConfig {
        password_reset_expiry_hours: i64::MAX,
        ..test_config()
    })
    .unwrap();

    assert_eq!(
        service.generate_password_reset_token("a@b.com").unwrap_err(),
        TokenError::GenerationFailed
    );
}

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::env;
use thiserror::Error;

use crate::models::claims::AdminClaims;

// Masa berlaku token admin: 24 jam
const TOKEN_VALIDITY_SECONDS: i64 = 24 * 3600;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token invalid atau expired")]
    InvalidToken,

    #[error("JWT secret tidak ditemukan")]
    MissingSecret,

    #[error("Gagal generate token: {0}")]
    SigningFailed(String),
}

/// Generate JWT token untuk admin yang berhasil login
pub fn generate_token(admin_id: i64, username: &str, role: i32) -> Result<String, JwtError> {
    let secret = env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;

    let now = chrono::Utc::now().timestamp();
    let claims = AdminClaims {
        sub: admin_id,
        username: username.to_string(),
        role,
        exp: now + TOKEN_VALIDITY_SECONDS,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::SigningFailed(e.to_string()))
}

/// Validate JWT token dan extract claims
pub fn validate_token(token: &str) -> Result<AdminClaims, JwtError> {
    let secret = env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;

    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| JwtError::InvalidToken)?;

    Ok(token_data.claims)
}

/// Extract bearer token dari Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if auth_header.starts_with("Bearer ") {
        Some(auth_header[7..].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn setup_secret() {
        INIT.call_once(|| {
            env::set_var("JWT_SECRET", "metermind-test-secret");
        });
    }

    #[test]
    fn test_extract_bearer_token() {
        let header = "Bearer abc123token";
        assert_eq!(
            extract_bearer_token(header),
            Some("abc123token".to_string())
        );

        let invalid = "Token abc123";
        assert_eq!(extract_bearer_token(invalid), None);

        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_generate_and_validate_roundtrip() {
        setup_secret();

        let token = generate_token(7, "ops-admin", 2).expect("Gagal generate token");
        let claims = validate_token(&token).expect("Gagal validate token");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "ops-admin");
        assert_eq!(claims.role, 2);
        assert!(claims.is_super_admin());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_validate_garbage_token() {
        setup_secret();

        assert!(matches!(
            validate_token("not-a-jwt"),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_tokens_carry_unique_jti() {
        setup_secret();

        let a = validate_token(&generate_token(1, "a", 1).unwrap()).unwrap();
        let b = validate_token(&generate_token(1, "a", 1).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}

// JWT Authentication Middleware untuk Admin Service

use axum::{
    extract::Request,
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use shared::models::claims::ROLE_SUPER_ADMIN;
use shared::utils::jwt;

// Authentication context untuk admin yang sudah terautentikasi
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: i64,
    pub username: String,
    pub role: i32,
}

// Axum extractor implementation untuk AuthAdmin.
// Middleware auth menjamin context ini ada; hilangnya context pada route
// yang ter-autentikasi adalah pelanggaran invariant internal, bukan salah
// caller, sehingga dipetakan ke system error.
impl<S> axum::extract::FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .ok_or_else(|| AppError::internal("admin identity missing from request context"))
    }
}

// Extract Bearer token dari Authorization header
fn extract_jwt_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| AppError::unauthorized("Authorization header diperlukan"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid Authorization header format"))?;

    jwt::extract_bearer_token(auth_header)
        .ok_or_else(|| AppError::unauthorized("Bearer token format diperlukan"))
}

// JWT authentication middleware
pub async fn jwt_auth_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let token = extract_jwt_token(request.headers())?;

    let claims = jwt::validate_token(&token)
        .map_err(|_| AppError::unauthorized("Token tidak valid atau sudah expired"))?;

    let auth_admin = AuthAdmin {
        admin_id: claims.sub,
        username: claims.username,
        role: claims.role,
    };

    tracing::debug!(
        "admin authenticated - id: {}, username: {}, endpoint: {}",
        auth_admin.admin_id,
        auth_admin.username,
        request.uri().path()
    );

    request.extensions_mut().insert(auth_admin);

    Ok(next.run(request).await)
}

// Role gate untuk operasi yang butuh super admin
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let admin = request
        .extensions()
        .get::<AuthAdmin>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if admin.role < ROLE_SUPER_ADMIN {
        return Err(AppError::forbidden("super admin role required"));
    }

    Ok(next.run(request).await)
}

/// Ambil IP client dari proxy headers, fallback "unknown"
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or("").trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers), "198.51.100.2");

        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_extract_jwt_token_requires_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc123".parse().unwrap());
        assert_eq!(extract_jwt_token(&headers).unwrap(), "abc123");

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic abc123".parse().unwrap());
        assert!(extract_jwt_token(&headers).is_err());

        assert!(extract_jwt_token(&HeaderMap::new()).is_err());
    }
}

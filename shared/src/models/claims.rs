use serde::{Deserialize, Serialize};

/// Model JWT claims untuk admin authentication di seluruh sistem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminClaims {
    pub sub: i64,
    pub username: String,
    pub role: i32,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

// Role constants untuk admin
pub const ROLE_ADMIN: i32 = 1;
pub const ROLE_SUPER_ADMIN: i32 = 2;

impl AdminClaims {
    /// Cek apakah admin memiliki role super admin
    pub fn is_super_admin(&self) -> bool {
        self.role >= ROLE_SUPER_ADMIN
    }

    /// Cek apakah token sudah expired berdasarkan current time
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.exp <= now
    }

    /// Get remaining validity duration dalam detik
    pub fn remaining_validity(&self) -> i64 {
        let now = chrono::Utc::now().timestamp();
        (self.exp - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims(role: i32, exp_offset: i64) -> AdminClaims {
        let now = chrono::Utc::now().timestamp();
        AdminClaims {
            sub: 1,
            username: "admin".to_string(),
            role,
            exp: now + exp_offset,
            iat: now,
            jti: "test-jti".to_string(),
        }
    }

    #[test]
    fn test_super_admin_role() {
        assert!(sample_claims(ROLE_SUPER_ADMIN, 3600).is_super_admin());
        assert!(!sample_claims(ROLE_ADMIN, 3600).is_super_admin());
    }

    #[test]
    fn test_expiry_check() {
        assert!(!sample_claims(ROLE_ADMIN, 3600).is_expired());
        assert!(sample_claims(ROLE_ADMIN, -10).is_expired());
    }

    #[test]
    fn test_remaining_validity_never_negative() {
        assert_eq!(sample_claims(ROLE_ADMIN, -100).remaining_validity(), 0);
        assert!(sample_claims(ROLE_ADMIN, 3600).remaining_validity() > 0);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Daftar kolom admins untuk query runtime; urutannya mengikuti struct
pub const ADMIN_COLUMNS: &str = "id, username, email, password_hash, role, status, \
     last_login_at, created_at, updated_at, deleted_at";

// Model administrator. Soft delete lewat deleted_at; query selalu
// memfilter deleted_at IS NULL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    // 1 admin biasa, 2 super admin
    pub role: i32,

    // 0 disabled, 1 aktif
    pub status: i32,

    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

// Audit record operasi admin. Append-only: tidak pernah di-update
// atau dihapus setelah tertulis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct AdminOperation {
    pub id: i64,
    pub admin_id: i64,
    pub module: String,
    pub action: String,
    pub description: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
}

// Request login admin
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,
}

// Request update password
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 6))]
    pub old_password: String,

    #[validate(length(min = 6))]
    pub new_password: String,
}

// Request buat admin baru (super admin only)
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(range(min = 1, max = 2))]
    pub role: i32,
}

// Request update admin (super admin only)
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(range(min = 1, max = 2))]
    pub role: i32,

    #[validate(range(min = 0, max = 1))]
    pub status: i32,
}

// Query parameter untuk list admin
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct AdminListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub username: Option<String>,
}

impl AdminListQuery {
    pub fn limit(&self) -> i64 {
        i64::from(self.size.unwrap_or(10).max(1))
    }

    pub fn offset(&self) -> i64 {
        let page = i64::from(self.page.unwrap_or(1).max(1));
        (page - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_serializes_without_secrets() {
        let admin = Admin {
            id: 1,
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: 2,
            status: 1,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_string(&admin).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"username\":\"root\""));
    }

    #[test]
    fn test_create_admin_request_validation() {
        let ok = CreateAdminRequest {
            username: "finance_ops".to_string(),
            email: "ops@example.com".to_string(),
            password: "secret123".to_string(),
            role: 1,
        };
        assert!(ok.validate().is_ok());

        let bad_role = CreateAdminRequest { role: 3, ..ok };
        assert!(bad_role.validate().is_err());
    }
}

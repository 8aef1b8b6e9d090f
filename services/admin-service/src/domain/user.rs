use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::domain::order::OrderListItem;

// Ringkasan user platform untuk tampilan admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,

    // 0 disabled, 1 aktif
    pub status: i32,

    pub points: i32,
    pub created_at: DateTime<Utc>,
}

// Detail user: profil + order terakhir
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDetail {
    pub user: UserSummary,
    pub recent_orders: Vec<OrderListItem>,
}

// Query parameter untuk list user
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
}

impl UserListQuery {
    pub fn limit(&self) -> i64 {
        i64::from(self.size.unwrap_or(10).max(1))
    }

    pub fn offset(&self) -> i64 {
        let page = i64::from(self.page.unwrap_or(1).max(1));
        (page - 1) * self.limit()
    }
}

// Request update status user
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateUserStatusRequest {
    #[validate(range(min = 0, max = 1))]
    pub status: i32,

    #[validate(length(min = 1))]
    pub reason: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Model data order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Order {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub amount: f64,

    // Tidak ada state machine untuk order status; keempat nilai numerik
    // bebas saling menggantikan (perilaku sistem berjalan dipertahankan)
    pub status: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Item dalam satu order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub package_id: i64,
    pub points: i32,
    pub amount: f64,
}

// Ringkasan payment yang menempel pada order detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct OrderPaymentSummary {
    pub id: i64,
    pub payment_no: String,
    pub payment_method: String,
    pub amount: f64,
    pub status: i32,
    pub payment_time: Option<DateTime<Utc>>,
}

// Order beserta item dan payment-nya
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDetail {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub amount: f64,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub payments: Vec<OrderPaymentSummary>,
}

// Item untuk list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct OrderListItem {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub amount: f64,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

// Query parameter untuk list order
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub order_no: Option<String>,
    pub status: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl OrderListQuery {
    pub fn limit(&self) -> i64 {
        i64::from(self.size.unwrap_or(10).max(1))
    }

    pub fn offset(&self) -> i64 {
        let page = i64::from(self.page.unwrap_or(1).max(1));
        (page - 1) * self.limit()
    }
}

// Request update status order
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(range(min = 0, max = 3))]
    pub status: i32,

    #[validate(length(min = 1))]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_update_status_request_bounds() {
        for status in 0..=3 {
            let req = UpdateOrderStatusRequest {
                status,
                reason: "manual correction".to_string(),
            };
            assert!(req.validate().is_ok());
        }

        let req = UpdateOrderStatusRequest {
            status: 4,
            reason: "manual correction".to_string(),
        };
        assert!(req.validate().is_err());

        let req = UpdateOrderStatusRequest {
            status: 1,
            reason: String::new(),
        };
        assert!(req.validate().is_err());
    }
}

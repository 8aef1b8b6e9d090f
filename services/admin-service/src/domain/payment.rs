use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

// Model data pembayaran (ledger row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub payment_no: String,
    pub payment_method: String,
    pub amount: f64,

    // 0 pending, 1 paid, 2 failed, 3 refunded
    pub status: i32,

    pub payment_time: Option<DateTime<Utc>>,
    pub refund_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Record refund yang diterbitkan terhadap satu payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct PaymentRefund {
    pub id: i64,
    pub payment_id: i64,
    pub refund_no: String,
    pub amount: f64,
    pub reason: String,

    // 0 processing, 1 success, 2 failed
    pub status: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Record callback dari payment capture flow eksternal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct PaymentCallback {
    pub id: i64,
    pub payment_id: i64,
    pub callback_no: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Status payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(PaymentStatus::Pending),
            1 => Some(PaymentStatus::Paid),
            2 => Some(PaymentStatus::Failed),
            3 => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            PaymentStatus::Pending => 0,
            PaymentStatus::Paid => 1,
            PaymentStatus::Failed => 2,
            PaymentStatus::Refunded => 3,
        }
    }

    /// Satu-satunya transisi yang dimiliki subsystem ini: Paid -> Refunded.
    /// Refunded bersifat terminal.
    pub fn can_refund(self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

// Status refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub enum RefundStatus {
    Processing,
    Success,
    Failed,
}

impl RefundStatus {
    pub fn as_i32(self) -> i32 {
        match self {
            RefundStatus::Processing => 0,
            RefundStatus::Success => 1,
            RefundStatus::Failed => 2,
        }
    }
}

/// Gerbang precondition untuk CreateRefund, dipakai di dalam transaksi ledger
/// terhadap row payment yang sudah di-lock. Urutan pengecekan mengikuti
/// kontrak API: state dulu, baru amount.
pub fn refund_preconditions(
    payment_status: i32,
    payment_amount: f64,
    refund_amount: f64,
) -> Result<(), AppError> {
    let status = PaymentStatus::from_i32(payment_status)
        .ok_or_else(|| AppError::internal(format!("unknown payment status {}", payment_status)))?;

    if !status.can_refund() {
        return Err(AppError::invalid_state("payment status incorrect"));
    }

    if refund_amount <= 0.0 || !refund_amount.is_finite() {
        return Err(AppError::validation("refund amount must be positive"));
    }

    if refund_amount > payment_amount {
        return Err(AppError::validation(
            "refund amount exceeds payment amount",
        ));
    }

    Ok(())
}

/// Generate nomor refund yang unik tanpa coordination service:
/// "RF" + timestamp + payment id. Sortable dan bisa ditelusuri manusia.
pub fn generate_refund_no(payment_id: i64, at: DateTime<Utc>) -> String {
    format!("RF{}{}", at.format("%Y%m%d%H%M%S"), payment_id)
}

// Denormalized view untuk payment detail: payment + order_no + record terkait.
// Inilah payload yang disimpan di cache (JSON, TTL 30 menit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct PaymentDetail {
    pub id: i64,
    pub order_id: i64,
    pub order_no: String,
    pub payment_no: String,
    pub payment_method: String,
    pub amount: f64,
    pub status: i32,
    pub payment_time: Option<DateTime<Utc>>,
    pub refund_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub callbacks: Vec<PaymentCallback>,

    #[sqlx(skip)]
    pub refunds: Vec<PaymentRefund>,
}

// Item untuk list pembayaran (payment + order_no)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct PaymentListItem {
    pub id: i64,
    pub order_no: String,
    pub payment_no: String,
    pub payment_method: String,
    pub amount: f64,
    pub status: i32,
    pub payment_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Query parameter untuk list pembayaran, semua filter conjunctive
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct PaymentListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub order_no: Option<String>,
    pub payment_no: Option<String>,
    pub status: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl PaymentListQuery {
    pub fn limit(&self) -> i64 {
        i64::from(self.size.unwrap_or(10).max(1))
    }

    pub fn offset(&self) -> i64 {
        let page = i64::from(self.page.unwrap_or(1).max(1));
        (page - 1) * self.limit()
    }
}

// Request refund dari admin
#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateRefundRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    #[validate(length(min = 1))]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for v in 0..4 {
            assert_eq!(PaymentStatus::from_i32(v).unwrap().as_i32(), v);
        }
        assert!(PaymentStatus::from_i32(4).is_none());
        assert!(PaymentStatus::from_i32(-1).is_none());
    }

    #[test]
    fn test_only_paid_can_refund() {
        assert!(PaymentStatus::Paid.can_refund());
        assert!(!PaymentStatus::Pending.can_refund());
        assert!(!PaymentStatus::Failed.can_refund());
        // Refunded bersifat terminal
        assert!(!PaymentStatus::Refunded.can_refund());
    }

    #[test]
    fn test_refund_preconditions_happy_path() {
        assert!(refund_preconditions(1, 100.0, 50.0).is_ok());
        // Full refund diperbolehkan (amount == payment amount)
        assert!(refund_preconditions(1, 100.0, 100.0).is_ok());
    }

    #[test]
    fn test_refund_preconditions_wrong_state() {
        for status in [0, 2, 3] {
            let err = refund_preconditions(status, 100.0, 50.0).unwrap_err();
            assert!(matches!(err, AppError::InvalidStateError(_)));
            assert_eq!(err.business_code(), crate::error::code::PAYMENT_STATE_INVALID);
        }
    }

    #[test]
    fn test_refund_preconditions_amount_bounds() {
        assert!(matches!(
            refund_preconditions(1, 100.0, 150.0).unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            refund_preconditions(1, 100.0, 0.0).unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            refund_preconditions(1, 100.0, -10.0).unwrap_err(),
            AppError::ValidationError(_)
        ));
    }

    #[test]
    fn test_refund_preconditions_checks_state_before_amount() {
        // State salah + amount salah: state yang dilaporkan
        let err = refund_preconditions(3, 100.0, 150.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidStateError(_)));
    }

    #[test]
    fn test_generate_refund_no_format() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T09:30:15Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(generate_refund_no(42, at), "RF2026030109301542");
        assert!(generate_refund_no(7, at).starts_with("RF20260301"));
    }

    #[test]
    fn test_list_query_pagination_defaults() {
        let q = PaymentListQuery::default();
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);

        let q = PaymentListQuery {
            page: Some(3),
            size: Some(20),
            ..Default::default()
        };
        assert_eq!(q.limit(), 20);
        assert_eq!(q.offset(), 40);

        // Page 0 dinormalisasi ke page 1
        let q = PaymentListQuery {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(q.offset(), 0);
    }
}

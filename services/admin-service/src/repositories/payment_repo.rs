use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::payment::{
    generate_refund_no, refund_preconditions, Payment, PaymentCallback, PaymentDetail,
    PaymentListItem, PaymentListQuery, PaymentRefund, PaymentStatus, RefundStatus,
};
use crate::error::AppError;
use crate::repositories::audit;

// Port ke durable ledger untuk payment. Implementasi produksi memakai
// Postgres; test memakai in-memory fake dengan semantik transaksi yang sama.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    async fn payment_detail(&self, id: i64) -> Result<Option<PaymentDetail>, AppError>;

    async fn list_payments(
        &self,
        query: &PaymentListQuery,
    ) -> Result<(Vec<PaymentListItem>, i64), AppError>;

    /// Satu unit kerja atomik: re-read payment dengan row lock, cek
    /// precondition, insert refund, flip payment ke refunded, tulis audit
    /// record. Gagal di titik mana pun = rollback total.
    async fn create_refund(
        &self,
        payment_id: i64,
        amount: f64,
        reason: &str,
        admin_id: i64,
        ip: &str,
    ) -> Result<PaymentRefund, AppError>;
}

// Repository untuk operasi database payment
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PAYMENT_COLUMNS: &str = "id, order_id, payment_no, payment_method, \
     amount::FLOAT8 AS amount, status, payment_time, refund_time, created_at, updated_at";

#[async_trait]
impl PaymentLedger for PaymentRepository {
    async fn payment_detail(&self, id: i64) -> Result<Option<PaymentDetail>, AppError> {
        let detail = sqlx::query_as::<_, PaymentDetail>(
            r#"
            SELECT payments.id, payments.order_id, COALESCE(orders.order_no, '') AS order_no,
                   payments.payment_no, payments.payment_method,
                   payments.amount::FLOAT8 AS amount, payments.status,
                   payments.payment_time, payments.refund_time,
                   payments.created_at, payments.updated_at
            FROM payments
            LEFT JOIN orders ON orders.id = payments.order_id
            WHERE payments.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let mut detail = match detail {
            Some(d) => d,
            None => return Ok(None),
        };

        detail.callbacks = sqlx::query_as::<_, PaymentCallback>(
            r#"
            SELECT id, payment_id, callback_no, status, created_at, updated_at
            FROM payment_callbacks
            WHERE payment_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        detail.refunds = sqlx::query_as::<_, PaymentRefund>(
            r#"
            SELECT id, payment_id, refund_no, amount::FLOAT8 AS amount, reason, status,
                   created_at, updated_at
            FROM payment_refunds
            WHERE payment_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(detail))
    }

    async fn list_payments(
        &self,
        query: &PaymentListQuery,
    ) -> Result<(Vec<PaymentListItem>, i64), AppError> {
        // Filter conjunctive; parameter NULL berarti filter tidak aktif
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM payments
            LEFT JOIN orders ON orders.id = payments.order_id
            WHERE ($1::TEXT IS NULL OR orders.order_no = $1)
              AND ($2::TEXT IS NULL OR payments.payment_no = $2)
              AND ($3::INT4 IS NULL OR payments.status = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR payments.created_at >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR payments.created_at <= $5)
            "#,
        )
        .bind(&query.order_no)
        .bind(&query.payment_no)
        .bind(query.status)
        .bind(query.start_time)
        .bind(query.end_time)
        .fetch_one(&self.pool)
        .await?;

        // Urutan eksplisit supaya isi halaman deterministik
        let items = sqlx::query_as::<_, PaymentListItem>(
            r#"
            SELECT payments.id, COALESCE(orders.order_no, '') AS order_no,
                   payments.payment_no, payments.payment_method,
                   payments.amount::FLOAT8 AS amount, payments.status,
                   payments.payment_time, payments.created_at
            FROM payments
            LEFT JOIN orders ON orders.id = payments.order_id
            WHERE ($1::TEXT IS NULL OR orders.order_no = $1)
              AND ($2::TEXT IS NULL OR payments.payment_no = $2)
              AND ($3::INT4 IS NULL OR payments.status = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR payments.created_at >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR payments.created_at <= $5)
            ORDER BY payments.created_at DESC, payments.id DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(&query.order_no)
        .bind(&query.payment_no)
        .bind(query.status)
        .bind(query.start_time)
        .bind(query.end_time)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    async fn create_refund(
        &self,
        payment_id: i64,
        amount: f64,
        reason: &str,
        admin_id: i64,
        ip: &str,
    ) -> Result<PaymentRefund, AppError> {
        let mut tx = self.pool.begin().await?;

        // Re-read dengan row lock: dua refund concurrent terhadap payment
        // yang sama diserialisasi di sini, yang kalah melihat status yang
        // sudah berubah dan gagal dengan invalid state
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {} FROM payments WHERE id = $1 FOR UPDATE",
            PAYMENT_COLUMNS
        ))
        .bind(payment_id)
        .fetch_optional(&mut *tx)
        .await?;

        let payment = match payment {
            Some(p) => p,
            // Drop transaksi = rollback
            None => return Err(AppError::not_found("payment record not found")),
        };

        refund_preconditions(payment.status, payment.amount, amount)?;

        let now = Utc::now();
        let refund_no = generate_refund_no(payment_id, now);

        let refund = sqlx::query_as::<_, PaymentRefund>(
            r#"
            INSERT INTO payment_refunds
                (payment_id, refund_no, amount, reason, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, payment_id, refund_no, amount::FLOAT8 AS amount, reason, status,
                      created_at, updated_at
            "#,
        )
        .bind(payment_id)
        .bind(&refund_no)
        .bind(amount)
        .bind(reason)
        .bind(RefundStatus::Processing.as_i32())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE payments
            SET status = $1, refund_time = $2, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(PaymentStatus::Refunded.as_i32())
        .bind(now)
        .bind(payment_id)
        .execute(&mut *tx)
        .await?;

        // Audit record ikut transaksi: tidak ada mutasi tanpa audit
        audit::insert_operation(&mut *tx, admin_id, "payment", "create_refund", reason, ip)
            .await?;

        tx.commit().await?;

        Ok(refund)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::order::{
    Order, OrderDetail, OrderItem, OrderListItem, OrderListQuery, OrderPaymentSummary,
};
use crate::error::AppError;
use crate::repositories::audit;

// Port ke durable ledger untuk order
#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn order_detail(&self, id: i64) -> Result<Option<OrderDetail>, AppError>;

    async fn list_orders(
        &self,
        query: &OrderListQuery,
    ) -> Result<(Vec<OrderListItem>, i64), AppError>;

    /// Transisi status order dalam satu transaksi bersama audit record-nya.
    /// Tidak ada state machine di sini: keempat status bebas saling
    /// menggantikan, mengikuti perilaku sistem yang berjalan.
    async fn update_order_status(
        &self,
        order_id: i64,
        status: i32,
        reason: &str,
        admin_id: i64,
        ip: &str,
    ) -> Result<(), AppError>;
}

// Repository untuk operasi database order
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderLedger for OrderRepository {
    async fn order_detail(&self, id: i64) -> Result<Option<OrderDetail>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_no, user_id, amount::FLOAT8 AS amount, status,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let order = match order {
            Some(o) => o,
            None => return Ok(None),
        };

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, package_id, points, amount::FLOAT8 AS amount
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let payments = sqlx::query_as::<_, OrderPaymentSummary>(
            r#"
            SELECT id, payment_no, payment_method, amount::FLOAT8 AS amount, status,
                   payment_time
            FROM payments
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderDetail {
            id: order.id,
            order_no: order.order_no,
            user_id: order.user_id,
            amount: order.amount,
            status: order.status,
            created_at: order.created_at,
            items,
            payments,
        }))
    }

    async fn list_orders(
        &self,
        query: &OrderListQuery,
    ) -> Result<(Vec<OrderListItem>, i64), AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::TEXT IS NULL OR order_no = $1)
              AND ($2::INT4 IS NULL OR status = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR created_at <= $4)
            "#,
        )
        .bind(&query.order_no)
        .bind(query.status)
        .bind(query.start_time)
        .bind(query.end_time)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, OrderListItem>(
            r#"
            SELECT id, order_no, user_id, amount::FLOAT8 AS amount, status, created_at
            FROM orders
            WHERE ($1::TEXT IS NULL OR order_no = $1)
              AND ($2::INT4 IS NULL OR status = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR created_at <= $4)
            ORDER BY created_at DESC, id DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(&query.order_no)
        .bind(query.status)
        .bind(query.start_time)
        .bind(query.end_time)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: i32,
        reason: &str,
        admin_id: i64,
        ip: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_none() {
            return Err(AppError::not_found("order not found"));
        }

        sqlx::query("UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status)
            .bind(Utc::now())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        audit::insert_operation(
            &mut *tx,
            admin_id,
            "order",
            &format!("update_status_{}", status),
            reason,
            ip,
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

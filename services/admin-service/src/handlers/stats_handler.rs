// Statistik billing untuk dashboard admin

use axum::{extract::State, response::Json};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::config::AppState;
use crate::error::{code, AppError};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatsOverview {
    pub total_users: i64,
    pub active_users: i64,
    pub total_orders: i64,
    pub total_amount: f64,
    pub paid_payments: i64,
    pub refunded_amount: f64,
}

#[derive(Debug, Serialize, FromRow, utoipa::ToSchema)]
pub struct DailyStat {
    pub date: String,
    pub new_users: i64,
    pub order_count: i64,
    pub order_amount: f64,
    pub refund_count: i64,
}

#[derive(Debug, Serialize, FromRow, utoipa::ToSchema)]
pub struct PaymentMethodStat {
    pub payment_method: String,
    pub payment_count: i64,
    pub amount: f64,
}

/// Ringkasan sistem: user, order, pembayaran
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats/overview",
    tag = "Stats",
    responses((status = 200, description = "Ringkasan sistem", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn stats_overview(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await?;

    let active_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE status = 1")
        .fetch_one(&state.db)
        .await?;

    let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.db)
        .await?;

    let total_amount: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0)::FLOAT8 FROM orders")
            .fetch_one(&state.db)
            .await?;

    let paid_payments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE status = 1")
            .fetch_one(&state.db)
            .await?;

    let refunded_amount: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0)::FLOAT8 FROM payment_refunds")
            .fetch_one(&state.db)
            .await?;

    let overview = StatsOverview {
        total_users,
        active_users,
        total_orders,
        total_amount,
        paid_payments,
        refunded_amount,
    };

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": overview,
    })))
}

/// Statistik harian 30 hari terakhir
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats/daily",
    tag = "Stats",
    responses((status = 200, description = "Statistik harian", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn stats_daily(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = sqlx::query_as::<_, DailyStat>(
        r#"
        WITH dates AS (
            SELECT generate_series(
                date_trunc('day', now()) - interval '29 days',
                date_trunc('day', now()),
                interval '1 day'
            )::date AS date
        )
        SELECT
            d.date::TEXT AS date,
            (SELECT COUNT(*) FROM users u WHERE u.created_at::date = d.date) AS new_users,
            (SELECT COUNT(*) FROM orders o WHERE o.created_at::date = d.date) AS order_count,
            COALESCE((SELECT SUM(o.amount) FROM orders o WHERE o.created_at::date = d.date), 0)::FLOAT8 AS order_amount,
            (SELECT COUNT(*) FROM payment_refunds r WHERE r.created_at::date = d.date) AS refund_count
        FROM dates d
        ORDER BY d.date DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": stats,
    })))
}

/// Breakdown pembayaran sukses per payment method
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats/payment",
    tag = "Stats",
    responses((status = 200, description = "Statistik per payment method", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn stats_payment(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = sqlx::query_as::<_, PaymentMethodStat>(
        r#"
        SELECT payment_method,
               COUNT(*) AS payment_count,
               COALESCE(SUM(amount), 0)::FLOAT8 AS amount
        FROM payments
        WHERE status = 1
        GROUP BY payment_method
        ORDER BY amount DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": stats,
    })))
}

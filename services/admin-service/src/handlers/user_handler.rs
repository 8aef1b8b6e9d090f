// Manajemen user platform dari sisi admin

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::config::AppState;
use crate::domain::order::OrderListItem;
use crate::domain::user::{UpdateUserStatusRequest, UserDetail, UserListQuery, UserSummary};
use crate::error::{code, AppError};
use crate::middleware::auth::{client_ip, AuthAdmin};
use crate::repositories::audit;

const USER_COLUMNS: &str = "id, username, email, phone, status, points, created_at";

/// List user dengan filter username/email/status
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "User Management",
    params(UserListQuery),
    responses((status = 200, description = "Daftar user", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>, AppError> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM users
        WHERE ($1::TEXT IS NULL OR username LIKE '%' || $1 || '%')
          AND ($2::TEXT IS NULL OR email LIKE '%' || $2 || '%')
          AND ($3::INT4 IS NULL OR status = $3)
        "#,
    )
    .bind(&query.username)
    .bind(&query.email)
    .bind(query.status)
    .fetch_one(&state.db)
    .await?;

    let users = sqlx::query_as::<_, UserSummary>(&format!(
        r#"
        SELECT {}
        FROM users
        WHERE ($1::TEXT IS NULL OR username LIKE '%' || $1 || '%')
          AND ($2::TEXT IS NULL OR email LIKE '%' || $2 || '%')
          AND ($3::INT4 IS NULL OR status = $3)
        ORDER BY created_at DESC, id DESC
        LIMIT $4 OFFSET $5
        "#,
        USER_COLUMNS
    ))
    .bind(&query.username)
    .bind(&query.email)
    .bind(query.status)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": {
            "total": total,
            "list": users,
        }
    })))
}

/// Enable/disable user. Audit record ditulis best-effort di luar
/// transaksi; kegagalannya hanya dicatat.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/status",
    tag = "User Management",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserStatusRequest,
    responses((status = 200, description = "Status user diperbarui")),
    security(("bearer_auth" = []))
)]
pub async fn update_user_status(
    auth: AuthAdmin,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserStatusRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    sqlx::query("UPDATE users SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(request.status)
        .bind(Utc::now())
        .bind(id)
        .execute(&state.db)
        .await?;

    let ip = client_ip(&headers);
    if let Err(e) = audit::insert_operation(
        &state.db,
        auth.admin_id,
        "user",
        "update_status",
        &request.reason,
        &ip,
    )
    .await
    {
        tracing::warn!("failed to record admin operation for user {}: {}", id, e);
    }

    tracing::info!(
        "user status updated: user_id={}, status={}, admin_id={}",
        id,
        request.status,
        auth.admin_id
    );

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "user status updated",
    })))
}

/// Detail user: profil + order terakhir
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}/detail",
    tag = "User Management",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Detail user", body = serde_json::Value),
        (status = 404, description = "User tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let user = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::not_found("user not found"))?;

    let recent_orders = sqlx::query_as::<_, OrderListItem>(
        r#"
        SELECT id, order_no, user_id, amount::FLOAT8 AS amount, status, created_at
        FROM orders
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT 10
        "#,
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    let detail = UserDetail {
        user,
        recent_orders,
    };

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": detail,
    })))
}

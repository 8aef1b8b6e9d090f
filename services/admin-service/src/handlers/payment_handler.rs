use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::config::AppState;
use crate::domain::payment::{CreateRefundRequest, PaymentListQuery};
use crate::error::{code, AppError};
use crate::middleware::auth::{client_ip, AuthAdmin};

/// List pembayaran dengan filter dan pagination. Murni read ledger,
/// tanpa cache.
#[utoipa::path(
    get,
    path = "/api/v1/admin/payments",
    tag = "Payment Management",
    params(PaymentListQuery),
    responses((status = 200, description = "Daftar pembayaran", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<Value>, AppError> {
    let (payments, total) = state.payments.list_payments(&query).await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": {
            "total": total,
            "list": payments,
        }
    })))
}

/// Detail pembayaran (cache-aside, TTL 30 menit)
#[utoipa::path(
    get,
    path = "/api/v1/admin/payments/{id}",
    tag = "Payment Management",
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Detail pembayaran", body = serde_json::Value),
        (status = 404, description = "Payment tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn payment_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let detail = state.payments.payment_detail(id).await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": detail,
    })))
}

/// Terbitkan refund untuk satu pembayaran (super admin only).
/// Transisi yang sah hanya paid -> refunded.
#[utoipa::path(
    post,
    path = "/api/v1/admin/payments/{id}/refund",
    tag = "Payment Management",
    params(("id" = i64, Path, description = "Payment ID")),
    request_body = CreateRefundRequest,
    responses(
        (status = 200, description = "Refund dibuat", body = serde_json::Value),
        (status = 400, description = "Status payment salah atau amount tidak valid"),
        (status = 404, description = "Payment tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_refund(
    auth: AuthAdmin,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<CreateRefundRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let ip = client_ip(&headers);
    let refund = state
        .payments
        .create_refund(id, &request, auth.admin_id, &ip)
        .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "refund created",
        "data": refund,
    })))
}

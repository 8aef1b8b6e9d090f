use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::config::AppState;
use crate::domain::order::{OrderListQuery, UpdateOrderStatusRequest};
use crate::error::{code, AppError};
use crate::middleware::auth::{client_ip, AuthAdmin};

/// List order dengan filter dan pagination
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    tag = "Order Management",
    params(OrderListQuery),
    responses((status = 200, description = "Daftar order", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Value>, AppError> {
    let (orders, total) = state.orders.list_orders(&query).await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": {
            "total": total,
            "list": orders,
        }
    })))
}

/// Detail order: order + item + payment yang menempel
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/{id}",
    tag = "Order Management",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Detail order", body = serde_json::Value),
        (status = 404, description = "Order tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn order_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let detail = state.orders.order_detail(id).await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": detail,
    })))
}

/// Update status order. Mutasi + audit record berjalan dalam satu
/// transaksi di ledger.
#[utoipa::path(
    put,
    path = "/api/v1/admin/orders/{id}/status",
    tag = "Order Management",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status order diperbarui"),
        (status = 404, description = "Order tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order_status(
    auth: AuthAdmin,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let ip = client_ip(&headers);
    state
        .orders
        .update_order_status(id, request.status, &request.reason, auth.admin_id, &ip)
        .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "order status updated",
    })))
}

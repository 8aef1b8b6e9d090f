// Manajemen akun admin (super admin only)

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::config::AppState;
use crate::domain::admin::{
    Admin, AdminListQuery, CreateAdminRequest, UpdateAdminRequest, ADMIN_COLUMNS,
};
use crate::error::{code, AppError};

/// List admin dengan filter username
#[utoipa::path(
    get,
    path = "/api/v1/admin/list",
    tag = "Admin Management",
    params(AdminListQuery),
    responses((status = 200, description = "Daftar admin", body = serde_json::Value)),
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<Value>, AppError> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM admins
        WHERE deleted_at IS NULL
          AND ($1::TEXT IS NULL OR username LIKE '%' || $1 || '%')
        "#,
    )
    .bind(&query.username)
    .fetch_one(&state.db)
    .await?;

    let admins = sqlx::query_as::<_, Admin>(&format!(
        r#"
        SELECT {}
        FROM admins
        WHERE deleted_at IS NULL
          AND ($1::TEXT IS NULL OR username LIKE '%' || $1 || '%')
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
        ADMIN_COLUMNS
    ))
    .bind(&query.username)
    .bind(query.limit())
    .bind(query.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": {
            "total": total,
            "list": admins,
        }
    })))
}

/// Buat admin baru
#[utoipa::path(
    post,
    path = "/api/v1/admin/create",
    tag = "Admin Management",
    request_body = CreateAdminRequest,
    responses(
        (status = 200, description = "Admin dibuat", body = serde_json::Value),
        (status = 400, description = "Email sudah terdaftar")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    if !shared::utils::validation::is_valid_username(&request.username) {
        return Err(AppError::validation(
            "username hanya boleh alfanumerik dan underscore",
        ));
    }

    if !shared::utils::validation::is_strong_password(&request.password) {
        return Err(AppError::validation(
            "password harus mengandung huruf dan angka",
        ));
    }

    let existing: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM admins WHERE email = $1 AND deleted_at IS NULL",
    )
    .bind(&request.email)
    .fetch_one(&state.db)
    .await?;

    if existing > 0 {
        return Err(AppError::validation("email already registered"));
    }

    let password_hash = shared::utils::hash::hash_password(&request.password)?;

    let admin = sqlx::query_as::<_, Admin>(&format!(
        r#"
        INSERT INTO admins (username, email, password_hash, role, status)
        VALUES ($1, $2, $3, $4, 1)
        RETURNING {}
        "#,
        ADMIN_COLUMNS
    ))
    .bind(&request.username)
    .bind(&request.email)
    .bind(password_hash)
    .bind(request.role)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("admin created: {} (id={})", admin.username, admin.id);

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "admin created",
        "data": admin,
    })))
}

/// Update username/role/status admin
#[utoipa::path(
    put,
    path = "/api/v1/admin/{id}",
    tag = "Admin Management",
    params(("id" = i64, Path, description = "Admin ID")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin diperbarui", body = serde_json::Value),
        (status = 404, description = "Admin tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let admin = sqlx::query_as::<_, Admin>(&format!(
        r#"
        UPDATE admins
        SET username = $1, role = $2, status = $3, updated_at = $4
        WHERE id = $5 AND deleted_at IS NULL
        RETURNING {}
        "#,
        ADMIN_COLUMNS
    ))
    .bind(&request.username)
    .bind(request.role)
    .bind(request.status)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::not_found("admin not found"))?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "admin updated",
        "data": admin,
    })))
}

/// Hapus admin (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/{id}",
    tag = "Admin Management",
    params(("id" = i64, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin dihapus"),
        (status = 404, description = "Admin tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = sqlx::query(
        "UPDATE admins SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(&state.db)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found("admin not found"));
    }

    tracing::info!("admin deleted: id={}", id);

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "admin deleted",
    })))
}

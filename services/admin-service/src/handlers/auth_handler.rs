use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::config::AppState;
use crate::domain::admin::{Admin, LoginRequest, UpdatePasswordRequest, ADMIN_COLUMNS};
use crate::error::{code, AppError};
use crate::middleware::auth::AuthAdmin;

async fn find_admin_by_id(state: &AppState, admin_id: i64) -> Result<Admin, AppError> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {} FROM admins WHERE id = $1 AND deleted_at IS NULL",
        ADMIN_COLUMNS
    ))
    .bind(admin_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::not_found("admin not found"))
}

/// Login admin dengan email + password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login berhasil, JWT token dikembalikan", body = serde_json::Value),
        (status = 400, description = "Email tidak terdaftar atau password salah"),
        (status = 403, description = "Akun admin dinonaktifkan")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let admin = sqlx::query_as::<_, Admin>(&format!(
        "SELECT {} FROM admins WHERE email = $1 AND deleted_at IS NULL",
        ADMIN_COLUMNS
    ))
    .bind(&request.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::AdminNotExist)?;

    if !shared::utils::hash::verify_password(&request.password, &admin.password_hash)? {
        return Err(AppError::WrongPassword);
    }

    if admin.status == 0 {
        return Err(AppError::AdminDisabled);
    }

    let token = shared::utils::jwt::generate_token(admin.id, &admin.username, admin.role)
        .map_err(|e| AppError::internal(format!("token generation failed: {}", e)))?;

    sqlx::query("UPDATE admins SET last_login_at = $1, updated_at = $1 WHERE id = $2")
        .bind(Utc::now())
        .bind(admin.id)
        .execute(&state.db)
        .await?;

    tracing::info!("admin login: {} (id={})", admin.username, admin.id);

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "login success",
        "data": {
            "token": token,
            "admin": admin,
        }
    })))
}

/// Logout admin. Token bersifat stateless, jadi cukup acknowledge;
/// client membuang token-nya.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Logout berhasil")),
    security(("bearer_auth" = []))
)]
pub async fn logout(auth: AuthAdmin) -> Result<Json<Value>, AppError> {
    tracing::info!("admin logout: {} (id={})", auth.username, auth.admin_id);

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "logout success",
    })))
}

/// Info admin yang sedang login
#[utoipa::path(
    get,
    path = "/api/v1/auth/info",
    tag = "Auth",
    responses(
        (status = 200, description = "Profil admin", body = serde_json::Value),
        (status = 404, description = "Admin tidak ditemukan")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_info(
    auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let admin = find_admin_by_id(&state, auth.admin_id).await?;

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "success",
        "data": admin,
    })))
}

/// Ganti password admin yang sedang login
#[utoipa::path(
    put,
    path = "/api/v1/auth/password",
    tag = "Auth",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password berhasil diganti"),
        (status = 400, description = "Password lama salah")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_password(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let admin = find_admin_by_id(&state, auth.admin_id).await?;

    if !shared::utils::hash::verify_password(&request.old_password, &admin.password_hash)? {
        return Err(AppError::WrongPassword);
    }

    if !shared::utils::validation::is_strong_password(&request.new_password) {
        return Err(AppError::validation(
            "password harus mengandung huruf dan angka",
        ));
    }

    let new_hash = shared::utils::hash::hash_password(&request.new_password)?;

    sqlx::query("UPDATE admins SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(new_hash)
        .bind(Utc::now())
        .bind(admin.id)
        .execute(&state.db)
        .await?;

    tracing::info!("admin password updated: id={}", admin.id);

    Ok(Json(json!({
        "code": code::SUCCESS,
        "message": "password updated",
    })))
}

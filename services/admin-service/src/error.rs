use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Kode bisnis yang stabil untuk response API.
// 0 sukses, 1xxx generic, 2xxx auth/admin, 3xxx payment.
pub mod code {
    pub const SUCCESS: i32 = 0;
    pub const PARAM_ERROR: i32 = 1001;
    pub const UNAUTHORIZED: i32 = 1002;
    pub const FORBIDDEN: i32 = 1003;
    pub const NOT_FOUND: i32 = 1004;
    pub const SYSTEM_ERROR: i32 = 1005;
    pub const ADMIN_NOT_EXIST: i32 = 2001;
    pub const WRONG_PASSWORD: i32 = 2002;
    pub const ADMIN_DISABLED: i32 = 2003;
    pub const PAYMENT_STATE_INVALID: i32 = 3002;
}

// Error type untuk aplikasi dengan HTTP mapping
#[derive(Debug, Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    // Authentication errors
    #[error("Unauthorized: {0}")]
    UnauthorizedError(String),

    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    // Not found errors
    #[error("Resource not found: {0}")]
    NotFoundError(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    // Login errors dengan kode bisnis sendiri
    #[error("Admin not found")]
    AdminNotExist,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Admin account disabled")]
    AdminDisabled,

    // Entity tidak berada di state yang mengizinkan transisi
    #[error("Invalid state: {0}")]
    InvalidStateError(String),
}

// Builder methods untuk error creation yang clean
impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::UnauthorizedError(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::ForbiddenError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFoundError(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        AppError::DatabaseError(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        AppError::InvalidStateError(message.into())
    }

    // Kode bisnis untuk response envelope
    pub fn business_code(&self) -> i32 {
        match self {
            AppError::ValidationError(_) => code::PARAM_ERROR,
            AppError::UnauthorizedError(_) => code::UNAUTHORIZED,
            AppError::ForbiddenError(_) => code::FORBIDDEN,
            AppError::NotFoundError(_) => code::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) => code::SYSTEM_ERROR,
            AppError::AdminNotExist => code::ADMIN_NOT_EXIST,
            AppError::WrongPassword => code::WRONG_PASSWORD,
            AppError::AdminDisabled => code::ADMIN_DISABLED,
            AppError::InvalidStateError(_) => code::PAYMENT_STATE_INVALID,
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::AdminNotExist
            | AppError::WrongPassword
            | AppError::InvalidStateError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedError(_) => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenError(_) | AppError::AdminDisabled => StatusCode::FORBIDDEN,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Mapping error ke HTTP response dengan envelope {code, message}
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let business_code = self.business_code();
        let message = match &self {
            // Detail kegagalan internal tidak bocor ke caller
            AppError::DatabaseError(detail) | AppError::InternalError(detail) => {
                tracing::error!("System error ({}): {}", business_code, detail);
                "system error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "code": business_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

// Implement From trait untuk error conversion
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::database(err.to_string())
    }
}

impl From<shared::utils::jwt::JwtError> for AppError {
    fn from(err: shared::utils::jwt::JwtError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |e| format!("{}: {}", field, e.code.as_ref()))
            })
            .collect();
        AppError::validation(messages.join(", "))
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::internal(format!("password hash failure: {}", err))
    }
}

// Type alias untuk Result dengan AppError sebagai error type
pub type AppResult<T> = Result<T, AppError>;

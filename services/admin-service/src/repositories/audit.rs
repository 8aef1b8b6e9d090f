// Penulisan audit record admin_operations.
// Executor generik: dipanggil dengan transaksi yang sedang berjalan agar
// audit record ikut commit/rollback bersama mutasi bisnisnya, atau dengan
// pool untuk call site yang memang fire-and-forget.

use chrono::Utc;
use sqlx::PgExecutor;

use crate::error::AppError;

pub async fn insert_operation<'e, E>(
    executor: E,
    admin_id: i64,
    module: &str,
    action: &str,
    description: &str,
    ip: &str,
) -> Result<(), AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO admin_operations (admin_id, module, action, description, ip, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(admin_id)
    .bind(module)
    .bind(action)
    .bind(description)
    .bind(ip)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

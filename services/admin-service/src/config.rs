// Admin Service Configuration
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::RedisCache;
use crate::repositories::order_repo::OrderRepository;
use crate::repositories::payment_repo::PaymentRepository;
use crate::services::order_service::OrderService;
use crate::services::payment_service::PaymentService;

// Konfigurasi aplikasi dari environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
}

impl AppConfig {
    // Load konfigurasi dari environment variables
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable harus diset".to_string())?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable harus diset".to_string())?;

        // Redis opsional secara runtime: server yang mati hanya berarti
        // cache miss terus-menerus, bukan kegagalan service
        let redis_url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let server_host = std::env::var("ADMIN_SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = std::env::var("ADMIN_SERVICE_PORT")
            .unwrap_or_else(|_| "3010".to_string())
            .parse::<u16>()
            .map_err(|_| "ADMIN_SERVICE_PORT harus berupa angka".to_string())?;

        let environment = std::env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            database_url,
            redis_url,
            jwt_secret,
            server_host,
            server_port,
            environment,
        })
    }

    // Cek apakah environment production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Status untuk health check
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub database: String,
    pub overall: String,
}

// Application state dengan dependency injection: store dan cache dibangun
// sekali di sini dan di-inject ke services, tidak ada global mutable state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: AppConfig,
    pub payments: PaymentService,
    pub orders: OrderService,
}

impl axum::extract::FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl AppState {
    // Buat AppState baru: pool database, migrasi, seed super admin, cache
    pub async fn new() -> Result<Self, String> {
        let config = AppConfig::from_env()?;

        // Security check untuk production
        if config.is_production() && config.jwt_secret.contains("change-this") {
            return Err(
                "SECURITY WARNING: JWT_SECRET masih menggunakan default value di production"
                    .to_string(),
            );
        }

        let db = init_db_pool(&config.database_url).await?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(|e| format!("Gagal menjalankan migrasi: {}", e))?;

        ensure_super_admin(&db).await?;

        let cache = RedisCache::new(&config.redis_url)
            .map_err(|e| format!("REDIS_URL tidak valid: {}", e))?;

        let payments = PaymentService::new(
            Arc::new(PaymentRepository::new(db.clone())),
            Arc::new(cache),
        );
        let orders = OrderService::new(Arc::new(OrderRepository::new(db.clone())));

        Ok(Self {
            db,
            config,
            payments,
            orders,
        })
    }

    // Health check untuk database
    pub async fn health_check(&self) -> HealthStatus {
        let db_healthy = check_db_health(&self.db).await;

        HealthStatus {
            database: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
            overall: if db_healthy { "healthy" } else { "degraded" }.to_string(),
        }
    }
}

// Inisialisasi database connection pool dengan optimal settings
async fn init_db_pool(database_url: &str) -> Result<PgPool, String> {
    PgPoolOptions::new()
        .max_connections(15)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .map_err(|e| format!("Gagal connect ke database: {}", e))
}

// Cek kesehatan database dengan simple query
pub async fn check_db_health(pool: &PgPool) -> bool {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}

// Seed super admin pertama saat tabel admins masih kosong
async fn ensure_super_admin(pool: &PgPool) -> Result<(), String> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await
        .map_err(|e| format!("Gagal menghitung admin: {}", e))?;

    if count > 0 {
        return Ok(());
    }

    let password_hash = shared::utils::hash::hash_password("admin123")
        .map_err(|e| format!("Gagal hash password default: {}", e))?;

    sqlx::query(
        r#"
        INSERT INTO admins (username, email, password_hash, role, status)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind("admin")
    .bind("admin@metermind.io")
    .bind(password_hash)
    .bind(shared::models::claims::ROLE_SUPER_ADMIN)
    .bind(1_i32)
    .execute(pool)
    .await
    .map_err(|e| format!("Gagal membuat super admin awal: {}", e))?;

    tracing::warn!("super admin awal dibuat (admin@metermind.io); segera ganti password default");

    Ok(())
}

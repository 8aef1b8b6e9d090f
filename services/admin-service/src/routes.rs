// API Routes untuk Admin Service

use crate::config::AppState;
use crate::handlers::{
    admin_handler, auth_handler, order_handler, payment_handler, stats_handler, user_handler,
};
use crate::middleware::auth::{jwt_auth_middleware, require_super_admin};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// OpenAPI Documentation untuk Admin Service
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handler::login,
        auth_handler::logout,
        auth_handler::get_admin_info,
        auth_handler::update_password,
        admin_handler::list_admins,
        admin_handler::create_admin,
        admin_handler::update_admin,
        admin_handler::delete_admin,
        user_handler::list_users,
        user_handler::update_user_status,
        user_handler::user_detail,
        order_handler::list_orders,
        order_handler::order_detail,
        order_handler::update_order_status,
        payment_handler::list_payments,
        payment_handler::payment_detail,
        payment_handler::create_refund,
        stats_handler::stats_overview,
        stats_handler::stats_daily,
        stats_handler::stats_payment,
    ),
    components(
        schemas(
            crate::domain::admin::Admin,
            crate::domain::admin::AdminOperation,
            crate::domain::admin::LoginRequest,
            crate::domain::admin::UpdatePasswordRequest,
            crate::domain::admin::CreateAdminRequest,
            crate::domain::admin::UpdateAdminRequest,
            crate::domain::user::UserSummary,
            crate::domain::user::UserDetail,
            crate::domain::user::UpdateUserStatusRequest,
            crate::domain::order::Order,
            crate::domain::order::OrderItem,
            crate::domain::order::OrderDetail,
            crate::domain::order::OrderListItem,
            crate::domain::order::UpdateOrderStatusRequest,
            crate::domain::payment::Payment,
            crate::domain::payment::PaymentRefund,
            crate::domain::payment::PaymentCallback,
            crate::domain::payment::PaymentDetail,
            crate::domain::payment::PaymentListItem,
            crate::domain::payment::CreateRefundRequest,
            crate::handlers::stats_handler::StatsOverview,
            crate::handlers::stats_handler::DailyStat,
            crate::handlers::stats_handler::PaymentMethodStat,
        )
    ),
    tags(
        (name = "Auth", description = "Admin authentication"),
        (name = "Admin Management", description = "Kelola akun admin (super admin)"),
        (name = "User Management", description = "Kelola user platform"),
        (name = "Order Management", description = "Kelola order"),
        (name = "Payment Management", description = "Pembayaran, detail cache-aside, dan refund"),
        (name = "Stats", description = "Statistik billing")
    ),
    info(
        title = "MeterMind Admin Service API",
        description = "Admin backend untuk billing platform MeterMind:\n\n- 💳 Payment list/detail dengan read-through cache\n- 💰 Refund workflow transaksional dengan audit log\n- 📦 Order management\n- 👤 User & admin management\n- 📊 Statistik billing",
        version = "1.0.0"
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub struct ApiDoc;

// Security scheme modifier untuk Bearer JWT authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let health = state.health_check().await;

    Json(json!({
        "service": "admin-service",
        "status": health.overall,
        "database": health.database,
    }))
}

// Buat router lengkap dengan JWT authentication dan role gate
pub fn create_routes(state: AppState) -> Router {
    if state.config.is_production() {
        tracing::warn!("Admin Service running in PRODUCTION mode");
    } else {
        tracing::info!("Admin Service running in DEVELOPMENT mode");
    }

    // Setup OpenAPI documentation
    let mut openapi = ApiDoc::openapi();
    SecurityAddon.modify(&mut openapi);

    // Public routes - tanpa JWT authentication
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .with_state(state.clone());

    // Operasi yang butuh role super admin
    let super_admin_routes = Router::new()
        .route("/list", get(admin_handler::list_admins))
        .route("/create", post(admin_handler::create_admin))
        .route(
            "/{id}",
            put(admin_handler::update_admin).delete(admin_handler::delete_admin),
        )
        .route(
            "/payments/{id}/refund",
            post(payment_handler::create_refund),
        )
        .route_layer(axum::middleware::from_fn(require_super_admin));

    let admin_routes = Router::new()
        // User management
        .route("/users", get(user_handler::list_users))
        .route("/users/{id}/status", put(user_handler::update_user_status))
        .route("/users/{id}/detail", get(user_handler::user_detail))
        // Order management
        .route("/orders", get(order_handler::list_orders))
        .route("/orders/{id}", get(order_handler::order_detail))
        .route("/orders/{id}/status", put(order_handler::update_order_status))
        // Payment management
        .route("/payments", get(payment_handler::list_payments))
        .route("/payments/{id}", get(payment_handler::payment_detail))
        // Stats
        .route("/stats/overview", get(stats_handler::stats_overview))
        .route("/stats/daily", get(stats_handler::stats_daily))
        .route("/stats/payment", get(stats_handler::stats_payment))
        .merge(super_admin_routes);

    let authed_auth_routes = Router::new()
        .route("/logout", post(auth_handler::logout))
        .route("/info", get(auth_handler::get_admin_info))
        .route("/password", put(auth_handler::update_password));

    // Protected API routes - dengan JWT authentication
    let protected_routes = Router::new()
        .nest("/admin", admin_routes)
        .nest("/auth", authed_auth_routes)
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
        .with_state(state.clone());

    let api_v1 = Router::new()
        .route("/auth/login", post(auth_handler::login))
        .with_state(state)
        .merge(protected_routes);

    public_routes.nest("/api/v1", api_v1).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(CorsLayer::permissive()),
    )
}

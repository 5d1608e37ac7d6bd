//! Router configuration for the API.
//!
//! Centralized route registration and middleware configuration.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added
/// runs first):
/// 1. Request ID middleware (runs first) - generates/propagates request IDs
/// 2. Logging middleware (runs second) - logs requests with request IDs
///
/// # Routes
/// - `/api/customers` - Customer CRUD operations
/// - `/api/employees` - Employee CRUD and availability operations
/// - `/api/services` - Service catalog CRUD operations
/// - `/api/appointments` - Appointment booking and lifecycle operations
/// - `/api/tally` - Payment ledger and revenue operations
/// - `/health` - Health, readiness and liveness probes
/// - `/swagger-ui` - Interactive API documentation
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/employees", handlers::employees::employee_routes())
        .nest("/services", handlers::services::service_routes())
        .nest("/appointments", handlers::appointments::appointment_routes())
        .nest("/tally", handlers::tally::tally_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // The desktop frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

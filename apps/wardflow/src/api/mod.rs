//! # Wardflow HTTP API Module
//!
//! JSON API behind the dashboard pages, served with axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/overview` - Headline metrics and raw distribution
//! - `GET /api/patient-distribution` - Chart view of the distribution
//! - `GET /api/patients` - Patient listing
//! - `GET|POST /api/flow-mode` - Read or set automatic flow
//! - `POST /api/advance` - Advance eligible patients one stage
//! - `POST /api/move-patient` - Move one patient to a named stage
//! - `GET /api/check-balance` - Auto-balance when flow is automatic
//! - `GET|POST /api/auto-config` - Read or update auto-balance tunables
//! - `GET /api/alerts` - Alert feed
//! - `GET /api/wait-times` - Wait-time analysis
//! - `GET /api/staff`, `GET /api/doctors` - Staff roster
//! - `GET /api/resources` - Resource availability
//! - `POST /api/simulate` - One tick of simulated activity
//! - `POST /api/reset` - Restore the reset snapshot
//!
//! ## Environment
//!
//! - `WARDFLOW_CORS_ORIGINS`: comma-separated allowed origins, or "*" (default: localhost only)
//! - `WARDFLOW_RATE_LIMIT`: requests per second (default: 100, 0 disables)

pub mod handlers;
pub mod middleware;
pub mod types;

pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ApiError, ConfigResponse, FlowModeRequest, FlowModeResponse, FlowResponse, HealthResponse,
    MoveRequest, StatusResponse,
};

use crate::error::AppError;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use wardflow_core::Hospital;

pub const ENV_CORS_ORIGINS: &str = "WARDFLOW_CORS_ORIGINS";

/// Request bodies are a few fields; anything larger is refused.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the one hospital behind one lock.
#[derive(Clone)]
pub struct AppState {
    pub hospital: Arc<RwLock<Hospital>>,
}

impl AppState {
    #[must_use]
    pub fn new(hospital: Hospital) -> Self {
        Self {
            hospital: Arc::new(RwLock::new(hospital)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// CORS policy from `WARDFLOW_CORS_ORIGINS`.
///
/// "*" allows every origin, a comma-separated list allows those origins, and
/// an unset or unusable value falls back to localhost only.
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var(ENV_CORS_ORIGINS).ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: allowing ALL origins ({}=*)", ENV_CORS_ORIGINS);
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => {
                        tracing::info!("CORS: allowing origin {}", origin);
                        Some(value)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: no valid origins in {}, defaulting to localhost only",
                    ENV_CORS_ORIGINS
                );
                build_localhost_cors()
            } else {
                cors_for(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Build the router with every endpoint and middleware.
///
/// Layers, outermost first: tracing, CORS, body limit, rate limiting.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/overview", get(handlers::overview_handler))
        .route(
            "/api/patient-distribution",
            get(handlers::distribution_handler),
        )
        .route("/api/patients", get(handlers::patients_handler))
        .route(
            "/api/flow-mode",
            get(handlers::get_flow_mode_handler).post(handlers::set_flow_mode_handler),
        )
        .route("/api/advance", post(handlers::advance_handler))
        .route("/api/move-patient", post(handlers::move_patient_handler))
        .route("/api/check-balance", get(handlers::check_balance_handler))
        .route(
            "/api/auto-config",
            get(handlers::get_config_handler).post(handlers::update_config_handler),
        )
        .route("/api/alerts", get(handlers::alerts_handler))
        .route("/api/wait-times", get(handlers::wait_times_handler))
        .route("/api/staff", get(handlers::staff_handler))
        .route("/api/doctors", get(handlers::staff_handler))
        .route("/api/resources", get(handlers::resources_handler))
        .route("/api/simulate", post(handlers::simulate_handler))
        .route("/api/reset", post(handlers::reset_handler));

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Serve the dashboard API on `addr` until the process stops.
pub async fn run_server(addr: &str, hospital: Hospital) -> Result<(), AppError> {
    let router = create_router(AppState::new(hospital));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Io(format!("Bind failed on {}: {}", addr, e)))?;

    tracing::info!("Wardflow HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Io(format!("Server error: {}", e)))
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!("Cannot listen for Ctrl+C: {}", e),
    }
}

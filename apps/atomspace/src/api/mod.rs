//! # AtomSpace HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check with store size (also at `/healthcheck`)
//! - `GET /v1/version` - Static service metadata
//! - `POST|GET /api/v1/atoms` - Create / list atoms (`?type=` filter)
//! - `GET|DELETE /api/v1/atoms/{id}` - Get / delete one atom
//! - `GET /api/v1/atoms/{id}/incoming` - Links mentioning an atom
//! - `POST|GET /api/v1/links` - Create / list links
//! - `GET /api/v1/links/{id}` - Get one link
//! - `POST /api/v1/query` - Pattern query
//! - `POST /api/v1/clear` - Remove everything
//! - `GET /api/v1/stats` - Counts by type
//! - `POST /api/v1/infer/{rule}` - Apply a truth-value rule
//! - `GET /api/v1/inference/history`, `POST /api/v1/inference/history/clear`,
//!   `GET /api/v1/inference/stats` - Inference log
//! - `/api/v1/agents...`, `/api/v1/scheduler/...` - Agent scheduler
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `ATOMSPACE_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `ATOMSPACE_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `ATOMSPACE_API_KEY`: If set, requires Bearer token authentication

mod agents;
mod auth;
mod error;
mod handlers;
mod inference;
mod middleware;
mod types;

pub use auth::{API_KEY_ENV, get_api_key_from_env};
pub use error::ApiError;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    AgentListResponse, AgentResponse, AtomListResponse, AtomResponse, ClearResponse,
    CreateAgentRequest, CreateAtomRequest, CreateLinkRequest, DeleteAtomResponse, ErrorResponse,
    HealthResponse, HistoryResponse, InferRequest, InferenceResponse, InferenceStatsResponse,
    LinkListResponse, LinkResponse, MessageResponse, NewAgent, NewAtom, NewLink, QueryRequest,
    QueryResponse, SERVICE_NAME, SchedulerStatusResponse, StatsResponse, TruthValueJson,
    VersionResponse,
};

use crate::config::Config;
use crate::scheduler::Scheduler;
use atomspace_core::{AgentRegistry, AtomSpace, AtomSpaceError, InferenceHistory};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. Each component has its own lock.
#[derive(Clone)]
pub struct AppState {
    /// The hypergraph store.
    pub space: Arc<RwLock<AtomSpace>>,
    /// Log of applied inference rules.
    pub inference: Arc<RwLock<InferenceHistory>>,
    /// Registered agents.
    pub agents: Arc<RwLock<AgentRegistry>>,
    /// Background driver for `agents`.
    pub scheduler: Arc<Scheduler>,
}

impl AppState {
    /// State around an existing store with default settings.
    #[must_use]
    pub fn new(space: AtomSpace) -> Self {
        Self::with_config(space, &Config::default())
    }

    #[must_use]
    pub fn with_config(space: AtomSpace, config: &Config) -> Self {
        let agents = Arc::new(RwLock::new(AgentRegistry::new()));
        let scheduler = Scheduler::new(
            Arc::clone(&agents),
            Duration::from_millis(config.scheduler.interval_ms),
        );
        Self {
            space: Arc::new(RwLock::new(space)),
            inference: Arc::new(RwLock::new(InferenceHistory::with_capacity(
                config.inference.history_capacity,
            ))),
            agents,
            scheduler: Arc::new(scheduler),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `ATOMSPACE_CORS_ORIGINS`.
///
/// - `*`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("ATOMSPACE_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (ATOMSPACE_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in ATOMSPACE_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                cors_for(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No ATOMSPACE_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8100",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8100",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();
    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. Panic catcher - a panicking handler becomes a JSON 500
/// 3. CORS - handles preflight requests
/// 4. Rate Limiting - global quota (if enabled)
/// 5. Authentication - validates API key (if configured)
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

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set ATOMSPACE_API_KEY environment variable to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/healthcheck", get(handlers::health_handler))
        .route("/v1/version", get(handlers::version_handler))
        // Store
        .route(
            "/api/v1/atoms",
            post(handlers::create_atom_handler).get(handlers::list_atoms_handler),
        )
        .route(
            "/api/v1/atoms/{id}",
            get(handlers::get_atom_handler).delete(handlers::delete_atom_handler),
        )
        .route("/api/v1/atoms/{id}/incoming", get(handlers::incoming_handler))
        .route(
            "/api/v1/links",
            post(handlers::create_link_handler).get(handlers::list_links_handler),
        )
        .route("/api/v1/links/{id}", get(handlers::get_link_handler))
        .route("/api/v1/query", post(handlers::query_handler))
        .route("/api/v1/clear", post(handlers::clear_handler))
        .route("/api/v1/stats", get(handlers::stats_handler))
        // Inference
        .route("/api/v1/infer/{rule}", post(inference::infer_handler))
        .route("/api/v1/inference/history", get(inference::history_handler))
        .route(
            "/api/v1/inference/history/clear",
            post(inference::clear_history_handler),
        )
        .route(
            "/api/v1/inference/stats",
            get(inference::inference_stats_handler),
        )
        // Agents
        .route(
            "/api/v1/agents",
            post(agents::create_agent_handler).get(agents::list_agents_handler),
        )
        .route(
            "/api/v1/agents/{name}",
            get(agents::get_agent_handler).delete(agents::delete_agent_handler),
        )
        .route("/api/v1/agents/{name}/start", post(agents::start_agent_handler))
        .route("/api/v1/agents/{name}/stop", post(agents::stop_agent_handler))
        .route(
            "/api/v1/scheduler/start",
            post(agents::start_scheduler_handler),
        )
        .route("/api/v1/scheduler/stop", post(agents::stop_scheduler_handler))
        .route(
            "/api/v1/scheduler/status",
            get(agents::scheduler_status_handler),
        );

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::panic_response))
                .layer(cors),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Run the HTTP server until Ctrl-C, then stop the scheduler.
pub async fn run_server(config: &Config) -> Result<(), AtomSpaceError> {
    let state = AppState::with_config(AtomSpace::new(), config);
    let scheduler = Arc::clone(&state.scheduler);
    if config.scheduler.autostart {
        scheduler.start().await;
    }

    let router = create_router(state);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AtomSpaceError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("AtomSpace HTTP server listening on {}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AtomSpaceError::Io(format!("Server error: {}", e)));

    scheduler.stop().await;
    tracing::info!("AtomSpace HTTP server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

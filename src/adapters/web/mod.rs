//! HTTP adapter: axum router serving the mock market, portfolio, simulation
//! and record endpoints as JSON.

mod error;
mod handlers;

pub use error::WebError;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use chrono::NaiveDate;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::records::{AgentRecord, SimulationRecord};
use crate::ports::record_port::RecordPort;

/// Origins the demo front-end is served from during development.
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:8000"];

/// Source of "today" for date-anchored mock data.
pub type Clock = fn() -> NaiveDate;

pub fn system_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct AppState {
    pub simulations: Arc<dyn RecordPort<SimulationRecord> + Send + Sync>,
    pub agents: Arc<dyn RecordPort<AgentRecord> + Send + Sync>,
    pub today: Clock,
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    build_routes(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Routes without the CORS and tracing layers.
pub fn build_test_router(state: AppState) -> Router {
    build_routes(state)
}

fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/simulation/run", post(handlers::run_simulation))
        .route(
            "/api/simulations",
            get(handlers::list_simulations).post(handlers::create_simulation),
        )
        .route(
            "/api/simulations/{id}",
            get(handlers::get_simulation)
                .put(handlers::update_simulation)
                .delete(handlers::delete_simulation),
        )
        .route("/api/stocks", get(handlers::list_stocks))
        .route("/api/stocks/{symbol}", get(handlers::stock_detail))
        .route("/api/stocks/{symbol}/history", get(handlers::stock_history))
        .route("/api/stocks/{symbol}/insights", get(handlers::stock_insights))
        .route("/api/portfolio", get(handlers::portfolio))
        .route(
            "/api/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/api/agents/{id}",
            get(handlers::get_agent)
                .put(handlers::update_agent)
                .delete(handlers::delete_agent),
        )
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

const ANY_ORIGIN: &str = "*";

/// Default origins plus `extra`, with unparseable entries and the `*`
/// wildcard dropped.
pub fn resolve_origins(extra: &[String]) -> Vec<HeaderValue> {
    let mut origins: Vec<HeaderValue> = Vec::new();
    let candidates = DEFAULT_ORIGINS
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != ANY_ORIGIN);

    for origin in candidates {
        match HeaderValue::from_str(origin) {
            Ok(value) if !origins.contains(&value) => origins.push(value),
            Ok(_) => {}
            Err(_) => tracing::warn!(origin, "ignoring invalid CORS origin"),
        }
    }
    origins
}

/// Whether `extra` contains the `*` wildcard.
pub fn allows_any_origin(extra: &[String]) -> bool {
    extra.iter().any(|o| o.trim() == ANY_ORIGIN)
}

/// Credentialed CORS for the listed origins; methods and headers mirror the
/// preflight request. A `*` entry mirrors any request origin, since a literal
/// wildcard cannot be combined with credentials.
pub fn cors_layer(extra_origins: &[String]) -> CorsLayer {
    let allow_origin = if allows_any_origin(extra_origins) {
        tracing::warn!("CORS wildcard configured: reflecting every request origin");
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(resolve_origins(extra_origins))
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

mod config;
mod sessions;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use pv_api_types::{CatalogResponse, CategorySummary};
use pv_catalog::Catalog;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::sessions::Session;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);
pub(crate) type ApiResult<T> = Result<Json<T>, ApiError>;

pub(crate) struct AppState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) page_size: usize,
    session_ttl: Duration,
    started: Instant,
    // Each visitor session owns one storefront; the write guard spans a whole
    // action so snapshots are never read mid-mutation.
    pub(crate) sessions: RwLock<HashMap<Uuid, Session>>,
}

impl AppState {
    pub(crate) fn new(catalog: Catalog, page_size: usize, session_ttl: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            page_size,
            session_ttl,
            started: Instant::now(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Milliseconds since the service started; the clock sessions are aged by.
    pub(crate) fn now_ms(&self) -> u64 {
        as_millis(self.started.elapsed())
    }

    pub(crate) fn ttl_ms(&self) -> u64 {
        as_millis(self.session_ttl)
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;
    let catalog = config.load_catalog()?;
    let state = Arc::new(AppState::new(catalog, config.page_size, config.session_ttl));

    let app = router(state).layer(CorsLayer::permissive());

    info!("storefront-service listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/catalog", get(catalog))
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{session_id}", axum::routing::delete(sessions::delete_session))
        .route(
            "/sessions/{session_id}/view",
            get(sessions::get_view).post(sessions::select_view),
        )
        .route(
            "/sessions/{session_id}/assets/{asset_id}/toggle",
            post(sessions::toggle_asset),
        )
        .route(
            "/sessions/{session_id}/packs/{category}/toggle",
            post(sessions::toggle_pack),
        )
        .route("/sessions/{session_id}/load-more", post(sessions::load_more))
        .route("/sessions/{session_id}/cart", get(sessions::get_cart))
        .route("/sessions/{session_id}/cart/open", post(sessions::open_cart))
        .route("/sessions/{session_id}/cart/close", post(sessions::close_cart))
        .route("/sessions/{session_id}/cart/clear", post(sessions::clear_cart))
        .route("/sessions/{session_id}/checkout", post(sessions::checkout))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
    }
    info!("shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "storefront-service",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "storefront-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let catalog = &state.catalog;
    let pricing = catalog.pricing();

    Json(CatalogResponse {
        price_per_item: pricing.price_per_item,
        minimum_cart: pricing.minimum_cart,
        asset_count: catalog.len(),
        categories: catalog
            .categories()
            .iter()
            .map(|category| CategorySummary {
                id: category.id.clone(),
                name: category.name.clone(),
                emoji: category.emoji.clone(),
                asset_count: catalog.category_len(&category.id),
            })
            .collect(),
    })
}

pub(crate) fn bad_request(message: &str) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn not_found(message: &str) -> ApiError {
    error_response(StatusCode::NOT_FOUND, message)
}

pub(crate) fn conflict(message: &str) -> ApiError {
    error_response(StatusCode::CONFLICT, message)
}

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}

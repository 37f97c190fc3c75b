//! Waste Monitoring API Server
//!
//! REST API for receiving bin sensor readings and querying bin, alert and
//! statistics state.

use alerting::AlertEngine;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use data_validator::Validator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

pub mod settings;
pub mod error;
mod routes;

pub use settings::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult};

use storage::Repository;

/// Application state shared across handlers
pub struct AppState {
    /// Bin, reading and alert store
    pub repository: Repository,
    /// Alert decision engine
    pub engine: AlertEngine,
    /// Boundary validation for inbound readings
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus renderer, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

/// Handle passed to every route. One lock serializes all store mutation.
pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    /// Create new application state with default settings
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create application state from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            repository: Repository::with_recent_window(config.recent_readings_window),
            engine: AlertEngine::new(config.escalation.clone()),
            validator: Validator::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Root response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<Utc>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub bin_count: usize,
    pub reading_count: usize,
    pub alert_count: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .route("/api/sensor-data", post(routes::sensors::post_sensor_data))
        .route("/api/bins", get(routes::bins::list_bins))
        .route(
            "/api/bins/:bin_id",
            get(routes::bins::get_bin).delete(routes::bins::delete_bin),
        )
        .route("/api/bins/:bin_id/empty", post(routes::bins::empty_bin))
        .route("/api/alerts", get(routes::alerts::get_alerts))
        .route("/api/alerts/summary", get(routes::alerts::get_summary))
        .route("/api/alerts/prioritized", get(routes::alerts::get_prioritized))
        .route("/api/alerts/escalations", get(routes::alerts::get_escalations))
        .route(
            "/api/alerts/:alert_id/resolve",
            post(routes::alerts::resolve_alert),
        )
        .route("/api/statistics", get(routes::statistics::get_statistics))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service banner
async fn root_handler(State(state): State<SharedState>) -> Json<RootResponse> {
    let state = state.read().await;
    Json(RootResponse {
        message: "Medical Waste Monitoring API".to_string(),
        status: "running".to_string(),
        version: state.version.clone(),
        timestamp: Utc::now(),
    })
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let state = state.read().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        bin_count: state.repository.bin_count(),
        reading_count: state.repository.reading_count(),
        alert_count: state.repository.alert_count(),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(config: &AppConfig) -> Result<(), ConfigError> {
    let level = config.level()?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| ConfigError::Invalid {
        field: "log_level",
        reason: e.to_string(),
    })
}

/// Run the server
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;

    let mut state = AppState::from_config(&config);
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!("Metrics exporter disabled: {}", e),
    }
    let app = create_router(state.shared());

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

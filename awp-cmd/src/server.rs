//! HTTP API over the analysis engine.

use crate::cors::setup_cors;
use anyhow::Context;
use awp_core::{
    error::{AnalysisError, RenderError},
    query::Query,
    result::AnalysisResult,
};
use awp_engine::{analyzer::Analyzer, available_parameters};
use awp_export::ExportFormat;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use clap::Args;
use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Version reported by the banner and health endpoints.
pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "AWP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "AWP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origins, comma separated; `*` allows any origin
    #[arg(
        long,
        env = "AWP_CORS_ORIGINS",
        value_delimiter = ',',
        default_values = ["http://localhost:3000", "http://127.0.0.1:3000"]
    )]
    pub cors_origins: Vec<String>,

    /// Simulated processing delay before each analysis, in milliseconds
    #[arg(long, env = "AWP_LATENCY_MS", default_value_t = 0)]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub latency: Duration,
}

/// Failure of an API request, rendered as `{error, detail, timestamp}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body missing, malformed, or failing query validation
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Download filename not representable in a header
    #[error("Invalid download filename: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Request {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Request { status, .. } => *status,
            ApiError::Analysis(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Render(_) | ApiError::Header(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::Request { .. } => "Invalid request",
            ApiError::Analysis(_) => "Analysis failed",
            ApiError::Render(_) | ApiError::Header(_) => "Export failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("Rejected request: {self}");
        }
        let body = json!({
            "error": self.label(),
            "detail": self.to_string(),
            "timestamp": Local::now().to_rfc3339(),
        });
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/analyze", post(analyze))
        .route("/parameters", get(parameters))
        .route("/download/csv", post(download_csv))
        .route("/download/json", post(download_json))
        .route("/health", get(api_health));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(cors)
        .with_state(state)
}

pub async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let state = AppState {
        latency: Duration::from_millis(args.latency_ms),
    };
    let app = router(state, setup_cors(&args.cors_origins));

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?;
    info!("Weather analysis API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "NASA Weather Dashboard API",
        "version": SERVICE_VERSION,
        "docs": "/docs",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "nasa-weather-api"}))
}

async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "weather-analysis",
        "timestamp": Local::now().to_rfc3339(),
        "version": SERVICE_VERSION,
    }))
}

async fn parameters() -> Json<Value> {
    Json(json!({
        "parameters": available_parameters(),
        "timestamp": Local::now().to_rfc3339(),
    }))
}

async fn run_analysis(state: &AppState, query: &Query) -> Result<AnalysisResult, ApiError> {
    if !state.latency.is_zero() {
        tokio::time::sleep(state.latency).await;
    }
    Ok(Analyzer::from_entropy().analyze(query)?)
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Query>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(query) = payload?;
    Ok(Json(run_analysis(&state, &query).await?))
}

async fn download_csv(
    State(state): State<AppState>,
    payload: Result<Json<Query>, JsonRejection>,
) -> Result<Response, ApiError> {
    download(&state, payload?.0, ExportFormat::Csv).await
}

async fn download_json(
    State(state): State<AppState>,
    payload: Result<Json<Query>, JsonRejection>,
) -> Result<Response, ApiError> {
    download(&state, payload?.0, ExportFormat::Json).await
}

async fn download(
    state: &AppState,
    query: Query,
    format: ExportFormat,
) -> Result<Response, ApiError> {
    let result = run_analysis(state, &query).await?;
    let body = format.render(&result, &query.time_range)?;
    let disposition = format!("attachment; filename={}", format.filename(&result));
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(format.content_type())),
        (header::CONTENT_DISPOSITION, HeaderValue::from_bytes(disposition.as_bytes())?),
    ];
    Ok((headers, body).into_response())
}

//! HTTP API for the dashboard, design workflow, health checks and metrics

use crate::render;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hopper_core::{
    AuditLogger, Component, ComponentHealth, ComponentStatus, DesignError, DesignRecord,
    DesignRequest, HealthRegistry, InferenceAdapter, LogOutcome, ModelStore, StructuredLogger,
    SuiteMetrics,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state
pub struct AppState {
    pub adapter: InferenceAdapter,
    pub audit: AuditLogger,
    pub health_registry: HealthRegistry,
    pub metrics: SuiteMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        store: Arc<ModelStore>,
        audit: AuditLogger,
        health_registry: HealthRegistry,
        metrics: SuiteMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            adapter: InferenceAdapter::new(store),
            audit,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Body of a design API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResponse {
    pub record: DesignRecord,
    pub audit: LogOutcome,
}

/// JSON error body for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(err: &DesignError) -> StatusCode {
    match err {
        DesignError::ModelsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DesignError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DesignError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: DesignError) -> Response {
    let status = error_status(&err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Run the full design workflow for one request
async fn run_design(state: &AppState, request: &DesignRequest) -> Result<DesignResponse, DesignError> {
    let start = Instant::now();
    let result = match state.adapter.design(request) {
        Ok(result) => result,
        Err(e) => {
            if matches!(e, DesignError::Inference(_)) {
                state.metrics.inc_inference_errors();
            }
            return Err(e);
        }
    };
    state
        .metrics
        .observe_inference_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_designs_generated();
    state
        .logger
        .log_design(&result.flowability, request.hausner_ratio(), request.shape.as_str());

    let record = DesignRecord::new(request, &result);

    // Best-effort side branch; a failed POST only degrades the audit component
    let audit = state.audit.log(&record).await;
    state.metrics.inc_audit_post(audit.success);
    state.logger.log_audit_outcome(audit.success, &audit.message);
    let audit_health = if audit.success {
        ComponentHealth::healthy()
    } else {
        ComponentHealth::degraded(audit.message.clone())
    };
    state
        .health_registry
        .set(Component::AuditLogger, audit_health)
        .await;

    Ok(DesignResponse { record, audit })
}

/// Dashboard page
async fn dashboard() -> Html<&'static str> {
    Html(render::DASHBOARD_PAGE)
}

/// Compute a design and return the record plus the audit outcome
async fn design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DesignRequest>,
) -> Response {
    match run_design(&state, &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Compute a design and return the CSV specification report
async fn design_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DesignRequest>,
) -> Response {
    let response = match run_design(&state, &request).await {
        Ok(response) => response,
        Err(e) => return error_response(e),
    };

    let csv = match hopper_core::report::to_csv(&response.record) {
        Ok(csv) => csv,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("report generation failed: {e}"),
                }),
            )
                .into_response()
        }
    };

    let file_name = hopper_core::report::file_name(chrono::Utc::now().date_naive());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, hopper_core::report::REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Health check response - returns 200 if healthy or degraded, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/v1/design", post(design))
        .route("/api/v1/design/report", post(design_report))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

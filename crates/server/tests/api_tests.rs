//! Integration tests for the design service endpoints

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hopper_core::{
    AuditLogger, Component, ComponentHealth, ComponentStatus, DesignError, DesignRecord,
    DesignRequest, FeatureRow, HealthRegistry, InferenceAdapter, LogOutcome, ModelStore,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

struct MockClassifier;

impl hopper_core::FlowClassifier for MockClassifier {
    fn classify(&self, _row: &FeatureRow) -> anyhow::Result<String> {
        Ok("Free Flowing".to_string())
    }
}

struct MockRegressors;

impl hopper_core::DesignRegressors for MockRegressors {
    fn predict(&self, _row: &FeatureRow) -> anyhow::Result<BTreeMap<String, f32>> {
        let mut outputs = BTreeMap::new();
        outputs.insert("Half Angle (\u{00b0})".to_string(), 22.5);
        outputs.insert("Outlet Dimension NB".to_string(), 150.0);
        Ok(outputs)
    }
}

struct TestState {
    adapter: InferenceAdapter,
    audit: AuditLogger,
    health_registry: HealthRegistry,
}

#[derive(Serialize)]
struct DesignResponse {
    record: DesignRecord,
    audit: LogOutcome,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn design(
    State(state): State<Arc<TestState>>,
    Json(request): Json<DesignRequest>,
) -> Response {
    match state.adapter.design(&request) {
        Ok(result) => {
            let record = DesignRecord::new(&request, &result);
            let audit = state.audit.log(&record).await;
            (StatusCode::OK, Json(DesignResponse { record, audit })).into_response()
        }
        Err(e) => {
            let status = match e {
                DesignError::ModelsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                DesignError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DesignError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

async fn design_report(
    State(state): State<Arc<TestState>>,
    Json(request): Json<DesignRequest>,
) -> Response {
    let result = match state.adapter.design(&request) {
        Ok(result) => result,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    };
    let record = DesignRecord::new(&request, &result);
    let csv = hopper_core::report::to_csv(&record).unwrap();
    let file_name = hopper_core::report::file_name(chrono::Utc::now().date_naive());

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                hopper_core::report::REPORT_CONTENT_TYPE.to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

async fn healthz(State(state): State<Arc<TestState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;
    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

async fn readyz(State(state): State<Arc<TestState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;
    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(readiness))
}

fn create_test_router(state: Arc<TestState>) -> Router {
    Router::new()
        .route("/api/v1/design", post(design))
        .route("/api/v1/design/report", post(design_report))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(state)
}

async fn setup_test_app(store: ModelStore) -> (Router, Arc<TestState>) {
    let store = Arc::new(store);
    let audit = AuditLogger::new(None).unwrap();
    let health_registry = HealthRegistry::new(store.is_available(), audit.is_configured());

    let state = Arc::new(TestState {
        adapter: InferenceAdapter::new(store),
        audit,
        health_registry,
    });
    let router = create_test_router(state.clone());

    (router, state)
}

fn mock_store() -> ModelStore {
    ModelStore::with_handles(Arc::new(MockClassifier), Arc::new(MockRegressors))
}

fn design_request_body() -> Body {
    Body::from(
        serde_json::json!({
            "bulk_density_kg_m3": 850.0,
            "tapped_density_kg_m3": 1020.0,
            "d50_um": 75.0,
            "shape": "Spherical",
        })
        .to_string(),
    )
}

fn post_design(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/design")
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn test_design_returns_record_with_defaulted_metrics() {
    let (app, _state) = setup_test_app(mock_store()).await;

    let response = app.oneshot(post_design(design_request_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["record"]["flowability"], "Free Flowing");
    assert_eq!(json["record"]["mass_flow_half_angle_deg"], 22.5);
    assert_eq!(json["record"]["mass_flow_outlet_nb"], 150.0);
    // Metrics the mock bundle omitted default to zero
    assert_eq!(json["record"]["funnel_flow_half_angle_deg"], 0.0);
    assert_eq!(json["record"]["funnel_flow_outlet_nb"], 0.0);
}

#[tokio::test]
async fn test_design_reports_offline_audit_without_failing() {
    let (app, _state) = setup_test_app(mock_store()).await;

    let response = app.oneshot(post_design(design_request_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["audit"]["success"], false);
    assert!(json["audit"]["message"]
        .as_str()
        .unwrap()
        .contains("not configured"));
}

#[tokio::test]
async fn test_design_returns_503_when_models_unavailable() {
    let (app, _state) = setup_test_app(ModelStore::unavailable()).await;

    let response = app.oneshot(post_design(design_request_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("disabled"));
}

#[tokio::test]
async fn test_design_rejects_out_of_bounds_input() {
    let (app, _state) = setup_test_app(mock_store()).await;

    let body = Body::from(
        serde_json::json!({
            "bulk_density_kg_m3": 850.0,
            "tapped_density_kg_m3": 500.0,
            "d50_um": 75.0,
            "shape": "Spherical",
        })
        .to_string(),
    );

    let response = app.oneshot(post_design(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_report_route_returns_dated_csv_attachment() {
    let (app, _state) = setup_test_app(mock_store()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/design/report")
        .header("content-type", "application/json")
        .body(design_request_body())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    let expected_name = hopper_core::report::file_name(chrono::Utc::now().date_naive());
    assert_eq!(disposition, format!("attachment; filename=\"{expected_name}\""));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    assert!(csv.starts_with("Parameter,Value"));
    assert!(csv.contains("Predicted Flowability,Free Flowing"));
    assert!(csv.contains("Hausner Ratio,1.200"));
}

#[tokio::test]
async fn test_readyz_returns_503_when_models_unavailable() {
    let (app, _state) = setup_test_app(ModelStore::unavailable()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let readiness: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(readiness["ready"], false);
}

#[tokio::test]
async fn test_readyz_returns_ok_when_models_loaded() {
    let (app, _state) = setup_test_app(mock_store()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_healthz_degraded_audit_still_returns_ok() {
    let (app, state) = setup_test_app(mock_store()).await;

    state
        .health_registry
        .set(
            Component::AuditLogger,
            ComponentHealth::degraded("endpoint unreachable"),
        )
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_healthz_unhealthy_models_return_503() {
    let (app, _state) = setup_test_app(ModelStore::unavailable()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "unhealthy");
    assert!(health["components"]["model_store"].is_object());
}

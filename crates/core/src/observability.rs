//! Observability infrastructure for the design service
//!
//! Provides:
//! - Prometheus metrics (inference latency, design/error counters, audit
//!   outcomes, model info)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    GaugeVec, Histogram, IntCounter, IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<SuiteMetricsInner> = OnceLock::new();

struct SuiteMetricsInner {
    inference_latency_seconds: Histogram,
    designs_generated: IntCounter,
    inference_errors: IntCounter,
    audit_posts: IntCounterVec,
    model_info: GaugeVec,
}

impl SuiteMetricsInner {
    fn new() -> Self {
        Self {
            inference_latency_seconds: register_histogram!(
                "hopper_inference_latency_seconds",
                "Time spent running classifier and regressor inference",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register inference_latency_seconds"),

            designs_generated: register_int_counter!(
                "hopper_designs_generated_total",
                "Total number of design results generated"
            )
            .expect("Failed to register designs_generated"),

            inference_errors: register_int_counter!(
                "hopper_inference_errors_total",
                "Total number of failed inference attempts"
            )
            .expect("Failed to register inference_errors"),

            audit_posts: register_int_counter_vec!(
                "hopper_audit_posts_total",
                "Audit log attempts by outcome",
                &["outcome"]
            )
            .expect("Failed to register audit_posts"),

            model_info: register_gauge_vec!(
                "hopper_model_info",
                "Information about the loaded model artifacts",
                &["artifacts"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Metrics handle for Prometheus exposition
///
/// Lightweight clone-able handle to the global metrics instance.
#[derive(Clone)]
pub struct SuiteMetrics {
    _private: (),
}

impl Default for SuiteMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(SuiteMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &SuiteMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_inference_latency(&self, duration_secs: f64) {
        self.inner().inference_latency_seconds.observe(duration_secs);
    }

    pub fn inc_designs_generated(&self) {
        self.inner().designs_generated.inc();
    }

    pub fn inc_inference_errors(&self) {
        self.inner().inference_errors.inc();
    }

    pub fn inc_audit_post(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.inner().audit_posts.with_label_values(&[outcome]).inc();
    }

    /// Record whether artifacts are loaded or the store is unavailable
    pub fn set_model_availability(&self, available: bool) {
        let label = if available { "loaded" } else { "unavailable" };
        self.inner().model_info.reset();
        self.inner().model_info.with_label_values(&[label]).set(1.0);
    }
}

/// Structured logger for significant service events
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn log_startup(&self, version: &str, models_available: bool) {
        info!(
            event = "service_started",
            service = %self.service,
            version = %version,
            models_available = models_available,
            "Hopper design service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Hopper design service shutting down"
        );
    }

    /// Log a generated design result
    pub fn log_design(&self, flowability: &str, hausner_ratio: f32, shape: &str) {
        info!(
            event = "design_generated",
            service = %self.service,
            flowability = %flowability,
            hausner_ratio = hausner_ratio,
            shape = %shape,
            "Generated hopper design"
        );
    }

    /// Log the outcome of one audit attempt
    pub fn log_audit_outcome(&self, success: bool, message: &str) {
        if success {
            info!(
                event = "audit_logged",
                service = %self.service,
                "Design record logged to audit endpoint"
            );
        } else {
            warn!(
                event = "audit_failed",
                service = %self.service,
                message = %message,
                "Audit logging failed, continuing without it"
            );
        }
    }
}

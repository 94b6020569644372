//! Core library for the hopper design suite
//!
//! This crate provides the building blocks of the design workflow:
//! - Data model for design requests and results
//! - Training-schema contract and feature encoding
//! - Model store for the pre-trained ONNX artifacts
//! - Inference adapter tying classifier and regressors together
//! - Best-effort audit logging and CSV report export
//! - Health checks and observability

pub mod adapter;
pub mod audit;
pub mod health;
pub mod models;
pub mod observability;
pub mod report;
pub mod schema;
pub mod store;

pub use adapter::{DesignError, InferenceAdapter};
pub use audit::{AuditLogger, LogOutcome, AUDIT_TIMEOUT};
pub use health::{
    Component, ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse,
    ReadinessResponse,
};
pub use models::*;
pub use observability::{StructuredLogger, SuiteMetrics};
pub use schema::{FeatureRow, FEATURE_COLUMNS, FLOW_CLASSES, NUM_FEATURES, REGRESSOR_OUTPUTS};
pub use store::{DesignRegressors, FlowClassifier, ModelStore};

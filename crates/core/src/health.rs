//! Health tracking for the design service
//!
//! The service has exactly two tracked components: the model store and the
//! audit logger. An unavailable model store is the one condition that makes
//! the service not ready (computation is disabled until artifacts load); a
//! failing audit logger only degrades it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl ComponentStatus {
    /// True while the component is at least partially operational
    pub fn is_operational(&self) -> bool {
        matches!(self, ComponentStatus::Healthy | ComponentStatus::Degraded)
    }
}

/// Status of one component plus the time it was last updated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    fn now(status: ComponentStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn healthy() -> Self {
        Self::now(ComponentStatus::Healthy, None)
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self::now(ComponentStatus::Degraded, Some(message.into()))
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::now(ComponentStatus::Unhealthy, Some(message.into()))
    }
}

/// The components the service tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    ModelStore,
    AuditLogger,
}

impl Component {
    pub fn name(&self) -> &'static str {
        match self {
            Component::ModelStore => "model_store",
            Component::AuditLogger => "audit_logger",
        }
    }
}

/// Overall health, as served on `/healthz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: HashMap<String, ComponentHealth>,
}

/// Readiness, as served on `/readyz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug)]
struct Components {
    model_store: ComponentHealth,
    audit_logger: ComponentHealth,
}

/// Shared registry of component health
#[derive(Debug, Clone)]
pub struct HealthRegistry {
    inner: Arc<RwLock<Components>>,
}

impl HealthRegistry {
    /// Seed the registry from the startup state of both components
    pub fn new(models_available: bool, audit_configured: bool) -> Self {
        let model_store = if models_available {
            ComponentHealth::healthy()
        } else {
            ComponentHealth::unhealthy("model artifacts failed to load")
        };
        let audit_logger = if audit_configured {
            ComponentHealth::healthy()
        } else {
            ComponentHealth::degraded("audit endpoint not configured; running offline")
        };

        Self {
            inner: Arc::new(RwLock::new(Components {
                model_store,
                audit_logger,
            })),
        }
    }

    pub async fn set(&self, component: Component, health: ComponentHealth) {
        let mut inner = self.inner.write().await;
        match component {
            Component::ModelStore => inner.model_store = health,
            Component::AuditLogger => inner.audit_logger = health,
        }
    }

    pub async fn health(&self) -> HealthResponse {
        let inner = self.inner.read().await;

        let statuses = [inner.model_store.status, inner.audit_logger.status];
        let status = if statuses.contains(&ComponentStatus::Unhealthy) {
            ComponentStatus::Unhealthy
        } else if statuses.contains(&ComponentStatus::Degraded) {
            ComponentStatus::Degraded
        } else {
            ComponentStatus::Healthy
        };

        let components = HashMap::from([
            (
                Component::ModelStore.name().to_string(),
                inner.model_store.clone(),
            ),
            (
                Component::AuditLogger.name().to_string(),
                inner.audit_logger.clone(),
            ),
        ]);

        HealthResponse { status, components }
    }

    /// Ready exactly when the model store can serve predictions. The audit
    /// branch never gates readiness.
    pub async fn readiness(&self) -> ReadinessResponse {
        let inner = self.inner.read().await;

        if inner.model_store.status == ComponentStatus::Unhealthy {
            ReadinessResponse {
                ready: false,
                reason: Some("model artifacts unavailable, computation disabled".to_string()),
            }
        } else {
            ReadinessResponse {
                ready: true,
                reason: None,
            }
        }
    }
}

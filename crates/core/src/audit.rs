//! Best-effort audit logging to an external endpoint
//!
//! Each computed design record is POSTed as JSON to a configured URL with a
//! bounded timeout. Every failure mode is converted into a [`LogOutcome`];
//! the call never propagates an error and never blocks the rest of the
//! workflow. One attempt per request, no retries, no queueing.

use crate::models::DesignRecord;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Bound on the audit POST, connection included
pub const AUDIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one audit attempt, success or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogOutcome {
    pub success: bool,
    pub message: String,
}

impl LogOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: "record logged".to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Fire-and-forget client for the logging endpoint
#[derive(Clone)]
pub struct AuditLogger {
    client: Client,
    endpoint: Option<String>,
}

impl AuditLogger {
    /// Build a logger. `endpoint = None` degrades every attempt to an
    /// offline outcome without touching the network.
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(AUDIT_TIMEOUT)
            .build()
            .context("Failed to create audit HTTP client")?;
        Ok(Self { client, endpoint })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// POST the record. Success is exactly HTTP 200.
    pub async fn log(&self, record: &DesignRecord) -> LogOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            debug!("Audit endpoint not configured, running offline");
            return LogOutcome::failed("audit endpoint not configured; running offline");
        };

        let response = match self.client.post(endpoint).json(record).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Audit POST failed");
                return LogOutcome::failed(format!("audit POST failed: {e}"));
            }
        };

        if response.status() == StatusCode::OK {
            debug!(endpoint = %endpoint, "Audit record logged");
            LogOutcome::ok()
        } else {
            let status = response.status();
            warn!(endpoint = %endpoint, status = %status, "Audit endpoint rejected record");
            LogOutcome::failed(format!("audit endpoint returned {status}"))
        }
    }
}

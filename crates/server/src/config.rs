//! Server configuration

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

/// Server configuration, loaded from `HOPPER_`-prefixed environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct HopperConfig {
    /// HTTP port for the dashboard and API
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path to the serialized flowability classifier
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,

    /// Path to the serialized regressor bundle
    #[serde(default = "default_regressors_path")]
    pub regressors_path: String,

    /// Audit logging endpoint URL; absent means the audit branch runs offline
    #[serde(default)]
    pub audit_url: Option<String>,
}

fn default_api_port() -> u16 {
    8080
}

fn default_classifier_path() -> String {
    "models/model_classifier.onnx".to_string()
}

fn default_regressors_path() -> String {
    "models/model_regressors.onnx".to_string()
}

impl HopperConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("HOPPER"))
            .build()?;

        match config.try_deserialize() {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to parse HOPPER_ environment, falling back to defaults"
                );
                Ok(HopperConfig {
                    api_port: default_api_port(),
                    classifier_path: default_classifier_path(),
                    regressors_path: default_regressors_path(),
                    audit_url: None,
                })
            }
        }
    }
}

//! Inference adapter
//!
//! Assembles a validated design request into the single-row model input,
//! invokes the classifier and the regressor bundle, and normalizes the
//! results into a [`DesignResult`]. Regressor keys are whitespace-trimmed
//! and every expected metric defaults to 0.0 when the bundle omits it.

use crate::models::{DesignRequest, DesignResult};
use crate::schema::{FeatureRow, REGRESSOR_OUTPUTS};
use crate::store::ModelStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the design workflow
#[derive(Debug, Error)]
pub enum DesignError {
    /// Model artifacts missing or corrupt; computation is disabled
    #[error("model artifacts are not loaded; computation is disabled")]
    ModelsUnavailable,

    /// Request violated the form input bounds
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A model invocation failed; no partial result is rendered
    #[error("inference failed: {0}")]
    Inference(#[source] anyhow::Error),
}

/// Runs the classifier and regressors against a design request
pub struct InferenceAdapter {
    store: Arc<ModelStore>,
}

impl InferenceAdapter {
    /// Wrap the process-wide model store
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// Produce a design result for a request.
    ///
    /// Validates the request, then runs both models. Every name in
    /// [`REGRESSOR_OUTPUTS`] is present in the result, 0.0-defaulted.
    pub fn design(&self, request: &DesignRequest) -> Result<DesignResult, DesignError> {
        request.validate().map_err(DesignError::InvalidInput)?;

        let (classifier, regressors) = self
            .store
            .handles()
            .ok_or(DesignError::ModelsUnavailable)?;

        let start = Instant::now();
        let row = FeatureRow::from_request(request);

        let flowability = classifier.classify(&row).map_err(DesignError::Inference)?;
        let raw = regressors.predict(&row).map_err(DesignError::Inference)?;
        let metrics = normalize_metrics(raw);

        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            flowability = %flowability,
            "Inference completed"
        );

        Ok(DesignResult {
            flowability,
            mass_flow_half_angle_deg: metrics[0],
            mass_flow_outlet_nb: metrics[1],
            funnel_flow_half_angle_deg: metrics[2],
            funnel_flow_valley_angle_deg: metrics[3],
            funnel_flow_outlet_nb: metrics[4],
        })
    }
}

/// Trim whitespace off the raw keys, then look up each expected output name
/// with a 0.0 default.
fn normalize_metrics(raw: BTreeMap<String, f32>) -> [f32; REGRESSOR_OUTPUTS.len()] {
    let trimmed: BTreeMap<&str, f32> = raw.iter().map(|(k, v)| (k.trim(), *v)).collect();

    let mut metrics = [0.0f32; REGRESSOR_OUTPUTS.len()];
    for (slot, name) in metrics.iter_mut().zip(REGRESSOR_OUTPUTS) {
        *slot = trimmed.get(name).copied().unwrap_or(0.0);
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticleShape;
    use crate::store::{DesignRegressors, FlowClassifier};
    use anyhow::Result;

    struct MockClassifier {
        label: &'static str,
    }

    impl FlowClassifier for MockClassifier {
        fn classify(&self, _row: &FeatureRow) -> Result<String> {
            Ok(self.label.to_string())
        }
    }

    struct MockRegressors {
        outputs: Vec<(&'static str, f32)>,
    }

    impl DesignRegressors for MockRegressors {
        fn predict(&self, _row: &FeatureRow) -> Result<BTreeMap<String, f32>> {
            Ok(self
                .outputs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect())
        }
    }

    struct FailingClassifier;

    impl FlowClassifier for FailingClassifier {
        fn classify(&self, _row: &FeatureRow) -> Result<String> {
            anyhow::bail!("malformed input")
        }
    }

    fn request() -> DesignRequest {
        DesignRequest {
            bulk_density_kg_m3: 850.0,
            tapped_density_kg_m3: 1020.0,
            d50_um: 75.0,
            shape: ParticleShape::Spherical,
        }
    }

    fn adapter(
        classifier: impl FlowClassifier + 'static,
        regressors: impl DesignRegressors + 'static,
    ) -> InferenceAdapter {
        InferenceAdapter::new(Arc::new(ModelStore::with_handles(
            Arc::new(classifier),
            Arc::new(regressors),
        )))
    }

    #[test]
    fn test_missing_metrics_default_to_zero() {
        let adapter = adapter(
            MockClassifier {
                label: "Free Flowing",
            },
            MockRegressors {
                outputs: vec![("Half Angle (\u{00b0})", 22.5), ("Outlet Dimension NB", 150.0)],
            },
        );

        let result = adapter.design(&request()).unwrap();
        assert_eq!(result.flowability, "Free Flowing");
        assert!((result.mass_flow_half_angle_deg - 22.5).abs() < 1e-6);
        assert!((result.mass_flow_outlet_nb - 150.0).abs() < 1e-6);
        assert_eq!(result.funnel_flow_half_angle_deg, 0.0);
        assert_eq!(result.funnel_flow_valley_angle_deg, 0.0);
        assert_eq!(result.funnel_flow_outlet_nb, 0.0);
    }

    #[test]
    fn test_keys_are_whitespace_trimmed() {
        let adapter = adapter(
            MockClassifier { label: "Cohesive" },
            MockRegressors {
                outputs: vec![
                    ("  Half Angle (\u{00b0})  ", 30.0),
                    (" Valley Angle - External (\u{00b0})", 48.5),
                ],
            },
        );

        let result = adapter.design(&request()).unwrap();
        assert!((result.mass_flow_half_angle_deg - 30.0).abs() < 1e-6);
        assert!((result.funnel_flow_valley_angle_deg - 48.5).abs() < 1e-6);
    }

    #[test]
    fn test_all_metrics_mapped_in_order() {
        let adapter = adapter(
            MockClassifier {
                label: "Easy Flowing",
            },
            MockRegressors {
                outputs: vec![
                    ("Half Angle (\u{00b0})", 20.0),
                    ("Outlet Dimension NB", 150.0),
                    ("Half Angle (\u{00b0}).1", 38.0),
                    ("Valley Angle - External (\u{00b0})", 45.0),
                    ("Outlet Dimension NB.1", 250.0),
                ],
            },
        );

        let result = adapter.design(&request()).unwrap();
        assert!((result.mass_flow_half_angle_deg - 20.0).abs() < 1e-6);
        assert!((result.mass_flow_outlet_nb - 150.0).abs() < 1e-6);
        assert!((result.funnel_flow_half_angle_deg - 38.0).abs() < 1e-6);
        assert!((result.funnel_flow_valley_angle_deg - 45.0).abs() < 1e-6);
        assert!((result.funnel_flow_outlet_nb - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_unavailable_store_is_a_blocking_error() {
        let adapter = InferenceAdapter::new(Arc::new(ModelStore::unavailable()));
        let err = adapter.design(&request()).unwrap_err();
        assert!(matches!(err, DesignError::ModelsUnavailable));
    }

    #[test]
    fn test_invalid_input_rejected_before_inference() {
        let adapter = InferenceAdapter::new(Arc::new(ModelStore::unavailable()));
        let mut bad = request();
        bad.tapped_density_kg_m3 = 500.0;

        // Validation fires before the store is consulted
        let err = adapter.design(&bad).unwrap_err();
        assert!(matches!(err, DesignError::InvalidInput(_)));
    }

    #[test]
    fn test_model_failure_surfaces_as_inference_error() {
        let adapter = adapter(FailingClassifier, MockRegressors { outputs: vec![] });
        let err = adapter.design(&request()).unwrap_err();
        assert!(matches!(err, DesignError::Inference(_)));
    }
}

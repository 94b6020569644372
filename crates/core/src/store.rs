//! Model store for the pre-trained prediction artifacts
//!
//! Loads the flowability classifier and the outlet-geometry regressor bundle
//! from disk once per process lifetime via tract-onnx. A load failure on
//! either artifact leaves the store with no handles at all ("unavailable")
//! rather than failing the process; there is no reload or invalidation.

use crate::schema::{FeatureRow, FLOW_CLASSES, NUM_FEATURES, REGRESSOR_OUTPUTS};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;
use tracing::{info, warn};

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Classifier seam: feature row in, flowability class label out
pub trait FlowClassifier: Send + Sync {
    fn classify(&self, row: &FeatureRow) -> Result<String>;
}

/// Regressor seam: feature row in, metric name to predicted scalar out
pub trait DesignRegressors: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<BTreeMap<String, f32>>;
}

/// Process-wide handles to the loaded artifacts.
///
/// Constructed once at startup and passed by reference (Arc) into the
/// inference adapter. Both handles are present or neither is.
pub struct ModelStore {
    classifier: Option<Arc<dyn FlowClassifier>>,
    regressors: Option<Arc<dyn DesignRegressors>>,
}

impl ModelStore {
    /// Load both artifacts from disk. Any failure yields an unavailable
    /// store; callers observe this through [`ModelStore::handles`].
    pub fn load(classifier_path: &Path, regressors_path: &Path) -> Self {
        match Self::try_load(classifier_path, regressors_path) {
            Ok(store) => {
                info!(
                    classifier = %classifier_path.display(),
                    regressors = %regressors_path.display(),
                    "Model artifacts loaded"
                );
                store
            }
            Err(e) => {
                warn!(
                    classifier = %classifier_path.display(),
                    regressors = %regressors_path.display(),
                    error = %e,
                    "Failed to load model artifacts, computation disabled"
                );
                Self::unavailable()
            }
        }
    }

    fn try_load(classifier_path: &Path, regressors_path: &Path) -> Result<Self> {
        let classifier = OnnxFlowClassifier::from_path(classifier_path)?;
        let regressors = OnnxDesignRegressors::from_path(regressors_path)?;
        Ok(Self::with_handles(Arc::new(classifier), Arc::new(regressors)))
    }

    /// Build a store from already-constructed handles (mocks in tests)
    pub fn with_handles(
        classifier: Arc<dyn FlowClassifier>,
        regressors: Arc<dyn DesignRegressors>,
    ) -> Self {
        Self {
            classifier: Some(classifier),
            regressors: Some(regressors),
        }
    }

    /// A store with no loaded artifacts
    pub fn unavailable() -> Self {
        Self {
            classifier: None,
            regressors: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_some() && self.regressors.is_some()
    }

    /// Both handles, or `None` when the artifacts failed to load
    pub fn handles(&self) -> Option<(Arc<dyn FlowClassifier>, Arc<dyn DesignRegressors>)> {
        match (&self.classifier, &self.regressors) {
            (Some(c), Some(r)) => Some((Arc::clone(c), Arc::clone(r))),
            _ => None,
        }
    }
}

/// Load and optimize an ONNX artifact expecting a `[1, NUM_FEATURES]` input
fn load_plan(path: &Path) -> Result<TractModel> {
    let model = tract_onnx::onnx()
        .model_for_path(path)
        .with_context(|| format!("Failed to parse ONNX model at {}", path.display()))?
        .with_input_fact(0, f32::fact([1, NUM_FEATURES]).into())
        .context("Failed to set input shape")?
        .into_optimized()
        .context("Failed to optimize model")?
        .into_runnable()
        .context("Failed to create runnable model")?;
    Ok(model)
}

/// Convert a feature row to a `[1, N]` tensor input
fn row_to_tensor(row: &FeatureRow) -> Result<Tensor> {
    let tensor = tract_ndarray::Array2::from_shape_vec((1, row.len()), row.values().to_vec())
        .context("Feature row does not fit the input shape")?;
    Ok(tensor.into())
}

/// ONNX-backed flowability classifier. The artifact emits `[1, K]` class
/// scores; the argmax index selects the label from `FLOW_CLASSES`.
pub struct OnnxFlowClassifier {
    plan: TractModel,
}

impl OnnxFlowClassifier {
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self {
            plan: load_plan(path)?,
        })
    }
}

impl FlowClassifier for OnnxFlowClassifier {
    fn classify(&self, row: &FeatureRow) -> Result<String> {
        let input = row_to_tensor(row)?;
        let result = self.plan.run(tvec!(input.into()))?;
        let output = result.first().context("No output from classifier")?;
        let scores = output.to_array_view::<f32>()?;

        let (best, _) = scores
            .iter()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |acc, (i, s)| {
                if *s > acc.1 {
                    (i, *s)
                } else {
                    acc
                }
            });

        FLOW_CLASSES
            .get(best)
            .map(|label| (*label).to_string())
            .with_context(|| format!("Classifier emitted unknown class index {best}"))
    }
}

/// ONNX-backed regressor bundle. The artifact emits `[1, 5]` scalars in
/// `REGRESSOR_OUTPUTS` order; fewer outputs than names leaves the remainder
/// absent from the mapping (the adapter defaults those to zero).
pub struct OnnxDesignRegressors {
    plan: TractModel,
}

impl OnnxDesignRegressors {
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self {
            plan: load_plan(path)?,
        })
    }
}

impl DesignRegressors for OnnxDesignRegressors {
    fn predict(&self, row: &FeatureRow) -> Result<BTreeMap<String, f32>> {
        let input = row_to_tensor(row)?;
        let result = self.plan.run(tvec!(input.into()))?;
        let output = result.first().context("No output from regressors")?;
        let values = output.to_array_view::<f32>()?;

        Ok(REGRESSOR_OUTPUTS
            .iter()
            .zip(values.iter())
            .map(|(name, value)| ((*name).to_string(), *value))
            .collect())
    }
}

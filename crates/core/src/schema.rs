//! Training-schema contract shared with the model pipeline
//!
//! Column names and ordering here must match the schema the artifacts were
//! trained on exactly; a mismatch yields undefined model behavior, not a
//! caught error. Any change on the training side lands here first.

use crate::models::{DesignRequest, ParticleShape};

/// Number of input features expected by both models
pub const NUM_FEATURES: usize = 7;

/// Number of regressor outputs
pub const NUM_REGRESSOR_OUTPUTS: usize = 5;

/// Input feature columns, in training order. Shape is one-hot encoded.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = [
    "Bulk Density - \u{03c1}b (kg/m3)",
    "Hausner Ratio",
    "d50 (\u{00b5}m)",
    "Shape=Spherical",
    "Shape=Angular",
    "Shape=Irregular",
    "Shape=Elongated",
];

/// Regressor output names as emitted by the training pipeline. The `.1`
/// suffixes come from duplicate column names in the training table and are
/// part of the contract.
pub const REGRESSOR_OUTPUTS: [&str; NUM_REGRESSOR_OUTPUTS] = [
    "Half Angle (\u{00b0})",
    "Outlet Dimension NB",
    "Half Angle (\u{00b0}).1",
    "Valley Angle - External (\u{00b0})",
    "Outlet Dimension NB.1",
];

/// Flowability class labels, in classifier output order
pub const FLOW_CLASSES: [&str; 4] = ["Free Flowing", "Easy Flowing", "Cohesive", "Very Cohesive"];

/// A single-row model input in `FEATURE_COLUMNS` order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow(Vec<f32>);

impl FeatureRow {
    /// Encode a design request into the training column order
    pub fn from_request(request: &DesignRequest) -> Self {
        let mut values = vec![
            request.bulk_density_kg_m3,
            request.hausner_ratio(),
            request.d50_um,
        ];
        for shape in ParticleShape::ALL {
            values.push(if request.shape == shape { 1.0 } else { 0.0 });
        }
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignRequest;

    fn request(shape: ParticleShape) -> DesignRequest {
        DesignRequest {
            bulk_density_kg_m3: 850.0,
            tapped_density_kg_m3: 1020.0,
            d50_um: 75.0,
            shape,
        }
    }

    #[test]
    fn test_feature_row_matches_column_count() {
        let row = FeatureRow::from_request(&request(ParticleShape::Spherical));
        assert_eq!(row.len(), FEATURE_COLUMNS.len());
        assert_eq!(row.len(), NUM_FEATURES);
    }

    #[test]
    fn test_feature_row_ordering() {
        let row = FeatureRow::from_request(&request(ParticleShape::Irregular));
        let values = row.values();

        assert!((values[0] - 850.0).abs() < 1e-6);
        assert!((values[1] - 1.2).abs() < 1e-6);
        assert!((values[2] - 75.0).abs() < 1e-6);
        // One-hot: Spherical, Angular, Irregular, Elongated
        assert_eq!(&values[3..], &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_is_exclusive() {
        for shape in ParticleShape::ALL {
            let row = FeatureRow::from_request(&request(shape));
            let ones = row.values()[3..].iter().filter(|v| **v == 1.0).count();
            assert_eq!(ones, 1);
        }
    }

    #[test]
    fn test_regressor_output_count() {
        assert_eq!(REGRESSOR_OUTPUTS.len(), NUM_REGRESSOR_OUTPUTS);
    }
}

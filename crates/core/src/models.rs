//! Core data models for the hopper design workflow

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound for bulk density input (kg/m3)
pub const MIN_BULK_DENSITY: f32 = 200.0;

/// Upper bound for bulk density input (kg/m3)
pub const MAX_BULK_DENSITY: f32 = 3000.0;

/// Lower bound for median particle size input (um)
pub const MIN_D50: f32 = 1.0;

/// Upper bound for median particle size input (um)
pub const MAX_D50: f32 = 5000.0;

/// Particle shape categories the models were trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    Spherical,
    Angular,
    Irregular,
    Elongated,
}

impl ParticleShape {
    /// All shape categories, in training one-hot column order
    pub const ALL: [ParticleShape; 4] = [
        ParticleShape::Spherical,
        ParticleShape::Angular,
        ParticleShape::Irregular,
        ParticleShape::Elongated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleShape::Spherical => "Spherical",
            ParticleShape::Angular => "Angular",
            ParticleShape::Irregular => "Irregular",
            ParticleShape::Elongated => "Elongated",
        }
    }
}

impl fmt::Display for ParticleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticleShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParticleShape::ALL
            .iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown particle shape: {s}"))
    }
}

/// Material-property inputs for one design run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRequest {
    pub bulk_density_kg_m3: f32,
    pub tapped_density_kg_m3: f32,
    pub d50_um: f32,
    pub shape: ParticleShape,
}

impl DesignRequest {
    /// Hausner ratio, the derived flowability indicator
    pub fn hausner_ratio(&self) -> f32 {
        self.tapped_density_kg_m3 / self.bulk_density_kg_m3
    }

    /// Check the request against the input bounds the form enforces.
    ///
    /// Returns a human-readable description of the first violated bound.
    pub fn validate(&self) -> Result<(), String> {
        if !self.bulk_density_kg_m3.is_finite()
            || !(MIN_BULK_DENSITY..=MAX_BULK_DENSITY).contains(&self.bulk_density_kg_m3)
        {
            return Err(format!(
                "bulk density must be between {MIN_BULK_DENSITY} and {MAX_BULK_DENSITY} kg/m3"
            ));
        }
        if !self.tapped_density_kg_m3.is_finite()
            || self.tapped_density_kg_m3 < self.bulk_density_kg_m3
        {
            return Err("tapped density must be at least the bulk density".to_string());
        }
        if !self.d50_um.is_finite() || !(MIN_D50..=MAX_D50).contains(&self.d50_um) {
            return Err(format!(
                "particle size d50 must be between {MIN_D50} and {MAX_D50} um"
            ));
        }
        Ok(())
    }
}

/// Predicted hopper design outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResult {
    pub flowability: String,
    pub mass_flow_half_angle_deg: f32,
    pub mass_flow_outlet_nb: f32,
    pub funnel_flow_half_angle_deg: f32,
    pub funnel_flow_valley_angle_deg: f32,
    pub funnel_flow_outlet_nb: f32,
}

/// Flattened request + result, the shape serialized for audit
/// logging and CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRecord {
    pub timestamp: String,
    pub bulk_density_kg_m3: f32,
    pub tapped_density_kg_m3: f32,
    pub hausner_ratio: f32,
    pub d50_um: f32,
    pub shape: String,
    pub flowability: String,
    pub mass_flow_half_angle_deg: f32,
    pub mass_flow_outlet_nb: f32,
    pub funnel_flow_half_angle_deg: f32,
    pub funnel_flow_valley_angle_deg: f32,
    pub funnel_flow_outlet_nb: f32,
}

impl DesignRecord {
    /// Flatten a request/result pair, stamping the current time
    pub fn new(request: &DesignRequest, result: &DesignResult) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            bulk_density_kg_m3: request.bulk_density_kg_m3,
            tapped_density_kg_m3: request.tapped_density_kg_m3,
            hausner_ratio: request.hausner_ratio(),
            d50_um: request.d50_um,
            shape: request.shape.to_string(),
            flowability: result.flowability.clone(),
            mass_flow_half_angle_deg: result.mass_flow_half_angle_deg,
            mass_flow_outlet_nb: result.mass_flow_outlet_nb,
            funnel_flow_half_angle_deg: result.funnel_flow_half_angle_deg,
            funnel_flow_valley_angle_deg: result.funnel_flow_valley_angle_deg,
            funnel_flow_outlet_nb: result.funnel_flow_outlet_nb,
        }
    }
}

//! CLI command implementations

pub mod design;
pub mod export;
pub mod status;

use crate::client::DesignRequest;
use crate::MaterialArgs;

/// Build the API request body from the shared material arguments
pub fn to_request(material: &MaterialArgs) -> DesignRequest {
    DesignRequest {
        bulk_density_kg_m3: material.bulk_density,
        tapped_density_kg_m3: material.tapped_density,
        d50_um: material.d50,
        shape: material.shape.as_str().to_string(),
    }
}

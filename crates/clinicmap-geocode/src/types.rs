//! Response shapes for the Mapbox places endpoint. Only the fields the
//! resolver reads are modelled.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One ranked candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// `[longitude, latitude]`.
    pub center: [f64; 2],
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub relevance: Option<f64>,
}

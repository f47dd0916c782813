//! Core data model shared by every engine module.
//!
//! Regions carry aggregated biomass potential per criterion; properties are
//! candidate parcels with polygon footprints. Both are loaded once per
//! session through a [`crate::catalog::CatalogProvider`] and treated as
//! immutable snapshots afterwards.

use geo::{MultiPolygon, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;

/// Stable identifier of a candidate parcel within one catalog scope.
pub type PropertyId = String;

/// One named siting criterion and the potential a region holds for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionPotential {
    pub name: String,
    pub potential: f64,
}

impl CriterionPotential {
    pub fn new(name: impl Into<String>, potential: f64) -> Self {
        Self {
            name: name.into(),
            potential,
        }
    }
}

/// An administrative region summarized to a centroid plus its per-criterion
/// potential profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub centroid: Point,
    pub criteria: Vec<CriterionPotential>,
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        centroid: Point,
        criteria: Vec<CriterionPotential>,
    ) -> Self {
        Self {
            name: name.into(),
            centroid,
            criteria,
        }
    }

    /// Sum of potential across all criteria.
    pub fn total_potential(&self) -> f64 {
        self.criteria.iter().map(|c| c.potential).sum()
    }
}

/// A candidate parcel: footprint geometry plus a precomputed suitability
/// score used for viewport prioritization.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub region: String,
    pub geometry: MultiPolygon,
    pub score: f64,
}

impl Property {
    pub fn new(
        id: impl Into<PropertyId>,
        region: impl Into<String>,
        geometry: MultiPolygon,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            region: region.into(),
            geometry,
            score,
        }
    }
}

/// A ranked multi-region cluster produced by hotspot detection.
///
/// `members` lists region names ordered by distance from the center
/// (the center itself first). Ids are assigned 1..N after ranking by
/// `total_potential` descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: u32,
    pub center: String,
    pub members: Vec<String>,
    pub member_count: usize,
    pub total_potential: f64,
    pub avg_potential: f64,
    pub cluster_radius_km: f64,
    pub synergy_score: f64,
    pub dominant_criteria: Vec<String>,
}

/// The set of parcel ids selected for one viewport render pass, together
/// with the viewport that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    pub ids: Vec<PropertyId>,
    pub zoom: u8,
    pub bounds: Rect,
}

impl RenderBatch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Engine tuning knobs. Every field has a default, so partial JSON
/// configuration files only need to name the values they change.
///
/// ```
/// use sitio::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"low_zoom_cap": 500}"#)?;
/// assert_eq!(config.low_zoom_cap, 500);
/// assert_eq!(config.rerender_threshold, 500);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Aggregate potential at which the synergy scale component saturates.
    #[serde(default = "EngineConfig::default_scale_normalization")]
    pub scale_normalization: f64,
    /// Render cap at zoom <= 10.
    #[serde(default = "EngineConfig::default_low_zoom_cap")]
    pub low_zoom_cap: usize,
    /// Render cap at zoom 11..=12.
    #[serde(default = "EngineConfig::default_mid_zoom_cap")]
    pub mid_zoom_cap: usize,
    /// Render cap at zoom 13..=14.
    #[serde(default = "EngineConfig::default_high_zoom_cap")]
    pub high_zoom_cap: usize,
    /// Render cap at zoom >= 15.
    #[serde(default = "EngineConfig::default_max_zoom_cap")]
    pub max_zoom_cap: usize,
    /// Minimum batch size delta that justifies a re-render.
    #[serde(default = "EngineConfig::default_rerender_threshold")]
    pub rerender_threshold: usize,
    /// Great-circle distance formula used for clustering.
    #[serde(default)]
    pub metric: DistanceMetric,
}

impl EngineConfig {
    fn default_scale_normalization() -> f64 {
        10_000_000.0
    }

    fn default_low_zoom_cap() -> usize {
        1000
    }

    fn default_mid_zoom_cap() -> usize {
        2500
    }

    fn default_high_zoom_cap() -> usize {
        5000
    }

    fn default_max_zoom_cap() -> usize {
        8000
    }

    fn default_rerender_threshold() -> usize {
        500
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale_normalization: Self::default_scale_normalization(),
            low_zoom_cap: Self::default_low_zoom_cap(),
            mid_zoom_cap: Self::default_mid_zoom_cap(),
            high_zoom_cap: Self::default_high_zoom_cap(),
            max_zoom_cap: Self::default_max_zoom_cap(),
            rerender_threshold: Self::default_rerender_threshold(),
            metric: DistanceMetric::default(),
        }
    }
}

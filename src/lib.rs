//! Geospatial engine for interactive site-selection maps: hotspot clustering
//! over administrative regions, zoom-adaptive viewport sampling, and spatial
//! click resolution against property polygons.
//!
//! ```rust
//! use geo::Point;
//! use sitio::{ClusterParams, CriterionPotential, EngineConfig, Region, SiteEngine};
//!
//! let regions = vec![
//!     Region::new("CAMPINAS", Point::new(-47.06, -22.90),
//!         vec![CriterionPotential::new("sugarcane", 2_000_000.0)]),
//!     Region::new("PAULINIA", Point::new(-47.15, -22.76),
//!         vec![CriterionPotential::new("sugarcane", 1_500_000.0)]),
//!     Region::new("SUMARE", Point::new(-47.27, -22.82),
//!         vec![CriterionPotential::new("cattle", 1_200_000.0)]),
//! ];
//!
//! let engine = SiteEngine::new(regions, Vec::new(), EngineConfig::default());
//! let hotspots = engine.detect_hotspots(&ClusterParams {
//!     radius_km: 50.0,
//!     min_cluster_size: 3,
//!     min_potential: 1_000_000.0,
//! })?;
//! assert_eq!(hotspots.len(), 1);
//! # Ok::<(), sitio::SitioError>(())
//! ```

pub mod catalog;
pub mod cluster;
pub mod distance;
pub mod engine;
pub mod error;
pub mod index;
pub mod resolver;
pub mod sampler;
pub mod types;
pub mod validation;

pub use error::{Result, SitioError};

pub use engine::SiteEngine;

pub use geo::{MultiPolygon, Point, Polygon, Rect};

pub use catalog::{CatalogProvider, InMemoryCatalog, Scope};
pub use cluster::{ClusterParams, HotspotClusterer};
pub use distance::{DistanceMetric, distance_km};
pub use index::GeometryIndex;
pub use resolver::ClickResolver;
pub use sampler::ViewportSampler;
pub use validation::{bounding_box, validate_bounds, validate_point};

pub use types::{
    CriterionPotential, EngineConfig, Hotspot, Property, PropertyId, Region, RenderBatch,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, SiteEngine, SitioError};

    pub use geo::{Point, Polygon, Rect};

    pub use crate::distance::{DistanceMetric, distance_km};

    pub use crate::{ClusterParams, EngineConfig};

    pub use crate::{CatalogProvider, InMemoryCatalog, Scope};

    pub use crate::{Hotspot, Property, Region, RenderBatch};
}

//! Engine composition root.
//!
//! A [`SiteEngine`] owns one catalog snapshot and the geometry index built
//! over it. Index construction is the only operation whose cost scales with
//! catalog size, so it happens exactly once per snapshot; pan, zoom, and
//! click handling reuse it.
//!
//! Every operation is synchronous and the engine holds no shared mutable
//! state: a multi-session deployment creates one engine per session/catalog
//! scope rather than sharing a singleton.

use geo::{Point, Rect};
use rustc_hash::FxHashMap;

use crate::catalog::{CatalogProvider, Scope};
use crate::cluster::{ClusterParams, HotspotClusterer};
use crate::error::Result;
use crate::index::GeometryIndex;
use crate::resolver::ClickResolver;
use crate::sampler::ViewportSampler;
use crate::types::{EngineConfig, Hotspot, Property, PropertyId, Region, RenderBatch};

/// Geospatial engine for one interactive session.
pub struct SiteEngine {
    regions: Vec<Region>,
    properties: Vec<Property>,
    property_pos: FxHashMap<PropertyId, usize>,
    index: GeometryIndex,
    clusterer: HotspotClusterer,
    sampler: ViewportSampler,
}

impl SiteEngine {
    /// Build an engine over already-materialized catalogs.
    pub fn new(regions: Vec<Region>, properties: Vec<Property>, config: EngineConfig) -> Self {
        let index = GeometryIndex::build(
            properties
                .iter()
                .map(|p| (p.id.clone(), p.geometry.clone())),
        );
        log::info!(
            "Engine ready: {} region(s), {} properties indexed, {} skipped",
            regions.len(),
            index.len(),
            index.skipped()
        );

        let property_pos = properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            regions,
            properties,
            property_pos,
            index,
            clusterer: HotspotClusterer::new(&config),
            sampler: ViewportSampler::new(&config),
        }
    }

    /// Build an engine by loading both catalogs for a scope.
    pub fn from_catalog(
        provider: &dyn CatalogProvider,
        scope: &Scope,
        config: EngineConfig,
    ) -> Result<Self> {
        let regions = provider.load_regions(scope)?;
        let properties = provider.load_properties(scope)?;
        Ok(Self::new(regions, properties, config))
    }

    /// Detect ranked multi-region hotspots. One call per user-triggered
    /// analysis.
    pub fn detect_hotspots(&self, params: &ClusterParams) -> Result<Vec<Hotspot>> {
        self.clusterer.detect_hotspots(&self.regions, params)
    }

    /// Produce a render batch for the current viewport. One call per
    /// pan/zoom event.
    pub fn sample(&self, zoom: u8, bounds: Rect) -> Result<RenderBatch> {
        self.sampler.sample(&self.properties, &self.index, zoom, bounds)
    }

    /// Whether a freshly sampled batch differs enough from the previous one
    /// to be worth re-rendering.
    pub fn needs_rerender(&self, previous: &RenderBatch, candidate: &RenderBatch) -> bool {
        self.sampler.needs_rerender(previous, candidate)
    }

    /// Resolve a pointer click against the rendered batch. One call per
    /// click event.
    pub fn resolve(&self, point: &Point, batch: &RenderBatch) -> Result<Option<PropertyId>> {
        ClickResolver::resolve(point, batch, &self.index)
    }

    /// Full property records for a batch, in batch order, for the rendering
    /// surface.
    pub fn batch_properties(&self, batch: &RenderBatch) -> Vec<&Property> {
        batch
            .ids
            .iter()
            .filter_map(|id| self.property_pos.get(id).map(|&i| &self.properties[i]))
            .collect()
    }

    /// Look up one property by id.
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.property_pos.get(id).map(|&i| &self.properties[i])
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn index(&self) -> &GeometryIndex {
        &self.index
    }
}

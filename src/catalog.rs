//! Catalog collaborator interface.
//!
//! The engine never loads data itself; a [`CatalogProvider`] hands it
//! already-materialized regions and properties for a given scope. Loads are
//! pure reads and the engine never writes back.
//!
//! The surrounding application used to cache loaded catalogs process-wide by
//! scope key; here the catalog is an explicit handle whose lifetime is tied
//! to the calling session, so one session can never observe another's
//! mutations.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SitioError};
use crate::types::{Property, Region};

/// Identifies which pre-scored dataset variant to load, e.g. which analysis
/// radius the offline scoring pipeline was run with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope(String);

impl Scope {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only source of region and property catalogs.
pub trait CatalogProvider {
    /// Load the region catalog for a scope.
    fn load_regions(&self, scope: &Scope) -> Result<Vec<Region>>;

    /// Load the property catalog for a scope.
    fn load_properties(&self, scope: &Scope) -> Result<Vec<Property>>;
}

/// Catalog provider backed by in-memory datasets, keyed by scope.
///
/// Suitable for hosts that materialize data themselves, and for tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    datasets: FxHashMap<Scope, (Vec<Region>, Vec<Property>)>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset under a scope, replacing any previous one.
    pub fn insert(&mut self, scope: Scope, regions: Vec<Region>, properties: Vec<Property>) {
        self.datasets.insert(scope, (regions, properties));
    }

    fn dataset(&self, scope: &Scope) -> Result<&(Vec<Region>, Vec<Property>)> {
        self.datasets.get(scope).ok_or_else(|| {
            SitioError::Catalog(format!("No dataset registered for scope '{}'", scope.as_str()))
        })
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn load_regions(&self, scope: &Scope) -> Result<Vec<Region>> {
        Ok(self.dataset(scope)?.0.clone())
    }

    fn load_properties(&self, scope: &Scope) -> Result<Vec<Property>> {
        Ok(self.dataset(scope)?.1.clone())
    }
}

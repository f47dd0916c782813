//! Click resolution against the currently rendered batch.

use geo::Point;
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::index::GeometryIndex;
use crate::types::{PropertyId, RenderBatch};
use crate::validation::validate_point;

/// Resolves pointer clicks to property ids.
///
/// Containment is restricted to the rendered batch: a click landing on a
/// parcel that the sampler left out of the current render never resolves to
/// that off-screen parcel. `None` means "no property at this location", a
/// first-class result the caller surfaces as such.
pub struct ClickResolver;

impl ClickResolver {
    /// Resolve a click to the containing property's id, if any.
    ///
    /// No tolerance is applied beyond the polygon edge itself; a click
    /// exactly on a boundary resolves to `None`, consistently. When
    /// overlapping parcels both contain the point, the smallest id is
    /// returned (see [`GeometryIndex::contains_point`]).
    ///
    /// # Errors
    ///
    /// Rejects out-of-range or non-finite click coordinates.
    pub fn resolve(
        point: &Point,
        batch: &RenderBatch,
        index: &GeometryIndex,
    ) -> Result<Option<PropertyId>> {
        validate_point(point)?;

        if batch.is_empty() {
            return Ok(None);
        }

        let rendered: FxHashSet<&str> = batch.ids.iter().map(String::as_str).collect();
        Ok(index
            .contains_point_within(point, &rendered)
            .map(str::to_string))
    }
}

//! Spatial index over property geometries using an R-tree with
//! envelope-based pruning.
//!
//! Queries narrow candidates through bounding-box envelopes (O(log n)) before
//! running exact point-in-polygon tests, so a click against tens of thousands
//! of parcels only ray-casts a handful of geometries.
//!
//! The index is built once per catalog snapshot and never mutated
//! incrementally; a changed catalog means a rebuilt index.

use geo::{Area, BoundingRect, Contains, Intersects, MultiPolygon, Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashSet;

use crate::types::PropertyId;

/// An indexed geometry entry: id, exact shape, and its bounding box.
#[derive(Debug, Clone)]
struct IndexedGeometry {
    id: PropertyId,
    geometry: MultiPolygon,
    bbox: Rect,
}

impl RTreeObject for IndexedGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min().x, self.bbox.min().y],
            [self.bbox.max().x, self.bbox.max().y],
        )
    }
}

/// Bounding-box tree over a catalog of property geometries.
///
/// Supports viewport range queries and exact point containment. Degenerate
/// records (non-finite coordinates, zero-area shapes) are excluded at build
/// time and logged, so one malformed parcel out of thousands never takes the
/// index down.
pub struct GeometryIndex {
    tree: RTree<IndexedGeometry>,
    skipped: usize,
}

impl GeometryIndex {
    /// Build the index from (id, geometry) pairs. O(n log n) bulk load.
    ///
    /// Records that fail the geometry sanity check are skipped, not inserted
    /// as unusable entries; the count is available via [`Self::skipped`].
    pub fn build(items: impl IntoIterator<Item = (PropertyId, MultiPolygon)>) -> Self {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (id, geometry) in items {
            match usable_bbox(&id, &geometry) {
                Some(bbox) => entries.push(IndexedGeometry { id, geometry, bbox }),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("Geometry index: excluded {} degenerate record(s)", skipped);
        }

        Self {
            tree: RTree::bulk_load(entries),
            skipped,
        }
    }

    /// Number of indexed geometries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Number of records excluded at build time as degenerate.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Ids of all geometries whose bounding box intersects the query box.
    ///
    /// An empty index yields an empty result without error.
    pub fn query_bounds(&self, bounds: &Rect) -> Vec<&str> {
        let envelope = AABB::from_corners(
            [bounds.min().x, bounds.min().y],
            [bounds.max().x, bounds.max().y],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bbox.intersects(bounds))
            .map(|entry| entry.id.as_str())
            .collect()
    }

    /// Id of one geometry that geometrically contains the point, or `None`.
    ///
    /// Candidates are narrowed via the tree, then tested exactly with
    /// `geo::Contains`. When overlapping parcels both contain the point (a
    /// data-quality condition, not an error) the smallest id wins,
    /// deterministically. Points exactly on a polygon's boundary are not
    /// contained; an on-edge click consistently resolves to `None`.
    pub fn contains_point(&self, point: &Point) -> Option<&str> {
        self.candidates_at(point)
            .filter(|entry| entry.geometry.contains(point))
            .map(|entry| entry.id.as_str())
            .min()
    }

    /// Like [`Self::contains_point`], restricted to an allowed id set.
    ///
    /// Used by click resolution so an off-screen parcel never resolves.
    pub fn contains_point_within(
        &self,
        point: &Point,
        allowed: &FxHashSet<&str>,
    ) -> Option<&str> {
        self.candidates_at(point)
            .filter(|entry| allowed.contains(entry.id.as_str()))
            .filter(|entry| entry.geometry.contains(point))
            .map(|entry| entry.id.as_str())
            .min()
    }

    fn candidates_at(&self, point: &Point) -> impl Iterator<Item = &IndexedGeometry> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.tree.locate_in_envelope_intersecting(&envelope)
    }
}

/// Smallest area (in squared degrees) a shape must enclose to be indexed.
const MIN_USABLE_AREA: f64 = 1e-12;

/// Sanity-check a geometry and return its bounding box if it is usable.
///
/// Rejects shapes with non-finite coordinates, rings too short to close, and
/// zero-area shapes.
fn usable_bbox(id: &str, geometry: &MultiPolygon) -> Option<Rect> {
    let mut coords = geometry
        .iter()
        .flat_map(|polygon| polygon.exterior().coords().chain(
            polygon.interiors().iter().flat_map(|ring| ring.coords()),
        ));

    if !coords.all(|c| c.x.is_finite() && c.y.is_finite()) {
        log::warn!("Skipping geometry '{}': non-finite coordinate", id);
        return None;
    }

    if geometry.iter().any(|polygon| polygon.exterior().0.len() < 4) {
        log::warn!("Skipping geometry '{}': ring with fewer than 4 coordinates", id);
        return None;
    }

    // Shoelace rounding leaves a residue on collinear rings at geographic
    // coordinates, so compare against a tolerance rather than exact zero.
    if geometry.unsigned_area() < MIN_USABLE_AREA {
        log::warn!("Skipping geometry '{}': zero area", id);
        return None;
    }

    let bbox = geometry.bounding_rect();
    if bbox.is_none() {
        log::warn!("Skipping geometry '{}': empty geometry", id);
    }
    bbox
}

//! Great-circle distance calculations leveraging the geo crate.

use geo::{Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Distance metrics for great-circle calculations.
///
/// - **Geodesic**: exact ellipsoidal distance (Karney 2013), the default.
/// - **Haversine**: spherical approximation, faster, accurate to ~0.5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Geodesic distance using Karney (2013), accounts for Earth's ellipsoid.
    #[default]
    Geodesic,
    /// Haversine formula, assumes a spherical Earth.
    Haversine,
}

/// Calculate the distance between two points in kilometres.
///
/// Coordinates are geographic (longitude, latitude).
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use sitio::distance::{distance_km, DistanceMetric};
///
/// let campinas = Point::new(-47.0608, -22.9056);
/// let piracicaba = Point::new(-47.6476, -22.7253);
///
/// let dist = distance_km(&campinas, &piracicaba, DistanceMetric::Geodesic);
/// assert!(dist > 55.0 && dist < 70.0);
/// ```
pub fn distance_km(a: &Point, b: &Point, metric: DistanceMetric) -> f64 {
    let meters = match metric {
        DistanceMetric::Geodesic => Geodesic.distance(*a, *b),
        DistanceMetric::Haversine => Haversine.distance(*a, *b),
    };
    meters / 1000.0
}

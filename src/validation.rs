//! Validation for geographic coordinates and bounding boxes.

use geo::{Point, Rect, coord};

use crate::error::{Result, SitioError};

/// Validates a point has a finite, in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geo::Point;
/// use sitio::validation::validate_point;
///
/// assert!(validate_point(&Point::new(-47.06, -22.90)).is_ok());
/// assert!(validate_point(&Point::new(200.0, -22.90)).is_err());
/// assert!(validate_point(&Point::new(-47.06, 95.0)).is_err());
/// ```
pub fn validate_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(SitioError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(SitioError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(SitioError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(SitioError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Create a validated bounding box from min/max coordinates.
///
/// # Errors
///
/// Returns an error if any coordinate is non-finite or min > max on either
/// axis.
///
/// # Examples
///
/// ```
/// use sitio::validation::bounding_box;
///
/// // Campinas metropolitan area
/// let bbox = bounding_box(-47.3, -23.1, -46.7, -22.6).unwrap();
/// assert!(bounding_box(-46.7, -23.1, -47.3, -22.6).is_err());
/// ```
pub fn bounding_box(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Rect> {
    if ![min_lon, min_lat, max_lon, max_lat].iter().all(|v| v.is_finite()) {
        return Err(SitioError::InvalidInput(
            "Bounding box coordinates must be finite".to_string(),
        ));
    }
    if min_lon > max_lon {
        return Err(SitioError::InvalidInput(format!(
            "min_lon ({}) must be <= max_lon ({})",
            min_lon, max_lon
        )));
    }
    if min_lat > max_lat {
        return Err(SitioError::InvalidInput(format!(
            "min_lat ({}) must be <= max_lat ({})",
            min_lat, max_lat
        )));
    }

    Ok(Rect::new(
        coord! { x: min_lon, y: min_lat },
        coord! { x: max_lon, y: max_lat },
    ))
}

/// Validates an already-constructed bounding box.
pub fn validate_bounds(bounds: &Rect) -> Result<()> {
    bounding_box(
        bounds.min().x,
        bounds.min().y,
        bounds.max().x,
        bounds.max().y,
    )
    .map(|_| ())
}

//! Coordinate type definitions.

use std::fmt;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors that can occur during coordinate validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordError {
    /// Latitude is outside the valid range (-90.0 to 90.0).
    #[error("Invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),
    /// Longitude is outside the valid range (-180.0 to 180.0).
    #[error("Invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),
    /// Latitude or longitude is NaN or infinite.
    #[error("Non-finite coordinate: lat={lat}, lon={lon}")]
    NonFinite { lat: f64, lon: f64 },
}

/// A validated WGS84 position in decimal degrees.
///
/// Construction via [`GeoPoint::new`] guarantees both components are finite
/// and inside the valid lat/lon ranges, so downstream geometry never has to
/// re-check its inputs.
///
/// # Examples
///
/// ```
/// use lapidarium::coord::GeoPoint;
///
/// let rome = GeoPoint::new(41.8919, 12.5113).unwrap();
/// assert_eq!(rome.lat, 41.8919);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a validated position.
    ///
    /// Boundary values (±90 latitude, ±180 longitude) are accepted.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordError::NonFinite { lat, lon });
        }
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

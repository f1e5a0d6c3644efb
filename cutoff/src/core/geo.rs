//! Great-circle distance and nearest-warehouse resolution.

use thiserror::Error;

use crate::core::catalog::Warehouse;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles.
const MILES_PER_KM: f64 = 0.621371;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting NaN/infinite or out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// The candidate set was empty; there is nothing to resolve against.
    #[error("no candidate warehouses")]
    NoCandidates,
    /// A latitude/longitude pair was NaN, infinite, or out of range.
    #[error("invalid coordinate (lat {latitude}, lon {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// Result of [`nearest_warehouse`]: the winning code and the exact distance.
///
/// Miles are left unrounded here; hosts round at the presentation boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    pub code: String,
    pub miles: f64,
}

/// Haversine great-circle distance between two points, in miles.
///
/// Inputs must be validated (see [`Coordinate::new`]); the formula itself
/// is total over finite degrees.
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * central_angle * MILES_PER_KM
}

/// Find the candidate closest to `point`.
///
/// Candidates are scanned in declared order; the first strictly smallest
/// distance wins, so ties resolve to the earlier entry. Pure computation:
/// the only failures are an empty candidate set or malformed coordinates.
pub fn nearest_warehouse(
    point: Coordinate,
    candidates: &[Warehouse],
) -> Result<Nearest, GeoError> {
    if candidates.is_empty() {
        return Err(GeoError::NoCandidates);
    }
    let point = Coordinate::new(point.latitude, point.longitude)?;

    let mut best: Option<Nearest> = None;
    for candidate in candidates {
        let target = Coordinate::new(candidate.latitude, candidate.longitude)?;
        let miles = haversine_miles(point, target);
        match &best {
            Some(current) if current.miles <= miles => {}
            _ => {
                best = Some(Nearest {
                    code: candidate.code.clone(),
                    miles,
                });
            }
        }
    }

    best.ok_or(GeoError::NoCandidates)
}

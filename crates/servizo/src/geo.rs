//! Great-circle distance on a spherical Earth.

use servizo_catalog::Coordinates;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in signed
/// decimal degrees.
///
/// Inputs are not validated. Out-of-range degrees still produce a finite value;
/// the result is NaN only when an input is NaN.
///
/// ```rust
/// use servizo::geo::distance_km;
///
/// let d = distance_km(12.9716, 77.5946, 12.9716, 77.5946);
/// assert_eq!(d, 0.0);
/// ```
#[must_use]
pub fn distance_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding and out-of-range degrees can push `a` just outside [0, 1].
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// [`distance_km`] over [`Coordinates`].
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

//! Great-circle distance on a spherical Earth.

use super::{Coordinate, RadiusClass};
use crate::constants::geo::EARTH_RADIUS_KM;

/// Haversine distance in kilometres between `origin` and `target`.
///
/// Computed in the `0.5 - cos(dlat)/2 + ...` form, which is algebraically
/// the classic `sin²(dlat/2) + cos·cos·sin²(dlon/2)` term.
#[must_use]
pub fn haversine_km(origin: Coordinate, target: Coordinate) -> f64 {
    let rad = std::f64::consts::PI / 180.0;

    let a = 0.5 - ((target.latitude - origin.latitude) * rad).cos() / 2.0
        + (target.latitude * rad).cos()
            * (origin.latitude * rad).cos()
            * (1.0 - ((target.longitude - origin.longitude) * rad).cos())
            / 2.0;

    // Rounding can push `a` a hair outside [0, 1] for coincident or antipodal points.
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Inclusive radius membership: a point exactly `radius` km away matches.
#[must_use]
pub fn within_radius(distance_km: f64, radius: RadiusClass) -> bool {
    distance_km <= radius.km()
}

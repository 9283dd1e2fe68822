//! Equatorial to horizontal conversion for a terrestrial observer
//!
//! Used when an ephemeris reports topocentric RA/Dec but no azimuth and
//! altitude. Refraction is not applied.

use super::{Equatorial, Horizontal};
use crate::constants::TAU;

/// Local hour angle of a right ascension, in radians within `[0, 2π)`.
///
/// # Arguments
///
/// * `gmst` - Greenwich mean sidereal time in radians
/// * `longitude` - Observer's longitude in radians (positive east)
/// * `ra` - Right ascension in radians
pub fn local_hour_angle(gmst: f64, longitude: f64, ra: f64) -> f64 {
    (gmst + longitude - ra).rem_euclid(TAU)
}

/// Convert an equatorial position to azimuth/altitude.
///
/// # Arguments
///
/// * `position` - Topocentric equatorial position
/// * `latitude` - Observer's geodetic latitude in radians
/// * `longitude` - Observer's longitude in radians (positive east)
/// * `gmst` - Greenwich mean sidereal time in radians
pub fn equatorial_to_horizontal(
    position: &Equatorial,
    latitude: f64,
    longitude: f64,
    gmst: f64,
) -> Horizontal {
    let hour_angle = local_hour_angle(gmst, longitude, position.ra);
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_dec, cos_dec) = position.dec.sin_cos();
    let (sin_ha, cos_ha) = hour_angle.sin_cos();

    let sin_alt = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    // Azimuth from north through east
    let y = -cos_dec * sin_ha;
    let x = sin_dec * cos_lat - cos_dec * cos_ha * sin_lat;

    Horizontal::new(y.atan2(x), alt)
}

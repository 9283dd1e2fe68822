//! Sky coordinates used to locate a body and its light source
//!
//! Two spherical systems are needed: equatorial (RA/Dec) for geocentric
//! positions and horizontal (azimuth/altitude) for what a terrestrial
//! observer actually sees.

pub mod horizontal;

use crate::constants::{DEG2RAD, RAD2DEG, TAU};
use serde::{Deserialize, Serialize};

pub use horizontal::{equatorial_to_horizontal, local_hour_angle};

// Equatorial coordinates (RA/Dec)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    pub ra: f64,  // Right ascension in radians
    pub dec: f64, // Declination in radians
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Equatorial {
            ra: ra.rem_euclid(TAU),
            dec,
        }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg * DEG2RAD, dec_deg * DEG2RAD)
    }

    /// Get right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra * RAD2DEG
    }

    /// Get declination in degrees
    pub fn dec_degrees(&self) -> f64 {
        self.dec * RAD2DEG
    }
}

/// Horizontal coordinates as seen by a terrestrial observer.
///
/// Azimuth is measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    pub az: f64,  // Azimuth in radians, [0, 2π)
    pub alt: f64, // Altitude in radians
}

impl Horizontal {
    pub fn new(az: f64, alt: f64) -> Self {
        Horizontal {
            az: az.rem_euclid(TAU),
            alt,
        }
    }

    /// Create a new Horizontal coordinate with values in degrees
    pub fn from_degrees(az_deg: f64, alt_deg: f64) -> Self {
        Self::new(az_deg * DEG2RAD, alt_deg * DEG2RAD)
    }

    pub fn az_degrees(&self) -> f64 {
        self.az * RAD2DEG
    }

    pub fn alt_degrees(&self) -> f64 {
        self.alt * RAD2DEG
    }

    /// Whether the point is above the mathematical horizon
    pub fn is_above_horizon(&self) -> bool {
        self.alt > 0.0
    }
}

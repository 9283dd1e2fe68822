//! Constants module for phase and coordinate calculations

use std::f64::consts::PI;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian date of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days per Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// Sidereal time (IAU 1982 expression, degrees)
/// GMST at J2000.0 in degrees
pub const GMST_AT_J2000_DEG: f64 = 280.460_618_37;
/// Mean sidereal rotation in degrees per day
pub const GMST_DEG_PER_DAY: f64 = 360.985_647_366_29;
/// Quadratic GMST term in degrees per century squared
pub const GMST_T2_DEG: f64 = 0.000_387_933;
/// Divisor of the cubic GMST term
pub const GMST_T3_DIVISOR: f64 = 38_710_000.0;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Silhouette sampling
/// Default number of sampling steps per half of the disk (step = 1 / steps)
pub const DEFAULT_SILHOUETTE_STEPS: usize = 100;
/// Apparent size divisor used to turn arcseconds into display units
pub const ARCSEC_PER_DISPLAY_UNIT: f64 = 1000.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_factors_are_reciprocal() {
        assert!((DEG2RAD * RAD2DEG - 1.0).abs() < 1e-15);
        assert!((TAU - 360.0 * DEG2RAD).abs() < 1e-15);
    }
}

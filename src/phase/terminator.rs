//! Position angle of the terminator
//!
//! The terminator is perpendicular to the great circle joining the body to
//! the Sun, so its tilt follows from the position angle of the Sun as seen
//! from the body's place on the sky.

use crate::ephemeris::{BodyState, CoordinateMode, Ephemeris, Result};
use crate::observer::Observer;
use crate::planetlib::Body;
use log::{debug, warn};
use std::f64::consts::PI;

/// Numerator and denominator of the position-angle relation for `mode`
fn position_angle_terms(mode: CoordinateMode, body: &BodyState, sun: &BodyState) -> (f64, f64) {
    match mode {
        CoordinateMode::Astrometric | CoordinateMode::Apparent => {
            let (b, s) = match mode {
                CoordinateMode::Astrometric => (&body.astrometric, &sun.astrometric),
                _ => (&body.apparent, &sun.apparent),
            };
            let d_ra = s.ra - b.ra;
            let num = s.dec.cos() * d_ra.sin();
            let den = b.dec.cos() * s.dec.sin() - b.dec.sin() * s.dec.cos() * d_ra.cos();
            (num, den)
        }
        CoordinateMode::Topocentric => {
            let (b, s) = (&body.horizontal, &sun.horizontal);
            let d_az = s.az - b.az;
            let num = -s.alt.cos() * d_az.sin();
            let den = b.alt.cos() * s.alt.sin() - b.alt.sin() * s.alt.cos() * d_az.cos();
            (num, den)
        }
    }
}

/// Quadrant-corrected `atan(num / den)`.
///
/// Adds π when `den < 0`, nothing when `num > 0`, 2π otherwise. A zero
/// denominator is passed through as IEEE infinity (or NaN for 0/0).
pub fn quadrant_angle(num: f64, den: f64) -> f64 {
    let angle = (num / den).atan();
    if den < 0.0 {
        angle + PI
    } else if num > 0.0 {
        angle
    } else {
        angle + 2.0 * PI
    }
}

/// Terminator angle `khi` (radians) of `body` lit by `sun`, from already
/// fetched ephemeris states.
///
/// Returns exactly `0.0` when `body` is the Sun itself.
pub fn position_angle(mode: CoordinateMode, body: &BodyState, sun: &BodyState) -> f64 {
    if body.body.is_light_source() {
        return 0.0;
    }

    let (num, den) = position_angle_terms(mode, body, sun);
    if den == 0.0 {
        warn!(
            "Terminator angle of {} is undefined in {} mode (zero denominator, numerator {})",
            body.body, mode, num
        );
    }
    quadrant_angle(num, den)
}

/// Terminator angle `khi` (radians) of `body` as seen by `observer`.
///
/// The Sun's state is fetched from the same ephemeris for the same
/// observer and moment. For the Sun itself the angle is `0.0` and the
/// ephemeris is not queried.
pub fn terminator_angle<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    mode: CoordinateMode,
    body: Body,
) -> Result<f64> {
    if body.is_light_source() {
        return Ok(0.0);
    }
    let target = ephemeris.observe(body, observer)?;
    terminator_angle_of(ephemeris, observer, mode, &target)
}

/// Same as [`terminator_angle`] for a body state the caller already holds;
/// only the Sun is looked up.
pub fn terminator_angle_of<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    mode: CoordinateMode,
    target: &BodyState,
) -> Result<f64> {
    if target.body.is_light_source() {
        return Ok(0.0);
    }

    let sun = ephemeris.observe(Body::Sun, observer)?;
    let khi = position_angle(mode, target, &sun);
    debug!("khi of {} ({} mode): {:.6} rad", target.body, mode, khi);
    Ok(khi)
}

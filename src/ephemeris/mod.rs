//! Ephemeris interface: where a body is and how much of it is lit
//!
//! Positions are produced by an external ephemeris; this crate only
//! consumes them. [`Ephemeris`] is the seam, [`SnapshotEphemeris`] reads
//! positions that such a tool exported for one observer and moment.

pub mod snapshot;

use crate::coordinates::{Equatorial, Horizontal};
use crate::observer::Observer;
use crate::planetlib::Body;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub use snapshot::SnapshotEphemeris;

/// Error type for ephemeris lookups
#[derive(Debug, Error)]
pub enum EphemerisError {
    /// Error when a snapshot file cannot be read
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid snapshot: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("Body not available: {0}")]
    BodyNotFound(Body),

    #[error("No data for {requested}: snapshot is for {available}")]
    TimeMismatch { requested: String, available: String },

    #[error("No data for observer {requested}: snapshot is for {available}")]
    LocationMismatch { requested: String, available: String },

    #[error("Invalid phase for {body}: {value}")]
    InvalidPhase { body: Body, value: f64 },

    #[error("Invalid apparent size for {body}: {value} arcsec")]
    InvalidSize { body: Body, value: f64 },

    #[error("Invalid date in snapshot: {0}")]
    InvalidDate(#[from] crate::time::TimeError),
}

/// Result type for ephemeris operations
pub type Result<T> = std::result::Result<T, EphemerisError>;

/// Which position representation the terminator angle is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateMode {
    /// Astrometric geocentric RA/Dec
    Astrometric,
    /// Apparent geocentric RA/Dec
    Apparent,
    /// Apparent topocentric azimuth/altitude
    #[default]
    Topocentric,
}

impl CoordinateMode {
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateMode::Astrometric => "astrometric",
            CoordinateMode::Apparent => "apparent",
            CoordinateMode::Topocentric => "topocentric",
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "astrometric" | "radec" => Ok(Self::Astrometric),
            "apparent" | "geocentric" => Ok(Self::Apparent),
            "topocentric" | "altaz" | "azalt" => Ok(Self::Topocentric),
            _ => Err(format!("Unknown coordinate mode: {}", s)),
        }
    }
}

/// Everything an ephemeris reports about one body for one observer and time
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub body: Body,
    /// Astrometric geocentric position (J2000)
    pub astrometric: Equatorial,
    /// Apparent geocentric position (of date)
    pub apparent: Equatorial,
    /// Apparent topocentric position (of date)
    pub topocentric: Equatorial,
    /// Apparent topocentric azimuth/altitude
    pub horizontal: Horizontal,
    /// Illuminated percentage of the disk, 0 to 100
    pub phase_percent: f64,
    /// Illuminated fraction, 0 to 1 (Moon only)
    pub moon_phase: Option<f64>,
    /// Apparent diameter in arcseconds
    pub size_arcsec: f64,
}

impl BodyState {
    /// Illuminated fraction `k` of the disk.
    ///
    /// The Moon reports a dedicated fraction; other bodies only a percentage.
    pub fn illuminated_fraction(&self) -> f64 {
        match (self.body, self.moon_phase) {
            (Body::Moon, Some(fraction)) => fraction,
            _ => self.phase_percent / 100.0,
        }
    }
}

/// A source of body positions
pub trait Ephemeris {
    /// Position and phase of `body` as seen by `observer` at `observer.date`
    fn observe(&self, body: Body, observer: &Observer) -> Result<BodyState>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn observe(&self, body: Body, observer: &Observer) -> Result<BodyState> {
        (**self).observe(body, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(body: Body, phase_percent: f64, moon_phase: Option<f64>) -> BodyState {
        let position = Equatorial::new(0.0, 0.0);
        BodyState {
            body,
            astrometric: position,
            apparent: position,
            topocentric: position,
            horizontal: Horizontal::new(0.0, 0.0),
            phase_percent,
            moon_phase,
            size_arcsec: 10.0,
        }
    }

    #[test]
    fn test_moon_uses_dedicated_fraction() {
        let moon = state(Body::Moon, 30.0, Some(0.25));
        assert_eq!(moon.illuminated_fraction(), 0.25);
    }

    #[test]
    fn test_moon_without_fraction_falls_back_to_percentage() {
        let moon = state(Body::Moon, 30.0, None);
        assert_eq!(moon.illuminated_fraction(), 0.3);
    }

    #[test]
    fn test_other_bodies_use_percentage() {
        let venus = state(Body::Venus, 80.0, Some(0.1));
        assert_eq!(venus.illuminated_fraction(), 0.8);
    }

    #[test]
    fn test_coordinate_mode_parsing() {
        assert_eq!(
            "Topocentric".parse::<CoordinateMode>().unwrap(),
            CoordinateMode::Topocentric
        );
        assert_eq!(
            "radec".parse::<CoordinateMode>().unwrap(),
            CoordinateMode::Astrometric
        );
        assert_eq!(
            "apparent".parse::<CoordinateMode>().unwrap(),
            CoordinateMode::Apparent
        );
        assert!("ecliptic".parse::<CoordinateMode>().is_err());
        assert_eq!(CoordinateMode::default().to_string(), "topocentric");
    }
}

//! Ephemeris backed by a JSON snapshot
//!
//! A snapshot holds the positions an external ephemeris produced for a
//! single observer and moment:
//!
//! ```json
//! {
//!   "observer": { "name": "Paris", "latitude_deg": 48.86, "longitude_deg": 2.35,
//!                 "elevation_m": 35.0, "date": "2013-03-16T21:00:00Z" },
//!   "bodies": [
//!     { "body": "Moon",
//!       "astrometric": { "ra_deg": 52.99, "dec_deg": 18.41 },
//!       "apparent":    { "ra_deg": 53.18, "dec_deg": 18.46 },
//!       "topocentric": { "ra_deg": 52.56, "dec_deg": 17.84 },
//!       "horizontal":  { "az_deg": 274.26, "alt_deg": 20.24 },
//!       "phase_percent": 24.29, "moon_phase": 0.2429, "size_arcsec": 1785.08 }
//!   ]
//! }
//! ```
//!
//! `horizontal` is optional. When absent it is derived from the
//! topocentric RA/Dec, the snapshot observer and the sidereal time.

use super::{BodyState, Ephemeris, EphemerisError, Result};
use crate::constants::{DAY_S, TAU};
use crate::coordinates::{equatorial_to_horizontal, Equatorial, Horizontal};
use crate::observer::Observer;
use crate::planetlib::Body;
use crate::time::Time;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Snapshot bundled with the crate: Paris, 2013-03-16 21:00 UTC
const BUNDLED_PARIS_2013: &str = include_str!("data/paris_2013-03-16.json");

/// Largest accepted difference between requested and snapshot time, in seconds
const TIME_TOLERANCE_S: f64 = 1.0;
/// Largest accepted difference between requested and snapshot location, in radians
const LOCATION_TOLERANCE_RAD: f64 = 1e-4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RaDecRecord {
    ra_deg: f64,
    dec_deg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct AzAltRecord {
    az_deg: f64,
    alt_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObserverRecord {
    name: String,
    latitude_deg: f64,
    longitude_deg: f64,
    #[serde(default)]
    elevation_m: f64,
    date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyRecord {
    body: Body,
    astrometric: RaDecRecord,
    apparent: RaDecRecord,
    topocentric: RaDecRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    horizontal: Option<AzAltRecord>,
    phase_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    moon_phase: Option<f64>,
    size_arcsec: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotRecord {
    #[serde(default)]
    source: Option<String>,
    observer: ObserverRecord,
    bodies: Vec<BodyRecord>,
}

impl RaDecRecord {
    fn to_equatorial(self) -> Equatorial {
        Equatorial::from_degrees(self.ra_deg, self.dec_deg)
    }
}

impl AzAltRecord {
    fn to_horizontal(self) -> Horizontal {
        Horizontal::from_degrees(self.az_deg, self.alt_deg)
    }
}

fn check_phase(body: Body, value: f64, max: f64) -> Result<()> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(EphemerisError::InvalidPhase { body, value })
    }
}

/// Ephemeris answering for exactly one observer and moment
#[derive(Debug, Clone)]
pub struct SnapshotEphemeris {
    observer: Observer,
    source: Option<String>,
    states: HashMap<Body, BodyState>,
}

impl SnapshotEphemeris {
    /// Build a snapshot from already-resolved body states
    pub fn new(observer: Observer, states: Vec<BodyState>) -> Self {
        let states = states.into_iter().map(|s| (s.body, s)).collect();
        Self {
            observer,
            source: None,
            states,
        }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: SnapshotRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    /// Load a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EphemerisError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded ephemeris snapshot from {}", path.display());
        Self::from_json_str(&json)
    }

    /// The snapshot shipped with the crate (Paris, 2013/3/16 21:00:00 UTC)
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_PARIS_2013)
    }

    fn from_record(record: SnapshotRecord) -> Result<Self> {
        let obs = &record.observer;
        let observer = Observer::new(
            &obs.name,
            obs.latitude_deg,
            obs.longitude_deg,
            obs.elevation_m,
            Time::parse(&obs.date)?,
        );
        let gmst = observer.gmst();

        let mut states = Vec::with_capacity(record.bodies.len());
        for b in record.bodies {
            check_phase(b.body, b.phase_percent, 100.0)?;
            if let Some(fraction) = b.moon_phase {
                check_phase(b.body, fraction, 1.0)?;
            }
            // Zero is a point-sized disk
            if !(b.size_arcsec.is_finite() && b.size_arcsec >= 0.0) {
                return Err(EphemerisError::InvalidSize {
                    body: b.body,
                    value: b.size_arcsec,
                });
            }

            let topocentric = b.topocentric.to_equatorial();
            let horizontal = match b.horizontal {
                Some(h) => h.to_horizontal(),
                None => {
                    debug!("Deriving az/alt of {} from topocentric RA/Dec", b.body);
                    equatorial_to_horizontal(
                        &topocentric,
                        observer.latitude,
                        observer.longitude,
                        gmst,
                    )
                }
            };

            states.push(BodyState {
                body: b.body,
                astrometric: b.astrometric.to_equatorial(),
                apparent: b.apparent.to_equatorial(),
                topocentric,
                horizontal,
                phase_percent: b.phase_percent,
                moon_phase: b.moon_phase,
                size_arcsec: b.size_arcsec,
            });
        }

        let mut snapshot = Self::new(observer, states);
        snapshot.source = record.source;
        Ok(snapshot)
    }

    /// Observer (place and moment) the snapshot was produced for
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Free-text provenance of the positions, if recorded
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Bodies the snapshot holds positions for
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.states.keys().copied()
    }

    fn check_observer(&self, observer: &Observer) -> Result<()> {
        let dt_s = observer.date.days_since(&self.observer.date).abs() * DAY_S;
        if dt_s > TIME_TOLERANCE_S {
            return Err(EphemerisError::TimeMismatch {
                requested: observer.date.to_string(),
                available: self.observer.date.to_string(),
            });
        }

        let dlat = (observer.latitude - self.observer.latitude).abs();
        // Longitudes wrap at ±180°
        let dlon = (observer.longitude - self.observer.longitude + PI).rem_euclid(TAU) - PI;
        if dlat > LOCATION_TOLERANCE_RAD || dlon.abs() > LOCATION_TOLERANCE_RAD {
            return Err(EphemerisError::LocationMismatch {
                requested: format!(
                    "{} ({:.4}, {:.4})",
                    observer.name,
                    observer.latitude_degrees(),
                    observer.longitude_degrees()
                ),
                available: format!(
                    "{} ({:.4}, {:.4})",
                    self.observer.name,
                    self.observer.latitude_degrees(),
                    self.observer.longitude_degrees()
                ),
            });
        }
        Ok(())
    }
}

impl Ephemeris for SnapshotEphemeris {
    fn observe(&self, body: Body, observer: &Observer) -> Result<BodyState> {
        self.check_observer(observer)?;
        self.states
            .get(&body)
            .cloned()
            .ok_or(EphemerisError::BodyNotFound(body))
    }
}

//! Terrestrial observers: a place on Earth plus the moment of observation

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::time::Time;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Named observing site (latitude and longitude in degrees, east positive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub name: &'static str,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
}

const SITES: [Site; 8] = [
    Site {
        name: "Paris",
        latitude_deg: 48.856_610_1,
        longitude_deg: 2.351_499_2,
        elevation_m: 35.0,
    },
    Site {
        name: "London",
        latitude_deg: 51.500_152_4,
        longitude_deg: -0.126_236_2,
        elevation_m: 11.0,
    },
    Site {
        name: "Berlin",
        latitude_deg: 52.519_171_0,
        longitude_deg: 13.406_091_5,
        elevation_m: 34.0,
    },
    Site {
        name: "Madrid",
        latitude_deg: 40.416_690_9,
        longitude_deg: -3.700_345_8,
        elevation_m: 657.0,
    },
    Site {
        name: "New York",
        latitude_deg: 40.714_269_1,
        longitude_deg: -74.005_972_9,
        elevation_m: 10.0,
    },
    Site {
        name: "Tokyo",
        latitude_deg: 35.670_479_2,
        longitude_deg: 139.740_921_5,
        elevation_m: 40.0,
    },
    Site {
        name: "Sydney",
        latitude_deg: -33.867_138_8,
        longitude_deg: 151.207_108_0,
        elevation_m: 58.0,
    },
    Site {
        name: "Cape Town",
        latitude_deg: -33.924_868_5,
        longitude_deg: 18.424_055_3,
        elevation_m: 25.0,
    },
];

lazy_static! {
    /// Map from lowercase site names to sites
    static ref SITES_BY_NAME: HashMap<String, Site> = {
        let mut m = HashMap::new();
        for site in SITES.iter() {
            m.insert(site.name.to_lowercase(), *site);
        }
        m
    };
}

/// Look up a built-in site by name (case-insensitive)
pub fn site(name: &str) -> Option<Site> {
    SITES_BY_NAME.get(&name.trim().to_lowercase()).copied()
}

/// Names of all built-in sites
pub fn site_names() -> impl Iterator<Item = &'static str> {
    SITES.iter().map(|s| s.name)
}

/// An observer on the Earth's surface at a given time.
///
/// Angles are stored in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub date: Time,
}

impl Observer {
    /// Create an observer from coordinates in degrees and an elevation in metres
    pub fn new(
        name: &str,
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        date: Time,
    ) -> Self {
        Self {
            name: name.to_string(),
            latitude: latitude_deg * DEG2RAD,
            longitude: longitude_deg * DEG2RAD,
            elevation: elevation_m,
            date,
        }
    }

    /// Create an observer at a built-in site
    pub fn at_site(name: &str, date: Time) -> crate::Result<Self> {
        let site = site(name).ok_or_else(|| crate::PhaseError::UnknownCity {
            name: name.to_string(),
            known: site_names().collect::<Vec<_>>().join(", "),
        })?;
        Ok(Self::new(
            site.name,
            site.latitude_deg,
            site.longitude_deg,
            site.elevation_m,
            date,
        ))
    }

    /// Same place, different moment
    pub fn with_date(&self, date: Time) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude * RAD2DEG
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude * RAD2DEG
    }

    /// Greenwich mean sidereal time at the observation date, in radians
    pub fn gmst(&self) -> f64 {
        self.date.gmst()
    }
}

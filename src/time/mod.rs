//! Time module for observation timestamps
//!
//! Observation times are UTC instants. This module parses them from the
//! formats commonly used by ephemeris tools, converts them to Julian dates
//! and provides the Greenwich mean sidereal time needed to turn equatorial
//! coordinates into horizontal ones.

use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, DAY_S, DEG2RAD, GMST_AT_J2000_DEG, GMST_DEG_PER_DAY, GMST_T2_DEG,
    GMST_T3_DIVISOR, J2000, TAU, UNIX_EPOCH_JD,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

lazy_static! {
    /// `YYYY/M/D H:M:S` with any number of digits per field (ephemeris-tool style)
    static ref SLASH_DATE: Regex = Regex::new(
        r"^\s*(-?\d+)[/-](\d+)[/-](\d+)(?:[ T]+(\d+)(?::(\d+)(?::(\d+(?:\.\d*)?))?)?)?\s*Z?\s*$"
    )
    .expect("date pattern is valid");
}

/// Calendar tuple for representing a date and time
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// A UTC instant at which an observation is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    utc: DateTime<Utc>,
}

impl Time {
    /// Create a new time from a UTC datetime
    pub fn new(utc: DateTime<Utc>) -> Self {
        Self { utc }
    }

    /// Get the current time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Build a time from calendar fields, validating each of them
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        if !(0.0..60.0).contains(&second) {
            return Err(TimeError::OutOfRange(format!("second {}", second)));
        }
        let whole = second.floor() as u32;
        let nano = ((second - whole as f64) * 1_000_000_000.0).round() as u32;

        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, whole, nano.min(999_999_999)))
            .ok_or_else(|| {
                TimeError::OutOfRange(format!(
                    "{}/{}/{} {}:{}:{}",
                    year, month, day, hour, minute, second
                ))
            })?;

        Ok(Self::new(DateTime::<Utc>::from_naive_utc_and_offset(
            naive, Utc,
        )))
    }

    /// Parse a date string.
    ///
    /// Accepted forms:
    /// - RFC 3339 (`2013-03-16T21:00:00Z`)
    /// - `YYYY-MM-DD HH:MM:SS`
    /// - `YYYY/M/D H:M:S`, where each field may carry extra leading zeros
    ///   (`2013/3/16 21:000:00`) and the time part may be truncated
    pub fn parse(input: &str) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
            return Ok(Self::new(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(input.trim(), "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::new(DateTime::<Utc>::from_naive_utc_and_offset(
                naive, Utc,
            )));
        }

        let caps = SLASH_DATE
            .captures(input)
            .ok_or_else(|| TimeError::InvalidFormat(input.to_string()))?;

        let field = |idx: usize| -> Result<u32> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse::<u32>()
                    .map_err(|e| TimeError::ParseError(format!("{}: {}", m.as_str(), e))),
                None => Ok(0),
            }
        };

        let year = caps[1]
            .parse::<i32>()
            .map_err(|e| TimeError::ParseError(format!("{}: {}", &caps[1], e)))?;
        let second = match caps.get(6) {
            Some(m) => m
                .as_str()
                .parse::<f64>()
                .map_err(|e| TimeError::ParseError(format!("{}: {}", m.as_str(), e)))?,
            None => 0.0,
        };

        Self::from_calendar(year, field(2)?, field(3)?, field(4)?, field(5)?, second)
    }

    /// Get the UTC datetime
    pub fn utc_datetime(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Get the UTC calendar tuple
    pub fn utc_calendar(&self) -> CalendarTuple {
        CalendarTuple {
            year: self.utc.year(),
            month: self.utc.month(),
            day: self.utc.day(),
            hour: self.utc.hour(),
            minute: self.utc.minute(),
            second: self.utc.second() as f64 + self.utc.nanosecond() as f64 / 1e9,
        }
    }

    /// Julian date of this instant (UTC)
    pub fn jd(&self) -> f64 {
        let millis = self.utc.timestamp_millis() as f64;
        UNIX_EPOCH_JD + millis / (DAY_S * 1000.0)
    }

    /// Julian centuries since J2000.0
    pub fn julian_centuries(&self) -> f64 {
        (self.jd() - J2000) / DAYS_PER_JULIAN_CENTURY
    }

    /// Greenwich mean sidereal time in radians, in `[0, 2π)`.
    ///
    /// UT1 is approximated by UTC; the error (< 0.9 s) is far below what
    /// the phase drawing can resolve.
    pub fn gmst(&self) -> f64 {
        let days = self.jd() - J2000;
        let t = self.julian_centuries();
        let degrees = GMST_AT_J2000_DEG + GMST_DEG_PER_DAY * days + GMST_T2_DEG * t * t
            - t * t * t / GMST_T3_DIVISOR;
        (degrees * DEG2RAD).rem_euclid(TAU)
    }

    /// Difference with another time, in days
    pub fn days_since(&self, other: &Time) -> f64 {
        (self.utc - other.utc).num_milliseconds() as f64 / (DAY_S * 1000.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cal = self.utc_calendar();
        write!(
            f,
            "{}/{}/{} {:02}:{:02}:{:02}",
            cal.year, cal.month, cal.day, cal.hour, cal.minute, cal.second as u32
        )
    }
}

impl FromStr for Time {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        Time::parse(s)
    }
}

// Allow conversion from DateTime<Utc> to Time
impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_julian_date() {
        let date = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let time = Time::new(date);

        // 2000-01-01T12:00:00 is JD 2451545.0
        assert_relative_eq!(time.jd(), J2000, epsilon = 1e-9);
        assert_relative_eq!(time.julian_centuries(), 0.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case("2013/3/16 21:00:00")]
    #[case("2013/3/16 21:000:00")]
    #[case("2013/03/16 21:00")]
    #[case("2013-03-16T21:00:00Z")]
    #[case("2013-03-16 21:00:00")]
    fn test_parse_formats(#[case] input: &str) {
        let time = Time::parse(input).unwrap();
        let expected = Utc.with_ymd_and_hms(2013, 3, 16, 21, 0, 0).unwrap();
        assert_eq!(time.utc_datetime(), expected);
    }

    #[test]
    fn test_parse_date_only() {
        let time: Time = "2013/3/16".parse().unwrap();
        assert_eq!(time.utc_calendar().hour, 0);
        assert_eq!(time.utc_calendar().day, 16);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let time = Time::parse("2013/3/16 21:00:30.5").unwrap();
        assert_relative_eq!(time.utc_calendar().second, 30.5, epsilon = 1e-6);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2013/13/1 00:00:00")]
    #[case("2013/2/30")]
    #[case("2013/3/16 25:00:00")]
    fn test_parse_rejects_invalid(#[case] input: &str) {
        assert!(Time::parse(input).is_err());
    }

    #[test]
    fn test_display_matches_slash_format() {
        let time = Time::parse("2013/3/16 21:000:00").unwrap();
        assert_eq!(time.to_string(), "2013/3/16 21:00:00");
    }

    #[test]
    fn test_gmst_at_j2000() {
        let time = Time::new(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
        assert_relative_eq!(time.gmst(), GMST_AT_J2000_DEG * DEG2RAD, epsilon = 1e-9);
    }

    #[test]
    fn test_gmst_known_value() {
        // Meeus, Astronomical Algorithms, example 12.b: 1987-04-10 19:21:00 UT
        // GMST = 8h 34m 57.0896s = 128.7378734 degrees
        let time = Time::from_calendar(1987, 4, 10, 19, 21, 0.0).unwrap();
        assert_relative_eq!(time.gmst() / DEG2RAD, 128.737_873_4, epsilon = 1e-4);
    }

    #[test]
    fn test_days_since() {
        let time = Time::parse("2013/3/16 21:00:00").unwrap();
        let later = Time::parse("2013/3/17 00:00:00").unwrap();
        assert_relative_eq!(later.days_since(&time), 0.125, epsilon = 1e-12);
        assert_relative_eq!(time.days_since(&later), -0.125, epsilon = 1e-12);
    }
}

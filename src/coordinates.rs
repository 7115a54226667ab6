//! Degrees/minutes/seconds → signed decimal degrees.
//!
//! EXIF stores a coordinate as three unsigned rationals plus a separate
//! hemisphere reference letter. North and East are positive, South and West
//! negate the value:
//!
//! ```text
//! decimal = deg + min / 60 + sec / 3600      (negated for S and W)
//! ```
//!
//! A zero denominator is rejected with [`GpsError::ZeroDenominator`] instead of
//! producing infinity or NaN.

use crate::gps::GpsError;
use crate::value::Rational;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Hemisphere reference of a coordinate (`GPSLatitudeRef` / `GPSLongitudeRef`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn opposite(self) -> Self {
        match self {
            Hemisphere::North => Hemisphere::South,
            Hemisphere::South => Hemisphere::North,
            Hemisphere::East => Hemisphere::West,
            Hemisphere::West => Hemisphere::East,
        }
    }

    /// `-1.0` for S and W, `1.0` for N and E.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

impl FromStr for Hemisphere {
    type Err = GpsError;

    /// Parses an uppercase reference letter. Surrounding whitespace and NUL
    /// padding are ignored; case is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches(|c: char| c == '\0' || c.is_whitespace()) {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            "E" => Ok(Hemisphere::East),
            "W" => Ok(Hemisphere::West),
            other => Err(GpsError::InvalidHemisphere(other.to_string())),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A coordinate as stored in EXIF: degrees, minutes, seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl Dms {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Build from a rational tuple. Needs at least three entries; extras are ignored.
    pub fn from_rationals(field: &'static str, values: &[Rational]) -> Result<Self, GpsError> {
        match values {
            [degrees, minutes, seconds, ..] => Ok(Self::new(*degrees, *minutes, *seconds)),
            _ => Err(GpsError::MalformedField(field)),
        }
    }
}

fn component(name: &'static str, value: Rational) -> Result<f64, GpsError> {
    value
        .to_f64()
        .ok_or(GpsError::ZeroDenominator { component: name })
}

/// Convert a DMS coordinate to signed decimal degrees.
pub fn to_decimal(dms: &Dms, hemisphere: Hemisphere) -> Result<f64, GpsError> {
    let degrees = component("degrees", dms.degrees)?;
    let minutes = component("minutes", dms.minutes)?;
    let seconds = component("seconds", dms.seconds)?;
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(hemisphere.sign() * decimal)
}

/// A decoded GPS position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// `"lat, lon"` with `precision` decimals.
    pub fn format(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = precision
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(6))
    }
}

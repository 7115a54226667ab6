//! GPS extraction from resolved metadata.
//!
//! The `GPSInfo` tag carries a nested map keyed by GPS ids. Four of its fields
//! are needed to place the image on a map:
//!
//! | Field | Content |
//! |---|---|
//! | `GPSLatitude` | `(deg, min, sec)` rationals |
//! | `GPSLatitudeRef` | `N` or `S` |
//! | `GPSLongitude` | `(deg, min, sec)` rationals |
//! | `GPSLongitudeRef` | `E` or `W` |
//!
//! Extraction is all-or-nothing. Missing `GPSInfo`, an empty `GPSInfo`, any of
//! the four fields missing, or a malformed coordinate all end in "no location".
//! A reference field never does: only an exact `S` or `W` negates, and every
//! other reference value leaves the coordinate positive.
//! [`try_extract_gps`] keeps the reason; [`extract_gps`] logs it and returns
//! `None`, which is what the report layer wants.

use crate::coordinates::{Dms, Hemisphere, Location, to_decimal};
use crate::resolve::{ResolvedTagMap, resolve_gps};
use crate::value::{Rational, TagValue};
use thiserror::Error;

/// Name of the top-level tag holding the GPS sub-structure.
pub const GPS_INFO: &str = "GPSInfo";
pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
pub const GPS_LONGITUDE: &str = "GPSLongitude";
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";

/// Why no location could be read. Never fatal to a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpsError {
    #[error("no GPSInfo tag")]
    MissingGpsInfo,
    #[error("GPSInfo is empty")]
    EmptyGpsInfo,
    #[error("GPS field missing: {0}")]
    MissingField(&'static str),
    #[error("GPS field has an unexpected value: {0}")]
    MalformedField(&'static str),
    #[error("invalid hemisphere reference: {0:?}")]
    InvalidHemisphere(String),
    #[error("zero denominator in {component}")]
    ZeroDenominator { component: &'static str },
}

/// Read the location from resolved tags, or explain why there is none.
pub fn try_extract_gps(tags: &ResolvedTagMap) -> Result<Location, GpsError> {
    let value = tags.get(GPS_INFO).ok_or(GpsError::MissingGpsInfo)?;
    let group = value
        .as_group()
        .ok_or(GpsError::MalformedField(GPS_INFO))?;
    if group.is_empty() {
        return Err(GpsError::EmptyGpsInfo);
    }

    let fields = resolve_gps(group);
    let field = |name: &'static str| fields.get(name).ok_or(GpsError::MissingField(name));

    // Presence of all four is checked before any conversion
    let lat = field(GPS_LATITUDE)?;
    let lat_ref = field(GPS_LATITUDE_REF)?;
    let lon = field(GPS_LONGITUDE)?;
    let lon_ref = field(GPS_LONGITUDE_REF)?;

    let latitude = coordinate(
        GPS_LATITUDE,
        lat.as_rationals(),
        hemisphere(lat_ref, Hemisphere::North),
    )?;
    let longitude = coordinate(
        GPS_LONGITUDE,
        lon.as_rationals(),
        hemisphere(lon_ref, Hemisphere::East),
    )?;

    Ok(Location {
        latitude,
        longitude,
    })
}

/// Hemisphere named by a reference field.
///
/// Only a reference reading exactly `S` or `W` negates the coordinate. A
/// letter from the other axis keeps its own sign, and anything unrecognized
/// (lowercase, other text, a non-text value) falls back to `positive`.
fn hemisphere(reference: &TagValue, positive: Hemisphere) -> Hemisphere {
    match reference.as_text().map(str::parse::<Hemisphere>) {
        Some(Ok(hemisphere)) => hemisphere,
        Some(Err(reason)) => {
            tracing::debug!(%reason, "treating reference as {positive}");
            positive
        }
        None => {
            tracing::debug!(%reference, "non-text reference, treating as {positive}");
            positive
        }
    }
}

fn coordinate(
    name: &'static str,
    rationals: Option<&[Rational]>,
    hemisphere: Hemisphere,
) -> Result<f64, GpsError> {
    let rationals = rationals.ok_or(GpsError::MalformedField(name))?;
    let dms = Dms::from_rationals(name, rationals)?;
    to_decimal(&dms, hemisphere)
}

/// Read the location from resolved tags. `None` for every failure mode.
pub fn extract_gps(tags: &ResolvedTagMap) -> Option<Location> {
    match try_extract_gps(tags) {
        Ok(location) => {
            tracing::debug!(%location, "GPS location decoded");
            Some(location)
        }
        Err(reason) => {
            tracing::debug!(%reason, "no GPS location");
            None
        }
    }
}

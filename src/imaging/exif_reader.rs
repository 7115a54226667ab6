//! EXIF container → [`RawTagMap`] via kamadak-exif.
//!
//! kamadak-exif hands back a flat list of fields, each tagged with the IFD it
//! came from. This module rebuilds the shape the resolver expects:
//!
//! - TIFF (IFD0) and Exif sub-IFD fields of the primary image become top-level
//!   entries keyed by tag number, in the order the decoder yields them.
//! - GPS sub-IFD fields are collected into a nested map stored under `GPSInfo`
//!   (0x8825), taking the place of the GPS pointer. A GPS IFD without entries
//!   is an empty map.
//! - The Exif and Interoperability pointers stay as plain offset rows
//!   (`ExifOffset`, `ExifInteroperabilityOffset`).
//! - Interoperability IFD fields and thumbnail (IFD1) fields are skipped.

use crate::value::{RawTagMap, Rational, TagValue};
use crate::vocabulary::GPS_INFO_TAG;
use exif::{Context, In, Value};
use std::io::Cursor;

/// Decode EXIF from an in-memory image (JPEG, PNG, TIFF, WebP, HEIF).
///
/// Returns `None` when the container has no EXIF block, when the block cannot
/// be decoded, or when it decodes to zero usable fields.
pub fn read_raw_tags(bytes: &[u8]) -> Option<RawTagMap> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(container)) => {
            tracing::debug!(container, "no EXIF block");
            return None;
        }
        Err(err) => {
            tracing::warn!(error = %err, "EXIF block present but unreadable");
            return None;
        }
    };

    let raw = collect_fields(exif.fields());
    if raw.is_empty() { None } else { Some(raw) }
}

/// Build the raw map from decoder fields.
pub(crate) fn collect_fields<'a>(fields: impl Iterator<Item = &'a exif::Field>) -> RawTagMap {
    let mut raw = RawTagMap::new();

    for field in fields {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let id = field.tag.number();
        let Some(value) = convert_value(&field.value) else {
            tracing::trace!(tag = %field.tag, "skipping field with unknown type");
            continue;
        };

        let context = field.tag.context();
        if context == Context::Gps {
            if let Some(TagValue::Group(gps)) = gps_group(&mut raw) {
                gps.insert(id, value);
            }
        } else if context == Context::Tiff && id == GPS_INFO_TAG {
            // The pointer itself becomes the group, so an empty GPS IFD still shows up
            gps_group(&mut raw);
        } else if context == Context::Tiff || context == Context::Exif {
            raw.insert(id, value);
        }
    }

    raw
}

/// The nested `GPSInfo` map, created at the current position on first use.
fn gps_group(raw: &mut RawTagMap) -> Option<&mut TagValue> {
    if !matches!(raw.get(GPS_INFO_TAG), Some(TagValue::Group(_))) {
        raw.insert(GPS_INFO_TAG, TagValue::Group(RawTagMap::new()));
    }
    raw.get_mut(GPS_INFO_TAG)
}

/// Map a decoder value onto [`TagValue`]. `None` for types the decoder could not identify.
fn convert_value(value: &Value) -> Option<TagValue> {
    let converted = match value {
        Value::Byte(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::Short(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::Long(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::SByte(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::SShort(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::SLong(v) => TagValue::Integer(v.iter().map(|&n| i64::from(n)).collect()),
        Value::Ascii(lines) => TagValue::Text(
            lines
                .iter()
                .map(|line| String::from_utf8_lossy(line).trim_end_matches('\0').to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Rational(v) => TagValue::Rational(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(v) => TagValue::Rational(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::Float(v) => TagValue::Float(v.iter().map(|&n| f64::from(n)).collect()),
        Value::Double(v) => TagValue::Float(v.clone()),
        _ => return None,
    };
    Some(converted)
}

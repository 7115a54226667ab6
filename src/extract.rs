//! Metadata extraction: decoded image → report.
//!
//! This is the single entry point tying the pieces together:
//!
//! ```text
//! DecodedImage ─► resolve (EXIF vocabulary) ─► table rows
//!                        │
//!                        └► extract_gps (GPS vocabulary + DMS conversion) ─► location
//! ```
//!
//! Every "nothing to show" case is an [`Outcome`] or a [`Notice`], never an
//! error: the only failures of a run are reading the file and writing the
//! export, both handled by the callers.

use crate::coordinates::Location;
use crate::export::{self, TagRow};
use crate::gps::extract_gps;
use crate::imaging::{self, DecodedImage, Dimensions, ImagingError};
use crate::resolve::{ResolvedTagMap, resolve};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Result of extracting metadata from one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The image has no decodable tag structure. No table, no map, no export.
    NoMetadata,
    Metadata {
        tags: ResolvedTagMap,
        /// `None` when GPS data is absent or incomplete.
        location: Option<Location>,
    },
}

/// User-facing informational notices. None of them is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoMetadata,
    NoGpsData,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoMetadata => f.write_str("No EXIF metadata found in this image."),
            Notice::NoGpsData => f.write_str("No GPS location data found in this image."),
        }
    }
}

/// Everything known about one image.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataReport {
    pub name: String,
    pub format: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub outcome: Outcome,
}

impl MetadataReport {
    pub fn tags(&self) -> Option<&ResolvedTagMap> {
        match &self.outcome {
            Outcome::Metadata { tags, .. } => Some(tags),
            Outcome::NoMetadata => None,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match &self.outcome {
            Outcome::Metadata { location, .. } => *location,
            Outcome::NoMetadata => None,
        }
    }

    /// Whether a CSV export should be offered.
    pub fn has_export(&self) -> bool {
        self.tags().is_some()
    }

    pub fn notices(&self) -> Vec<Notice> {
        match &self.outcome {
            Outcome::NoMetadata => vec![Notice::NoMetadata],
            Outcome::Metadata { location: None, .. } => vec![Notice::NoGpsData],
            Outcome::Metadata { .. } => Vec::new(),
        }
    }

    /// Serializable view for `--json` output.
    pub fn to_json_view(&self) -> ReportJson {
        ReportJson {
            file: self.name.clone(),
            format: self.format.clone(),
            dimensions: self.dimensions,
            has_metadata: self.tags().is_some(),
            tags: self.tags().map(export::rows).unwrap_or_default(),
            location: self.location(),
            notices: self.notices().iter().map(ToString::to_string).collect(),
        }
    }
}

/// JSON shape of a [`MetadataReport`].
#[derive(Debug, Serialize)]
pub struct ReportJson {
    pub file: String,
    pub format: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub has_metadata: bool,
    pub tags: Vec<TagRow>,
    pub location: Option<Location>,
    pub notices: Vec<String>,
}

/// Build the report for an already decoded image.
pub fn extract(image: &DecodedImage) -> MetadataReport {
    let outcome = match &image.raw_tags {
        None => Outcome::NoMetadata,
        Some(raw) if raw.is_empty() => Outcome::NoMetadata,
        Some(raw) => {
            let tags = resolve(raw);
            tracing::debug!(
                raw = raw.len(),
                resolved = tags.len(),
                "resolved metadata tags"
            );
            let location = extract_gps(&tags);
            Outcome::Metadata { tags, location }
        }
    };

    MetadataReport {
        name: image.name.clone(),
        format: image.info.format.clone(),
        dimensions: image.info.dimensions,
        outcome,
    }
}

/// Open an image file and build its report.
pub fn extract_file(path: &Path, accepted: &[String]) -> Result<MetadataReport, ImagingError> {
    let image = imaging::open_image(path, accepted)?;
    Ok(extract(&image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::decode_bytes;
    use crate::test_helpers::*;
    use crate::value::{RawTagMap, TagValue};
    use exif::Tag;

    #[test]
    fn no_metadata_when_png_has_no_exif() {
        let report = extract(&decode_bytes("blank.png", &plain_png()));
        assert_eq!(report.outcome, Outcome::NoMetadata);
        assert_eq!(report.tags(), None);
        assert_eq!(report.location(), None);
        assert!(!report.has_export());
        assert_eq!(report.notices(), vec![Notice::NoMetadata]);
    }

    #[test]
    fn empty_raw_map_is_no_metadata() {
        let image = DecodedImage {
            name: "x.jpg".into(),
            info: Default::default(),
            raw_tags: Some(RawTagMap::new()),
        };
        assert_eq!(extract(&image).outcome, Outcome::NoMetadata);
    }

    #[test]
    fn metadata_without_gps() {
        let tiff = tiff_with_fields(&[
            ascii_field(Tag::Make, "Canon"),
            ascii_field(Tag::Model, "EOS R5"),
        ]);
        let report = extract(&decode_bytes("canon.jpg", &jpeg_with_exif(&tiff)));

        let tags = report.tags().unwrap();
        assert_eq!(tags.get("Make"), Some(&TagValue::Text("Canon".into())));
        assert_eq!(report.location(), None);
        assert!(report.has_export());
        assert_eq!(report.notices(), vec![Notice::NoGpsData]);
    }

    #[test]
    fn metadata_with_gps() {
        let mut fields = vec![ascii_field(Tag::Make, "Apple")];
        fields.extend(pittsburgh_gps_fields());
        let report = extract(&decode_bytes(
            "pgh.jpg",
            &jpeg_with_exif(&tiff_with_fields(&fields)),
        ));

        let location = report.location().unwrap();
        assert_eq!(location.to_string(), "40.446111, -79.982222");
        assert!(report.notices().is_empty());
        assert!(report.tags().unwrap().get("GPSInfo").is_some());
    }

    #[test]
    fn incomplete_gps_still_has_table() {
        let fields = vec![
            ascii_field(Tag::Make, "Apple"),
            ascii_field(Tag::GPSLatitudeRef, "N"),
            rational_field(Tag::GPSLatitude, &[(40, 1), (26, 1), (46, 1)]),
        ];
        let report = extract(&decode_bytes(
            "partial.jpg",
            &jpeg_with_exif(&tiff_with_fields(&fields)),
        ));
        assert!(report.tags().is_some());
        assert_eq!(report.location(), None);
        assert_eq!(report.notices(), vec![Notice::NoGpsData]);
    }

    #[test]
    fn json_view_lists_rows_and_notices() {
        let report = extract(&decode_bytes("blank.png", &plain_png()));
        let json = serde_json::to_value(report.to_json_view()).unwrap();
        assert_eq!(json["has_metadata"], false);
        assert_eq!(json["tags"].as_array().unwrap().len(), 0);
        assert_eq!(json["notices"][0], "No EXIF metadata found in this image.");
        assert_eq!(json["format"], "PNG");
    }

    #[test]
    fn notice_wording() {
        assert_eq!(
            Notice::NoGpsData.to_string(),
            "No GPS location data found in this image."
        );
    }
}

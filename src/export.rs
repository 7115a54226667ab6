//! CSV export of the metadata table.
//!
//! One header row `Tag,Value`, then one row per resolved tag in resolver
//! order. Values are written in their display form (see
//! [`TagValue`](crate::value::TagValue)'s `Display`), UTF-8 encoded, quoted by
//! the `csv` crate only where needed.
//!
//! ```text
//! Tag,Value
//! Make,Apple
//! Model,iPhone 15 Pro
//! GPSInfo,"{1: N, 2: (40/1, 26/1, 46/1), 3: W, 4: (79/1, 58/1, 56/1)}"
//! ```

use crate::resolve::ResolvedTagMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// File name offered for the exported table.
pub const DEFAULT_FILE_NAME: &str = "exif_metadata.csv";

/// Media type of the exported table.
pub const MEDIA_TYPE: &str = "text/csv";

const HEADER: [&str; 2] = ["Tag", "Value"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRow {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Stringify resolved tags into table rows, preserving order.
pub fn rows(tags: &ResolvedTagMap) -> Vec<TagRow> {
    tags.iter()
        .map(|(name, value)| TagRow {
            tag: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Write the table as CSV. The header row is written even for an empty table.
pub fn write_csv<W: Write>(tags: &ResolvedTagMap, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(HEADER)?;
    for row in rows(tags) {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Parse a table previously written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TagRow>, ExportError> {
    let mut csv = csv::Reader::from_reader(reader);
    let rows = csv.deserialize().collect::<Result<Vec<TagRow>, _>>()?;
    Ok(rows)
}

/// A ready-to-download export: name, media type and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render the table into an in-memory artifact.
pub fn artifact(tags: &ResolvedTagMap, file_name: &str) -> Result<CsvArtifact, ExportError> {
    let mut bytes = Vec::new();
    write_csv(tags, &mut bytes)?;
    Ok(CsvArtifact {
        file_name: file_name.to_string(),
        media_type: MEDIA_TYPE,
        bytes,
    })
}

/// Write the table to `path`, creating or truncating the file.
pub fn export_to_path(tags: &ResolvedTagMap, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(tags, BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), rows = tags.len(), "CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::value::{RawTagMap, Rational, TagValue};
    use crate::vocabulary::GPS_INFO_TAG;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn sample_tags() -> ResolvedTagMap {
        let gps: RawTagMap = [
            (1, TagValue::Text("N".into())),
            (
                2,
                TagValue::Rational(vec![
                    Rational::new(40, 1),
                    Rational::new(26, 1),
                    Rational::new(46, 1),
                ]),
            ),
        ]
        .into_iter()
        .collect();
        let raw: RawTagMap = [
            (0x010F, TagValue::Text("Apple".into())),
            (0x0110, TagValue::Text("iPhone 15 Pro".into())),
            (0x010E, TagValue::Text("Dinner, \"al fresco\"\nsecond line".into())),
            (0x0112, TagValue::Integer(vec![6])),
            (0x9000, TagValue::Bytes(b"0232".to_vec())),
            (0x011A, TagValue::Rational(vec![Rational::new(72, 1)])),
            (GPS_INFO_TAG, TagValue::Group(gps)),
        ]
        .into_iter()
        .collect();
        resolve(&raw)
    }

    fn to_string(tags: &ResolvedTagMap) -> String {
        let mut buf = Vec::new();
        write_csv(tags, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_rows_in_resolver_order() {
        let csv = to_string(&sample_tags());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Tag,Value"));
        assert_eq!(lines.next(), Some("Make,Apple"));
        assert_eq!(lines.next(), Some("Model,iPhone 15 Pro"));
    }

    #[test]
    fn empty_table_still_has_header() {
        assert_eq!(to_string(&ResolvedTagMap::new()), "Tag,Value\n");
    }

    #[test]
    fn quotes_commas_quotes_and_newlines() {
        let csv = to_string(&sample_tags());
        assert!(csv.contains("ImageDescription,\"Dinner, \"\"al fresco\"\"\nsecond line\""));
        assert!(csv.contains("GPSInfo,\"{1: N, 2: (40/1, 26/1, 46/1)}\""));
    }

    #[test]
    fn parses_back_to_the_same_pairs() {
        let tags = sample_tags();
        let mut buf = Vec::new();
        write_csv(&tags, &mut buf).unwrap();

        let parsed: HashSet<(String, String)> = read_csv(buf.as_slice())
            .unwrap()
            .into_iter()
            .map(|r| (r.tag, r.value))
            .collect();
        let expected: HashSet<(String, String)> = tags
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn artifact_carries_name_and_media_type() {
        let artifact = artifact(&sample_tags(), DEFAULT_FILE_NAME).unwrap();
        assert_eq!(artifact.file_name, "exif_metadata.csv");
        assert_eq!(artifact.media_type, "text/csv");
        assert!(artifact.bytes.starts_with(b"Tag,Value\n"));
    }

    #[test]
    fn writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        export_to_path(&sample_tags(), &path).unwrap();

        let rows = read_csv(File::open(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(
            rows[0],
            TagRow {
                tag: "Make".into(),
                value: "Apple".into()
            }
        );
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let err = export_to_path(&sample_tags(), Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}

//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Show
//!
//! ```text
//! IMG_4242.jpg
//!     Format: JPEG 4032x3024
//!
//! EXIF Metadata (12 tags)
//!     Tag               Value
//!     ----------------  -----------------------------
//!     Make              Apple
//!     Model             iPhone 15 Pro
//!     GPSInfo           {1: N, 2: (40/1, 26/1, 46/1), ...
//!
//! Location
//!     GPS Coordinates found: 40.446111, -79.982222
//!     Map: https://www.openstreetmap.org/?mlat=40.446111&mlon=-79.982222#map=15/...
//! ```
//!
//! When something is missing, the section is replaced by its notice:
//!
//! ```text
//! blank.png
//!     Format: PNG 640x480
//!
//! No EXIF metadata found in this image.
//! ```
//!
//! ## Export
//!
//! ```text
//! Exported 12 tags → exif_metadata.csv (text/csv)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::AppConfig;
use crate::coordinates::Location;
use crate::export::{self, TagRow};
use crate::extract::{MetadataReport, Notice};
use crate::resolve::ResolvedTagMap;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate to `max` characters, appending `...` if truncated.
///
/// Counts characters, not bytes, so multi-byte text is never split.
fn truncate_value(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Newlines would break the table layout; show them as `⏎`.
fn single_line(text: &str) -> String {
    text.replace("\r\n", "⏎").replace(['\n', '\r'], "⏎")
}

// ============================================================================
// Show
// ============================================================================

/// Header block: file name plus format and dimensions when known.
pub fn format_summary(report: &MetadataReport) -> Vec<String> {
    let mut lines = vec![report.name.clone()];
    let format = report.format.as_deref().unwrap_or("unknown format");
    match report.dimensions {
        Some(d) => lines.push(format!("{}Format: {} {}x{}", indent(1), format, d.width, d.height)),
        None => lines.push(format!("{}Format: {}", indent(1), format)),
    }
    lines
}

/// Two-column tag table, values truncated to `max_value_width` characters.
pub fn format_tag_table(tags: &ResolvedTagMap, max_value_width: usize) -> Vec<String> {
    let rows: Vec<TagRow> = export::rows(tags);
    let mut lines = vec![format!("EXIF Metadata ({} tags)", rows.len())];
    if rows.is_empty() {
        lines.push(format!("{}(no recognized tags)", indent(1)));
        return lines;
    }

    let cells: Vec<(String, String)> = rows
        .into_iter()
        .map(|r| (r.tag, truncate_value(&single_line(&r.value), max_value_width)))
        .collect();
    let tag_width = cells
        .iter()
        .map(|(t, _)| t.chars().count())
        .max()
        .unwrap_or(0)
        .max("Tag".len());
    let value_width = cells
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0)
        .max("Value".len());

    lines.push(format!("{}{:<tag_width$}  Value", indent(1), "Tag"));
    lines.push(format!(
        "{}{}  {}",
        indent(1),
        "-".repeat(tag_width),
        "-".repeat(value_width)
    ));
    for (tag, value) in cells {
        lines.push(format!("{}{:<tag_width$}  {}", indent(1), tag, value));
    }
    lines
}

/// Location block: formatted coordinates and map link.
pub fn format_location(location: &Location, config: &AppConfig) -> Vec<String> {
    let precision = config.display.precision;
    vec![
        "Location".to_string(),
        format!(
            "{}GPS Coordinates found: {}",
            indent(1),
            location.format(precision)
        ),
        format!(
            "{}Map: {}",
            indent(1),
            config.map.url_for(location, precision)
        ),
    ]
}

pub fn format_notice(notice: Notice) -> String {
    notice.to_string()
}

/// Full `show` output.
pub fn format_show_output(report: &MetadataReport, config: &AppConfig) -> Vec<String> {
    let mut lines = format_summary(report);

    if let Some(tags) = report.tags() {
        lines.push(String::new());
        lines.extend(format_tag_table(tags, config.display.max_value_width));
    }
    if let Some(location) = report.location() {
        lines.push(String::new());
        lines.extend(format_location(&location, config));
    }
    for notice in report.notices() {
        lines.push(String::new());
        lines.push(format_notice(notice));
    }
    lines
}

pub fn print_show_output(report: &MetadataReport, config: &AppConfig) {
    for line in format_show_output(report, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

/// Confirmation line after a CSV was written.
pub fn format_export_output(tag_count: usize, destination: &Path) -> Vec<String> {
    vec![format!(
        "Exported {} tags → {} ({})",
        tag_count,
        destination.display(),
        export::MEDIA_TYPE
    )]
}

pub fn print_export_output(tag_count: usize, destination: &Path) {
    for line in format_export_output(tag_count, destination) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Outcome;
    use crate::imaging::Dimensions;
    use crate::resolve::resolve;
    use crate::value::{RawTagMap, TagValue};

    fn tags(entries: &[(u16, &str)]) -> ResolvedTagMap {
        let raw: RawTagMap = entries
            .iter()
            .map(|&(id, v)| (id, TagValue::Text(v.to_string())))
            .collect();
        resolve(&raw)
    }

    fn report(outcome: Outcome) -> MetadataReport {
        MetadataReport {
            name: "IMG_4242.jpg".into(),
            format: Some("JPEG".into()),
            dimensions: Some(Dimensions {
                width: 4032,
                height: 3024,
            }),
            outcome,
        }
    }

    fn pittsburgh() -> Location {
        Location {
            latitude: 40.4461111,
            longitude: -79.9822222,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_value("short", 10), "short");
        assert_eq!(truncate_value("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate_value("ééééééééééé", 8), "ééééé...");
    }

    #[test]
    fn newlines_flattened() {
        assert_eq!(single_line("a\nb\r\nc"), "a⏎b⏎c");
    }

    // =========================================================================
    // Show
    // =========================================================================

    #[test]
    fn summary_with_dimensions() {
        let lines = format_summary(&report(Outcome::NoMetadata));
        assert_eq!(lines, vec!["IMG_4242.jpg", "    Format: JPEG 4032x3024"]);
    }

    #[test]
    fn table_aligns_columns() {
        let lines = format_tag_table(&tags(&[(0x010F, "Apple"), (0x0110, "iPhone 15 Pro")]), 80);
        assert_eq!(
            lines,
            vec![
                "EXIF Metadata (2 tags)",
                "    Tag    Value",
                "    -----  -------------",
                "    Make   Apple",
                "    Model  iPhone 15 Pro",
            ]
        );
    }

    #[test]
    fn table_truncates_long_values() {
        let long = "x".repeat(200);
        let lines = format_tag_table(&tags(&[(0x010E, &long)]), 20);
        let row = lines.last().unwrap();
        assert!(row.ends_with(&format!("{}...", "x".repeat(17))), "{row}");
    }

    #[test]
    fn empty_table_says_so() {
        let lines = format_tag_table(&ResolvedTagMap::new(), 80);
        assert_eq!(lines, vec!["EXIF Metadata (0 tags)", "    (no recognized tags)"]);
    }

    #[test]
    fn no_metadata_shows_only_notice() {
        let lines = format_show_output(&report(Outcome::NoMetadata), &AppConfig::default());
        assert!(!lines.iter().any(|l| l.starts_with("EXIF Metadata")));
        assert!(!lines.iter().any(|l| l == "Location"));
        assert_eq!(lines.last().unwrap(), "No EXIF metadata found in this image.");
    }

    #[test]
    fn metadata_without_location_shows_table_and_notice() {
        let outcome = Outcome::Metadata {
            tags: tags(&[(0x010F, "Canon")]),
            location: None,
        };
        let lines = format_show_output(&report(outcome), &AppConfig::default());
        assert!(lines.iter().any(|l| l == "EXIF Metadata (1 tags)"));
        assert!(!lines.iter().any(|l| l == "Location"));
        assert_eq!(lines.last().unwrap(), "No GPS location data found in this image.");
    }

    #[test]
    fn location_block_with_map_link() {
        let lines = format_location(&pittsburgh(), &AppConfig::default());
        assert_eq!(lines[0], "Location");
        assert_eq!(lines[1], "    GPS Coordinates found: 40.446111, -79.982222");
        assert!(lines[2].starts_with("    Map: https://www.openstreetmap.org/?mlat=40.446111"));
    }

    #[test]
    fn precision_follows_config() {
        let mut config = AppConfig::default();
        config.display.precision = 2;
        let lines = format_location(&pittsburgh(), &config);
        assert_eq!(lines[1], "    GPS Coordinates found: 40.45, -79.98");
    }

    // =========================================================================
    // Export
    // =========================================================================

    #[test]
    fn export_confirmation() {
        let lines = format_export_output(12, Path::new("exif_metadata.csv"));
        assert_eq!(lines, vec!["Exported 12 tags → exif_metadata.csv (text/csv)"]);
    }
}

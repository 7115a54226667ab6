//! Shared test utilities: in-memory images with and without EXIF.
//!
//! Fixtures are built in code rather than checked in as binaries, so each test
//! states exactly which tags its image carries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut fields = vec![ascii_field(Tag::Make, "Apple")];
//! fields.extend(pittsburgh_gps_fields());
//! let jpeg = jpeg_with_exif(&tiff_with_fields(&fields));
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::io::Cursor;

// =========================================================================
// Field builders
// =========================================================================

pub fn ascii_field(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn short_field(tag: Tag, value: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

pub fn rational_field(tag: Tag, values: &[(u32, u32)]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(values.iter().map(|&r| r.into()).collect()),
    }
}

/// 40°26'46" N, 79°58'56" W.
pub fn pittsburgh_gps_fields() -> Vec<Field> {
    vec![
        ascii_field(Tag::GPSLatitudeRef, "N"),
        rational_field(Tag::GPSLatitude, &[(40, 1), (26, 1), (46, 1)]),
        ascii_field(Tag::GPSLongitudeRef, "W"),
        rational_field(Tag::GPSLongitude, &[(79, 1), (58, 1), (56, 1)]),
    ]
}

// =========================================================================
// Container builders
// =========================================================================

/// Little-endian TIFF/EXIF block holding `fields`.
pub fn tiff_with_fields(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

/// Minimal JPEG: SOI, APP1 "Exif" segment wrapping `tiff`, EOI. No image data.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// A real 4×3 PNG with no eXIf chunk.
pub fn plain_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 120, 40]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

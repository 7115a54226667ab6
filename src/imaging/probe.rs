//! Container format and pixel dimensions, without decoding pixels.

use image::{ImageFormat, ImageReader};
use serde::Serialize;
use std::io::Cursor;

/// Pixel dimensions of the primary image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What the `image` crate can tell about a file from its header alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageInfo {
    /// Short format name, e.g. `"JPEG"`. `None` for unknown magic bytes.
    pub format: Option<String>,
    pub dimensions: Option<Dimensions>,
}

pub fn probe(bytes: &[u8]) -> ImageInfo {
    let Ok(format) = image::guess_format(bytes) else {
        return ImageInfo::default();
    };

    let dimensions = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map(|(width, height)| Dimensions { width, height })
        .map_err(|err| tracing::debug!(error = %err, "could not read image dimensions"))
        .ok();

    ImageInfo {
        format: Some(format_name(format)),
        dimensions,
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        other => other
            .extensions_str()
            .first()
            .map(|ext| ext.to_uppercase())
            .unwrap_or_else(|| format!("{other:?}").to_uppercase()),
    }
}

//! Image decoding: the boundary to the decoder crates.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | **Format + dimensions** | `image::guess_format`, `ImageReader::into_dimensions` |
//! | **EXIF tags** | `kamadak-exif` (`exif::Reader::read_from_container`) |
//!
//! The module is split into:
//! - **Probe**: header-only identification (unit testable on byte slices)
//! - **EXIF reader**: decoder fields → [`RawTagMap`]
//!
//! Everything downstream works on a [`DecodedImage`], never on files.

mod exif_reader;
pub mod probe;

pub use exif_reader::read_raw_tags;
pub use probe::{Dimensions, ImageInfo, probe};

use crate::value::RawTagMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported file type '{extension}' (accepted: {accepted})")]
    UnsupportedType { extension: String, accepted: String },
}

/// An image handed over to metadata extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Display name, usually the file name.
    pub name: String,
    pub info: ImageInfo,
    /// `None` when the image carries no decodable EXIF structure.
    pub raw_tags: Option<RawTagMap>,
}

/// Decode an in-memory image.
pub fn decode_bytes(name: impl Into<String>, bytes: &[u8]) -> DecodedImage {
    DecodedImage {
        name: name.into(),
        info: probe(bytes),
        raw_tags: read_raw_tags(bytes),
    }
}

/// Read and decode an image file, rejecting extensions not in `accepted`.
///
/// The extension check is case-insensitive.
pub fn open_image(path: &Path, accepted: &[String]) -> Result<DecodedImage, ImagingError> {
    check_extension(path, accepted)?;

    let bytes = std::fs::read(path).map_err(|source| ImagingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(file = %path.display(), bytes = bytes.len(), "decoding image");
    Ok(decode_bytes(name, &bytes))
}

fn check_extension(path: &Path, accepted: &[String]) -> Result<(), ImagingError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if accepted.iter().any(|a| a.eq_ignore_ascii_case(&ext)) {
        Ok(())
    } else {
        Err(ImagingError::UnsupportedType {
            extension: ext,
            accepted: accepted.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn accepted() -> Vec<String> {
        vec!["jpg".into(), "jpeg".into(), "png".into()]
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(check_extension(Path::new("IMG_0001.JPG"), &accepted()).is_ok());
        assert!(check_extension(Path::new("scan.png"), &accepted()).is_ok());
    }

    #[test]
    fn rejects_unlisted_extension() {
        let err = check_extension(Path::new("raw.cr2"), &accepted()).unwrap_err();
        assert!(matches!(
            err,
            ImagingError::UnsupportedType { ref extension, .. } if extension == "cr2"
        ));
        assert!(check_extension(Path::new("noextension"), &accepted()).is_err());
    }

    #[test]
    fn empty_accept_list_accepts_nothing() {
        assert!(check_extension(Path::new("photo.jpg"), &[]).is_err());
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let err = open_image(Path::new("/nonexistent/photo.jpg"), &accepted()).unwrap_err();
        assert!(matches!(err, ImagingError::Io { .. }));
    }

    #[test]
    fn open_reads_name_and_tags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IMG_4242.jpg");
        let tiff = tiff_with_fields(&[ascii_field(exif::Tag::Make, "Apple")]);
        fs::write(&path, jpeg_with_exif(&tiff)).unwrap();

        let decoded = open_image(&path, &accepted()).unwrap();
        assert_eq!(decoded.name, "IMG_4242.jpg");
        assert_eq!(decoded.info.format.as_deref(), Some("JPEG"));
        assert!(decoded.raw_tags.is_some());
    }

    #[test]
    fn decode_png_without_metadata() {
        let decoded = decode_bytes("blank.png", &plain_png());
        assert_eq!(decoded.raw_tags, None);
        assert_eq!(decoded.info.format.as_deref(), Some("PNG"));
    }
}

//! # exifmap
//!
//! Look inside a photo: list its EXIF tags, find where it was taken, and save
//! the tags as a CSV file.
//!
//! # Architecture: Decode, Resolve, Locate
//!
//! ```text
//! 1. Decode    image bytes    →  RawTagMap        (numeric ids, GPS nested)
//! 2. Resolve   RawTagMap      →  ResolvedTagMap   (names via static vocabulary)
//! 3. Locate    ResolvedTagMap →  Option<Location> (GPS sub-tags → decimal degrees)
//! ```
//!
//! Decoding is the only step that touches a decoder crate. Resolution and
//! location are pure functions over in-memory maps, so their tests need no
//! image files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Decoder boundary: format probe (`image`) and EXIF fields (`kamadak-exif`) |
//! | [`value`] | Raw tag values and the ordered [`RawTagMap`](value::RawTagMap) |
//! | [`vocabulary`] | Static id → name tables for EXIF and GPS tags |
//! | [`resolve`] | Id → name translation, dropping unknown ids |
//! | [`coordinates`] | DMS → decimal degrees, hemispheres, [`Location`](coordinates::Location) |
//! | [`gps`] | All-or-nothing GPS extraction from resolved tags |
//! | [`extract`] | Builds the per-image report and its notices |
//! | [`export`] | `Tag,Value` CSV writer and reader |
//! | [`config`] | `exifmap.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Missing Data Is Not an Error
//!
//! Most photos in the wild have no GPS block and many have no EXIF at all.
//! These cases are [`extract::Outcome`] values and [`extract::Notice`]s, not
//! `Err`s. Errors are reserved for things the user must fix: an unreadable
//! file, an unsupported file type, an invalid config, an unwritable export
//! path.
//!
//! ## Fail Fast on Malformed Rationals
//!
//! A GPS rational with a zero denominator makes the conversion return
//! [`gps::GpsError::ZeroDenominator`] rather than infinity or NaN. The
//! extractor then reports "no location", and the reason is logged at debug
//! level (`-v`).
//!
//! ## Ordered Maps
//!
//! Tag maps are small ordered vectors, not hash maps: the decoder's traversal
//! order is the order rows appear in the table and in the CSV.

pub mod config;
pub mod coordinates;
pub mod export;
pub mod extract;
pub mod gps;
pub mod imaging;
pub mod output;
pub mod resolve;
pub mod value;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod test_helpers;

//! Tag resolution: raw numeric ids → human-readable names.
//!
//! Resolution is a plain vocabulary lookup per entry. Ids the vocabulary does
//! not know are dropped, not kept under their number: the table only shows
//! tags that have a name. Values pass through untouched, so the GPS
//! sub-structure is still a nested [`RawTagMap`] keyed by GPS ids after this
//! step (see [`crate::gps`] for the second-level lookup).

use crate::value::{RawTagMap, TagValue};
use crate::vocabulary::{EXIF_TAGS, GPS_TAGS, TagVocabulary};

/// Ordered name → value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTagMap {
    entries: Vec<(&'static str, TagValue)>,
}

impl ResolvedTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing name keeps its position and gets the new value.
    pub fn insert(&mut self, name: &'static str, value: TagValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TagValue)> {
        self.entries.iter().map(|(name, v)| (*name, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve top-level tags against the general EXIF vocabulary.
pub fn resolve(raw: &RawTagMap) -> ResolvedTagMap {
    resolve_with(raw, &EXIF_TAGS)
}

/// Resolve the entries of a `GPSInfo` sub-structure against the GPS vocabulary.
pub fn resolve_gps(raw: &RawTagMap) -> ResolvedTagMap {
    resolve_with(raw, &GPS_TAGS)
}

/// Resolve `raw` against any vocabulary, keeping traversal order.
pub fn resolve_with(raw: &RawTagMap, vocabulary: &TagVocabulary) -> ResolvedTagMap {
    let mut resolved = ResolvedTagMap::new();
    for (id, value) in raw.iter() {
        match vocabulary.name(id) {
            Some(name) => resolved.insert(name, value.clone()),
            None => tracing::trace!(
                namespace = vocabulary.namespace(),
                "dropping unknown tag 0x{id:04X}"
            ),
        }
    }
    resolved
}

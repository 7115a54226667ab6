//! Raw tag values as handed over by the image decoder.
//!
//! A [`RawTagMap`] keeps decoder traversal order: it is a small ordered list of
//! `(id, value)` pairs rather than a hash map, because the order of entries is
//! the order rows appear in the table and in the exported CSV. Maps hold a few
//! dozen entries at most, so linear lookups are fine.

use std::fmt;

/// An EXIF rational kept as its raw numerator/denominator pair.
///
/// Signed and unsigned rationals (`SRATIONAL` / `RATIONAL`) both fit in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Value as a float, `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(self.numerator as f64 / self.denominator as f64)
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// One raw tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// BYTE, SHORT, LONG and their signed variants.
    Integer(Vec<i64>),
    /// FLOAT and DOUBLE.
    Float(Vec<f64>),
    /// ASCII strings.
    Text(String),
    /// UNDEFINED payloads (MakerNote, ExifVersion, UserComment, ...).
    Bytes(Vec<u8>),
    /// RATIONAL and SRATIONAL tuples.
    Rational(Vec<Rational>),
    /// A nested sub-IFD keyed by its own id namespace (GPS).
    Group(RawTagMap),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            TagValue::Rational(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&RawTagMap> {
        match self {
            TagValue::Group(g) => Some(g),
            _ => None,
        }
    }
}

/// Writes `items` as a bare value when there is one, as `(a, b, c)` otherwise.
fn write_sequence<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if let [single] = items {
        return write!(f, "{single}");
    }
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

/// Printable ASCII passes through, everything else is `\xNN`.
fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        if b == b' ' || b.is_ascii_graphic() {
            write!(f, "{}", b as char)?;
        } else {
            write!(f, "\\x{b:02x}")?;
        }
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Integer(v) => write_sequence(f, v),
            TagValue::Float(v) => write_sequence(f, v),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Bytes(b) => write_bytes(f, b),
            TagValue::Rational(v) => write_sequence(f, v),
            TagValue::Group(map) => write!(f, "{map}"),
        }
    }
}

/// Ordered id → value mapping produced by the decoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTagMap {
    entries: Vec<(u16, TagValue)>,
}

impl RawTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing id keeps its position and gets the new value.
    pub fn insert(&mut self, id: u16, value: TagValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: u16) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, id: u16) -> Option<&mut TagValue> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| *existing == id)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &TagValue)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u16, TagValue)> for RawTagMap {
    fn from_iter<I: IntoIterator<Item = (u16, TagValue)>>(iter: I) -> Self {
        let mut map = RawTagMap::new();
        for (id, value) in iter {
            map.insert(id, value);
        }
        map
    }
}

impl fmt::Display for RawTagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (id, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_to_f64() {
        assert_eq!(Rational::new(1, 4).to_f64(), Some(0.25));
        assert_eq!(Rational::new(-3, 2).to_f64(), Some(-1.5));
        assert_eq!(Rational::new(5, 0).to_f64(), None);
    }

    #[test]
    fn display_single_and_multiple_integers() {
        assert_eq!(TagValue::Integer(vec![6]).to_string(), "6");
        assert_eq!(TagValue::Integer(vec![2, 2, 0, 0]).to_string(), "(2, 2, 0, 0)");
    }

    #[test]
    fn display_rationals() {
        assert_eq!(TagValue::Rational(vec![Rational::new(72, 1)]).to_string(), "72/1");
        let dms = TagValue::Rational(vec![
            Rational::new(40, 1),
            Rational::new(26, 1),
            Rational::new(4615, 100),
        ]);
        assert_eq!(dms.to_string(), "(40/1, 26/1, 4615/100)");
    }

    #[test]
    fn display_bytes_escapes_non_printable() {
        assert_eq!(TagValue::Bytes(b"0231".to_vec()).to_string(), "0231");
        assert_eq!(TagValue::Bytes(vec![1, 2, 3, 0]).to_string(), "\\x01\\x02\\x03\\x00");
    }

    #[test]
    fn display_group_uses_raw_ids() {
        let group: RawTagMap = [
            (1, TagValue::Text("N".into())),
            (2, TagValue::Rational(vec![Rational::new(40, 1)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(TagValue::Group(group).to_string(), "{1: N, 2: 40/1}");
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut map = RawTagMap::new();
        map.insert(0x010F, TagValue::Text("Canon".into()));
        map.insert(0x0110, TagValue::Text("EOS".into()));
        map.insert(0x010F, TagValue::Text("Nikon".into()));

        let ids: Vec<u16> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0x010F, 0x0110]);
        assert_eq!(map.get(0x010F), Some(&TagValue::Text("Nikon".into())));
    }

    #[test]
    fn accessors_reject_other_variants() {
        let text = TagValue::Text("N".into());
        assert_eq!(text.as_text(), Some("N"));
        assert!(text.as_rationals().is_none());
        assert!(text.as_group().is_none());
    }
}

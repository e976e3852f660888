use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Dot-delimited address of a field inside the form state.
///
/// Segments that parse as unsigned integers address array elements, the rest
/// address object members: `metadata.locations.0.geometry` points at the
/// `geometry` member of the first element of `metadata.locations`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates a path from its dot-delimited form. Empty segments are
    /// dropped, so `"a..b"` and `"a.b"` are the same path; the empty string
    /// addresses the document root.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            segments: path
                .as_ref()
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// The path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// True for the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trips_through_display() {
        let path = FieldPath::new("metadata.locations.0.geometry");
        assert_eq!(path.to_string(), "metadata.locations.0.geometry");
        assert_eq!(path.segments().count(), 4);
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(FieldPath::new("a..b"), FieldPath::new("a.b"));
    }

    #[test]
    fn empty_path_is_root() {
        assert!(FieldPath::new("").is_root());
        assert!(!FieldPath::new("a").is_root());
    }
}

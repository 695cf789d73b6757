//! Locations inside a JSON document.
//!
//! [`JsonPath`] names where a violation or an unencodable value was found,
//! e.g. `readings[2].celsius`.

use std::fmt::{self, Display};

/// A segment of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member (e.g., `user`, `email`)
    Field(String),
    /// An array position (e.g., `[0]`)
    Index(usize),
}

/// A path to a value in a JSON document.
///
/// Paths are immutable; `push_*` returns an extended copy so sibling
/// branches can share a prefix.
///
/// # Example
///
/// ```rust
/// use jsoncap::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("readings")
///     .push_index(2)
///     .push_field("celsius");
///
/// assert_eq!(path.to_string(), "readings[2].celsius");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, pointing at the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True for the path of the document itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`is_root`](Self::is_root).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from the root outwards.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders the path for messages, using `(root)` for the empty path.
    pub fn label(&self) -> String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.label(), "(root)");
    }

    #[test]
    fn test_mixed_segments() {
        let path = JsonPath::root()
            .push_field("matrix")
            .push_index(1)
            .push_index(0);
        assert_eq!(path.to_string(), "matrix[1][0]");
        assert_eq!(path.label(), "matrix[1][0]");
    }

    #[test]
    fn test_leading_index() {
        let path = JsonPath::root().push_index(3).push_field("id");
        assert_eq!(path.to_string(), "[3].id");
    }

    #[test]
    fn test_push_does_not_mutate_prefix() {
        let base = JsonPath::root().push_field("user");
        let email = base.push_field("email");
        let name = base.push_field("name");

        assert_eq!(base.len(), 1);
        assert_eq!(email.to_string(), "user.email");
        assert_eq!(name.to_string(), "user.name");
    }

    #[test]
    fn test_segments_iteration() {
        let path = JsonPath::root().push_field("a").push_index(7);
        let segments: Vec<_> = path.segments().cloned().collect();
        assert_eq!(
            segments,
            vec![PathSegment::Field("a".to_string()), PathSegment::Index(7)]
        );
    }
}

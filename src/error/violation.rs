//! Per-path validation failures.
//!
//! [`Violation`] describes one mismatch between a value and its declared
//! shape; [`Violations`] is the non-empty set reported by a failed
//! validation.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single mismatch between a value and its declared shape.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Violation};
///
/// let violation = Violation::new(JsonPath::root().push_field("port"), "must be at most 65535")
///     .with_code("max_value")
///     .with_expected("at most 65535")
///     .with_got("70000");
///
/// assert_eq!(violation.to_string(), "port: must be at most 65535 (expected: at most 65535) (got: 70000)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Where the offending value sits.
    pub path: JsonPath,
    pub message: String,
    /// Rendered form of the offending value, when useful.
    pub got: Option<String>,
    pub expected: Option<String>,
    /// Machine-readable code such as `required` or `invalid_type`.
    pub code: String,
}

impl Violation {
    /// Creates a violation with the generic `validation_error` code.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the machine-readable code, e.g. `"min_length"`.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Records what was found, usually a JSON type name.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Records what the schema wanted.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.label(), self.message)?;
        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violation {}

/// A non-empty collection of violations.
///
/// Backed by `NonEmptyVec` so a failed validation always explains itself.
/// Collections combine through `Semigroup`, which is how sibling fields and
/// array items report together.
///
/// ```rust
/// use jsoncap::{JsonPath, Violation, Violations};
/// use stillwater::prelude::*;
///
/// let missing = Violations::single(Violation::new(JsonPath::root().push_field("text"), "required"));
/// let wrong = Violations::single(Violation::new(JsonPath::root().push_field("booleans"), "expected boolean"));
///
/// assert_eq!(missing.combine(wrong).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Wraps one violation.
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Builds the collection from a list, or `None` when the list is empty.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        let mut iter = violations.into_iter();
        let head = Self::single(iter.next()?);
        Some(iter.fold(head, |acc, v| acc.combine(Self::single(v))))
    }

    /// Number of violations. Never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates in the order the violations were reported.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// The first violation reported.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Violations recorded at exactly `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Violation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Violations carrying `code`.
    pub fn with_code(&self, code: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.code == code).collect()
    }

    /// Unwraps into a plain, non-empty `Vec`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violations>();
    assert_sync::<Violations>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn at(field: &str, code: &str) -> Violation {
        Violation::new(JsonPath::root().push_field(field), format!("{field} failed")).with_code(code)
    }

    #[test]
    fn test_violation_defaults() {
        let violation = Violation::new(JsonPath::root(), "bad");
        assert_eq!(violation.code, "validation_error");
        assert!(violation.got.is_none());
        assert!(violation.expected.is_none());
        assert_eq!(violation.to_string(), "(root): bad");
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(Violations::from_vec(Vec::new()).is_none());
        let violations = Violations::from_vec(vec![at("a", "required")]).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_combine_keeps_order() {
        let combined = Violations::single(at("z", "required"))
            .combine(Violations::single(at("a", "invalid_type")))
            .combine(Violations::single(at("m", "required")));

        let paths: Vec<_> = combined.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["z", "a", "m"]);
        assert_eq!(combined.with_code("required").len(), 2);
        assert_eq!(combined.at_path(&JsonPath::root().push_field("a")).len(), 1);
    }

    #[test]
    fn test_display_lists_every_violation() {
        let combined =
            Violations::single(at("text", "required")).combine(Violations::single(at("booleans", "invalid_type")));
        let display = combined.to_string();

        assert!(display.contains("2 violation(s)"));
        assert!(display.contains("1. text: text failed"));
        assert!(display.contains("2. booleans: booleans failed"));
    }

    #[test]
    fn test_into_iter_yields_owned() {
        let combined = Violations::single(at("a", "x")).combine(Violations::single(at("b", "y")));
        let codes: Vec<String> = combined.into_iter().map(|v| v.code).collect();
        assert_eq!(codes, vec!["x", "y"]);
    }
}

//! Where a property value was defined.
//!
//! Origins are recorded by the line-oriented parser only and kept beside the
//! values in a [`crate::PropertySource`], never wrapped around them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A 1-based line/column position inside a text resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Origin of a value loaded from a text resource: the resource description
/// plus the position where the value starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextResourceOrigin {
    pub resource: String,
    pub location: Location,
}

impl TextResourceOrigin {
    pub fn new(resource: impl Into<String>, location: Location) -> Self {
        Self {
            resource: resource.into(),
            location,
        }
    }
}

/// Formats as `file [app.properties] - 3:5`, which is what bind failures
/// report back to users.
impl Display for TextResourceOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.resource, self.location)
    }
}

/// Types that can report the origin of one of their keys.
pub trait OriginLookup {
    fn origin(&self, key: &str) -> Option<&TextResourceOrigin>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_origin_display() {
        let origin = TextResourceOrigin::new("file [conf/app.properties]", Location::new(2, 5));
        assert_eq!(origin.to_string(), "file [conf/app.properties] - 2:5");
    }

    #[test]
    fn test_location_ordering_is_line_major() {
        assert!(Location::new(1, 40) < Location::new(2, 1));
        assert!(Location::new(2, 1) < Location::new(2, 2));
    }
}

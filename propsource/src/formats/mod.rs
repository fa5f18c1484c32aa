//! All supported property file formats for propsource.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod properties;
pub mod xml;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use properties::Format as PropertiesFormat;
pub use xml::Format as XmlFormat;

use crate::Error;

const XML_FILE_EXTENSION: &str = ".xml";

/// Represents all supported property file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Line-oriented `key=value` text, origin-tracked.
    Properties,
    /// Java properties-as-XML document.
    Xml,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use propsource::formats::FormatType;
/// assert_eq!(FormatType::Properties.to_string(), "properties");
/// assert_eq!(FormatType::Xml.to_string(), "xml");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Properties => write!(f, "properties"),
            FormatType::Xml => write!(f, "xml"),
        }
    }
}

/// Accepts `"properties"`/`"props"` and `"xml"`, case-insensitively.
///
/// Returns [`crate::error::Error::UnsupportedFormat`] for anything else.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "properties" | "props" => Ok(FormatType::Properties),
            "xml" => Ok(FormatType::Xml),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Picks the parser for a resource: names ending in `.xml` are XML, every
    /// other name (or no name at all) is line-oriented.
    ///
    /// # Example
    /// ```rust
    /// use propsource::formats::FormatType;
    /// assert_eq!(FormatType::for_filename(Some("app.xml")), FormatType::Xml);
    /// assert_eq!(FormatType::for_filename(Some("app.conf")), FormatType::Properties);
    /// assert_eq!(FormatType::for_filename(None), FormatType::Properties);
    /// ```
    pub fn for_filename(filename: Option<&str>) -> FormatType {
        match filename {
            Some(name) if name.ends_with(XML_FILE_EXTENSION) => FormatType::Xml,
            _ => FormatType::Properties,
        }
    }
}

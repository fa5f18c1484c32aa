//! All error types for the propsource crate.
//!
//! These are returned from all fallible operations (reading resources, parsing,
//! serialization, loader dispatch).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("malformed \\uxxxx encoding at {line}:{column}")]
    MalformedEscape { line: usize, column: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttribute(value.to_string())
    }
}

impl Error {
    /// Whether this error came from the underlying byte stream rather than the
    /// content of the resource.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

//! Traits for parsing/serializing property files and for loading them into
//! property sources.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, property_source::PropertySource, resource::Resource};

/// A trait for parsing and writing one property file format from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use propsource::traits::Parser;
/// let format = propsource::formats::PropertiesFormat::from_str("greeting=hello")?;
/// format.write_to("app_copy.properties")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Strategy that turns a resource into property sources.
///
/// Loaders hold no per-call state, so one instance may serve concurrent loads
/// of independent resources.
pub trait PropertySourceLoader: Send + Sync {
    /// File extensions (without the dot) this loader understands.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Loads `resource` into zero or more sources named after `name`.
    fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, Error>;
}

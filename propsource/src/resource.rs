//! Readable inputs handed to loaders.
//!
//! A [`Resource`] is owned by the caller. Loaders open it, read it to the end
//! and drop the reader before returning.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::{Path, PathBuf},
};

/// An opaque handle to readable byte content with an optional filename.
pub trait Resource {
    /// The filename (last path component), if the resource has one.
    fn filename(&self) -> Option<&str>;

    /// A human readable description, used in origins and error messages.
    fn description(&self) -> String;

    /// Opens a fresh reader over the content.
    fn open(&self) -> std::io::Result<Box<dyn BufRead + '_>>;
}

/// A resource backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
    fn filename(&self) -> Option<&str> {
        self.path.file_name().and_then(|s| s.to_str())
    }

    fn description(&self) -> String {
        format!("file [{}]", self.path.display())
    }

    fn open(&self) -> std::io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// An in-memory resource, optionally carrying the filename it pretends to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteResource {
    bytes: Vec<u8>,
    filename: Option<String>,
}

impl ByteResource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl Resource for ByteResource {
    fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    fn description(&self) -> String {
        match &self.filename {
            Some(filename) => format!("byte array resource [{}]", filename),
            None => "byte array resource".to_string(),
        }
    }

    fn open(&self) -> std::io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }
}
